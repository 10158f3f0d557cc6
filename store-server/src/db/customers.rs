use shared::models::Customer;
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

pub async fn find_by_id(
    ex: impl PgExecutor<'_>,
    id: Uuid,
) -> Result<Option<Customer>, sqlx::Error> {
    sqlx::query_as("SELECT id, name, email, phone_number FROM customers WHERE id = $1")
        .bind(id)
        .fetch_optional(ex)
        .await
}

pub async fn exists(ex: impl PgExecutor<'_>, id: Uuid) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM customers WHERE id = $1)")
        .bind(id)
        .fetch_one(ex)
        .await
}

pub async fn find_by_name(
    ex: impl PgExecutor<'_>,
    name: &str,
) -> Result<Option<Customer>, sqlx::Error> {
    sqlx::query_as("SELECT id, name, email, phone_number FROM customers WHERE name = $1 LIMIT 1")
        .bind(name)
        .fetch_optional(ex)
        .await
}

pub async fn insert(ex: impl PgExecutor<'_>, customer: &Customer) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO customers (id, name, email, phone_number) VALUES ($1, $2, $3, $4)")
        .bind(customer.id)
        .bind(&customer.name)
        .bind(&customer.email)
        .bind(&customer.phone_number)
        .execute(ex)
        .await?;
    Ok(())
}

pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM customers")
        .fetch_one(pool)
        .await
}

/// Look a customer up by display name, lazily creating one on first sight.
///
/// The implicit-checkout collaborator: runs before the order engine so the
/// engine only ever sees resolved customer ids.
pub async fn resolve_or_create(pool: &PgPool, name: &str) -> Result<Customer, sqlx::Error> {
    if let Some(customer) = find_by_name(pool, name).await? {
        return Ok(customer);
    }

    let customer = Customer {
        id: Uuid::new_v4(),
        name: name.to_string(),
        email: format!("{name}@example.com"),
        phone_number: None,
    };
    insert(pool, &customer).await?;
    tracing::info!(customer_id = %customer.id, name = %customer.name, "customer created implicitly");
    Ok(customer)
}
