use shared::models::Product;
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

pub async fn insert(ex: impl PgExecutor<'_>, product: &Product) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO products (id, sku, internal_code, name, description, current_unit_price, stock_quantity, is_active)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
    )
    .bind(product.id)
    .bind(&product.sku)
    .bind(&product.internal_code)
    .bind(&product.name)
    .bind(&product.description)
    .bind(product.current_unit_price)
    .bind(product.stock_quantity)
    .bind(product.is_active)
    .execute(ex)
    .await?;
    Ok(())
}

pub async fn list_active(pool: &PgPool) -> Result<Vec<Product>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM products WHERE is_active ORDER BY name")
        .fetch_all(pool)
        .await
}

pub async fn list_all(pool: &PgPool) -> Result<Vec<Product>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM products ORDER BY name")
        .fetch_all(pool)
        .await
}

pub async fn find_by_id(ex: impl PgExecutor<'_>, id: Uuid) -> Result<Option<Product>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM products WHERE id = $1")
        .bind(id)
        .fetch_optional(ex)
        .await
}

pub async fn find_active_by_id(
    ex: impl PgExecutor<'_>,
    id: Uuid,
) -> Result<Option<Product>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM products WHERE id = $1 AND is_active")
        .bind(id)
        .fetch_optional(ex)
        .await
}

/// Fetch an active product and take a row lock on it.
///
/// Order creation locks each line's product before the stock check so two
/// concurrent checkouts cannot both pass it and overdraw the stock.
pub async fn find_active_for_update(
    ex: impl PgExecutor<'_>,
    id: Uuid,
) -> Result<Option<Product>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM products WHERE id = $1 AND is_active FOR UPDATE")
        .bind(id)
        .fetch_optional(ex)
        .await
}

/// Whether another product (excluding `exclude`) already uses this sku
pub async fn sku_exists(
    ex: impl PgExecutor<'_>,
    sku: &str,
    exclude: Option<Uuid>,
) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT EXISTS (SELECT 1 FROM products WHERE sku = $1 AND ($2::uuid IS NULL OR id <> $2))",
    )
    .bind(sku)
    .bind(exclude)
    .fetch_one(ex)
    .await
}

pub async fn update(ex: impl PgExecutor<'_>, product: &Product) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE products
         SET sku = $2, internal_code = $3, name = $4, description = $5,
             current_unit_price = $6, stock_quantity = $7
         WHERE id = $1",
    )
    .bind(product.id)
    .bind(&product.sku)
    .bind(&product.internal_code)
    .bind(&product.name)
    .bind(&product.description)
    .bind(product.current_unit_price)
    .bind(product.stock_quantity)
    .execute(ex)
    .await?;
    Ok(())
}

/// Flip the soft-delete flag; returns false when the product does not exist
pub async fn set_active(
    ex: impl PgExecutor<'_>,
    id: Uuid,
    active: bool,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE products SET is_active = $2 WHERE id = $1")
        .bind(id)
        .bind(active)
        .execute(ex)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Adjust stock by a signed delta (negative to reserve, positive to restock)
pub async fn adjust_stock(
    ex: impl PgExecutor<'_>,
    id: Uuid,
    delta: i32,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE products SET stock_quantity = stock_quantity + $2 WHERE id = $1")
        .bind(id)
        .bind(delta)
        .execute(ex)
        .await?;
    Ok(())
}

pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM products")
        .fetch_one(pool)
        .await
}
