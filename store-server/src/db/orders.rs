use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use crate::orders::pricing::PricedLine;

/// Order header joined with the customer display name (resolved at read time)
#[derive(Debug, sqlx::FromRow)]
pub struct OrderRow {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub customer_name: String,
    pub shipping_address: String,
    pub billing_address: String,
    pub status: String,
    pub total_amount: Decimal,
}

/// Order line with the snapshot values captured at creation
#[derive(Debug, sqlx::FromRow)]
pub struct OrderItemRow {
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: i32,
    pub subtotal: Decimal,
}

const ORDER_SELECT: &str = "SELECT o.id, o.customer_id, c.name AS customer_name, \
     o.shipping_address, o.billing_address, o.status, o.total_amount \
     FROM orders o JOIN customers c ON c.id = o.customer_id";

#[allow(clippy::too_many_arguments)]
pub async fn insert_order(
    ex: impl PgExecutor<'_>,
    id: Uuid,
    customer_id: Uuid,
    shipping_address: &str,
    billing_address: &str,
    status: &str,
    order_date: DateTime<Utc>,
    total_amount: Decimal,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO orders (id, customer_id, shipping_address, billing_address, status, order_date, total_amount)
         VALUES ($1, $2, $3, $4, $5, $6, $7)",
    )
    .bind(id)
    .bind(customer_id)
    .bind(shipping_address)
    .bind(billing_address)
    .bind(status)
    .bind(order_date)
    .bind(total_amount)
    .execute(ex)
    .await?;
    Ok(())
}

pub async fn insert_item(
    ex: impl PgExecutor<'_>,
    id: Uuid,
    order_id: Uuid,
    line: &PricedLine,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO order_items (id, order_id, product_id, name, description, quantity, unit_price, subtotal)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
    )
    .bind(id)
    .bind(order_id)
    .bind(line.product_id)
    .bind(&line.name)
    .bind(&line.description)
    .bind(line.quantity)
    .bind(line.unit_price)
    .bind(line.subtotal)
    .execute(ex)
    .await?;
    Ok(())
}

pub async fn find_by_id(
    ex: impl PgExecutor<'_>,
    id: Uuid,
) -> Result<Option<OrderRow>, sqlx::Error> {
    sqlx::query_as(&format!("{ORDER_SELECT} WHERE o.id = $1"))
        .bind(id)
        .fetch_optional(ex)
        .await
}

pub async fn set_status(
    ex: impl PgExecutor<'_>,
    id: Uuid,
    status: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE orders SET status = $2 WHERE id = $1")
        .bind(id)
        .bind(status)
        .execute(ex)
        .await?;
    Ok(())
}

pub async fn items_for_order(
    ex: impl PgExecutor<'_>,
    order_id: Uuid,
) -> Result<Vec<OrderItemRow>, sqlx::Error> {
    sqlx::query_as(
        "SELECT order_id, product_id, name, unit_price, quantity, subtotal
         FROM order_items WHERE order_id = $1 ORDER BY id",
    )
    .bind(order_id)
    .fetch_all(ex)
    .await
}

pub async fn items_for_orders(
    pool: &PgPool,
    order_ids: &[Uuid],
) -> Result<Vec<OrderItemRow>, sqlx::Error> {
    sqlx::query_as(
        "SELECT order_id, product_id, name, unit_price, quantity, subtotal
         FROM order_items WHERE order_id = ANY($1) ORDER BY id",
    )
    .bind(order_ids)
    .fetch_all(pool)
    .await
}

/// Size of the filtered set, independent of pagination
pub async fn count_filtered(
    pool: &PgPool,
    status: Option<&str>,
    customer_id: Option<Uuid>,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT COUNT(*) FROM orders o
         WHERE ($1::text IS NULL OR o.status = $1)
           AND ($2::uuid IS NULL OR o.customer_id = $2)",
    )
    .bind(status)
    .bind(customer_id)
    .fetch_one(pool)
    .await
}

/// One page of the filtered set, oldest orders first
pub async fn list_filtered(
    pool: &PgPool,
    status: Option<&str>,
    customer_id: Option<Uuid>,
    limit: i64,
    offset: i64,
) -> Result<Vec<OrderRow>, sqlx::Error> {
    sqlx::query_as(&format!(
        "{ORDER_SELECT}
         WHERE ($1::text IS NULL OR o.status = $1)
           AND ($2::uuid IS NULL OR o.customer_id = $2)
         ORDER BY o.order_date ASC
         LIMIT $3 OFFSET $4"
    ))
    .bind(status)
    .bind(customer_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}
