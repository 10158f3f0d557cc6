//! Order Engine
//!
//! The order lifecycle core: the atomic creation transaction (validate,
//! lock and decrement stock, snapshot lines, persist order + items), the
//! status transition handler, and the filtered/paginated queries. HTTP
//! concerns stay in `api::orders`; this module only sees resolved ids and
//! payloads.

pub mod pricing;

use std::collections::HashMap;

use chrono::Utc;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{OrderItemCreate, OrderItemSummary, OrderPage, OrderStatus, OrderSummary};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db;
use crate::db::orders::{OrderItemRow, OrderRow};

/// Filter and pagination parameters for the order listing
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    pub status: Option<String>,
    pub customer_id: Option<Uuid>,
    pub page_number: i64,
    pub page_size: i64,
}

const MAX_PAGE_SIZE: i64 = 100;

fn db_error(e: sqlx::Error) -> AppError {
    tracing::error!("order store error: {e}");
    AppError::new(ErrorCode::DatabaseError)
}

/// Create an order for an already-resolved customer.
///
/// Everything from the customer check to the final insert runs in one
/// transaction: a failure on any line (missing/inactive product,
/// insufficient stock) rolls back every prior stock decrement, so no
/// partial order can ever be observed. Each product row is locked before
/// its stock check.
pub async fn create_order(
    pool: &PgPool,
    customer_id: Uuid,
    shipping_address: &str,
    billing_address: &str,
    items: &[OrderItemCreate],
) -> AppResult<OrderSummary> {
    pricing::validate_items(items)?;

    let mut tx = pool.begin().await.map_err(db_error)?;

    let customer = db::customers::find_by_id(&mut *tx, customer_id)
        .await
        .map_err(db_error)?
        .ok_or_else(|| AppError::new(ErrorCode::CustomerNotFound))?;

    let mut lines = Vec::with_capacity(items.len());
    for item in items {
        let product = db::products::find_active_for_update(&mut *tx, item.product_id)
            .await
            .map_err(db_error)?
            .ok_or_else(|| AppError::new(ErrorCode::ProductNotFound))?;

        let line = pricing::price_line(&product, item.quantity)?;
        db::products::adjust_stock(&mut *tx, product.id, -item.quantity)
            .await
            .map_err(db_error)?;
        lines.push(line);
    }

    let total_amount = pricing::order_total(&lines);
    let order_id = Uuid::new_v4();
    let status = OrderStatus::Pending;

    db::orders::insert_order(
        &mut *tx,
        order_id,
        customer_id,
        shipping_address,
        billing_address,
        status.as_str(),
        Utc::now(),
        total_amount,
    )
    .await
    .map_err(db_error)?;

    for line in &lines {
        db::orders::insert_item(&mut *tx, Uuid::new_v4(), order_id, line)
            .await
            .map_err(db_error)?;
    }

    tx.commit().await.map_err(db_error)?;

    tracing::info!(
        order_id = %order_id,
        customer_id = %customer_id,
        total = %total_amount,
        "order created"
    );

    Ok(OrderSummary {
        id: order_id,
        customer_id,
        customer_name: customer.name,
        shipping_address: shipping_address.to_string(),
        billing_address: billing_address.to_string(),
        total_amount,
        status: status.to_string(),
        items: lines
            .into_iter()
            .map(|l| OrderItemSummary {
                product_id: l.product_id,
                name: l.name,
                unit_price: l.unit_price,
                quantity: l.quantity,
                subtotal: l.subtotal,
            })
            .collect(),
    })
}

/// Pure transition check: parse the requested status, consult the table.
pub fn apply_transition(current: OrderStatus, requested: &str) -> AppResult<OrderStatus> {
    let next =
        OrderStatus::parse(requested).ok_or_else(|| AppError::new(ErrorCode::InvalidOrderStatus))?;

    if !current.can_transition_to(next) {
        return Err(AppError::with_message(
            ErrorCode::InvalidStatusTransition,
            format!("invalid status transition: {current} → {next}"),
        ));
    }

    Ok(next)
}

/// Move an order along the status graph.
///
/// No side effects on stock or totals, unless the restock seam is enabled:
/// then a transition into CANCELLED returns each line's quantity to its
/// product inside the same transaction.
pub async fn update_status(
    pool: &PgPool,
    order_id: Uuid,
    requested: &str,
    restock_on_cancel: bool,
) -> AppResult<OrderSummary> {
    let mut tx = pool.begin().await.map_err(db_error)?;

    let order = db::orders::find_by_id(&mut *tx, order_id)
        .await
        .map_err(db_error)?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))?;

    // Stored statuses are canonical; failure to parse is data corruption
    let current = OrderStatus::parse(&order.status).ok_or_else(|| {
        tracing::error!(order_id = %order_id, status = %order.status, "unparseable stored status");
        AppError::new(ErrorCode::InternalError)
    })?;

    let next = apply_transition(current, requested)?;

    db::orders::set_status(&mut *tx, order_id, next.as_str())
        .await
        .map_err(db_error)?;

    if next == OrderStatus::Cancelled && restock_on_cancel {
        let items = db::orders::items_for_order(&mut *tx, order_id)
            .await
            .map_err(db_error)?;
        for item in &items {
            db::products::adjust_stock(&mut *tx, item.product_id, item.quantity)
                .await
                .map_err(db_error)?;
        }
        tracing::info!(order_id = %order_id, lines = items.len(), "stock restored on cancellation");
    }

    tx.commit().await.map_err(db_error)?;

    tracing::info!(order_id = %order_id, from = %current, to = %next, "order status updated");

    get_order(pool, order_id).await
}

/// Fetch one order as a summary, customer name resolved at read time
pub async fn get_order(pool: &PgPool, order_id: Uuid) -> AppResult<OrderSummary> {
    let order = db::orders::find_by_id(pool, order_id)
        .await
        .map_err(db_error)?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))?;

    let items = db::orders::items_for_order(pool, order_id)
        .await
        .map_err(db_error)?;

    Ok(summarize(order, items))
}

/// Filtered, paginated order listing, oldest first
pub async fn list_orders(pool: &PgPool, filter: &OrderFilter) -> AppResult<OrderPage> {
    // Validate the status filter against the enumeration
    let status = match filter.status.as_deref() {
        Some(s) if !s.trim().is_empty() => Some(
            OrderStatus::parse(s).ok_or_else(|| AppError::new(ErrorCode::InvalidOrderStatus))?,
        ),
        _ => None,
    };

    // A bad customer filter is a business-rule error, not a 404
    if let Some(customer_id) = filter.customer_id {
        let exists = db::customers::exists(pool, customer_id)
            .await
            .map_err(db_error)?;
        if !exists {
            return Err(AppError::validation("customer not found"));
        }
    }

    let page_size = filter.page_size.clamp(1, MAX_PAGE_SIZE);
    let page_number = filter.page_number.max(1);
    let status_str = status.map(|s| s.as_str());

    let total_count = db::orders::count_filtered(pool, status_str, filter.customer_id)
        .await
        .map_err(db_error)?;

    let rows = db::orders::list_filtered(
        pool,
        status_str,
        filter.customer_id,
        page_size,
        (page_number - 1) * page_size,
    )
    .await
    .map_err(db_error)?;

    let order_ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
    let mut items_by_order: HashMap<Uuid, Vec<OrderItemRow>> = HashMap::new();
    if !order_ids.is_empty() {
        for item in db::orders::items_for_orders(pool, &order_ids)
            .await
            .map_err(db_error)?
        {
            items_by_order.entry(item.order_id).or_default().push(item);
        }
    }

    let orders = rows
        .into_iter()
        .map(|row| {
            let items = items_by_order.remove(&row.id).unwrap_or_default();
            summarize(row, items)
        })
        .collect();

    Ok(OrderPage {
        orders,
        total_count,
        page_number,
        page_size,
        total_pages: total_pages(total_count, page_size),
    })
}

/// `ceil(total_count / page_size)` over the filtered set
fn total_pages(total_count: i64, page_size: i64) -> i64 {
    if total_count == 0 {
        0
    } else {
        (total_count + page_size - 1) / page_size
    }
}

fn summarize(order: OrderRow, items: Vec<OrderItemRow>) -> OrderSummary {
    OrderSummary {
        id: order.id,
        customer_id: order.customer_id,
        customer_name: order.customer_name,
        shipping_address: order.shipping_address,
        billing_address: order.billing_address,
        total_amount: order.total_amount,
        status: order.status,
        items: items
            .into_iter()
            .map(|item| OrderItemSummary {
                product_id: item.product_id,
                name: item.name,
                unit_price: item.unit_price,
                quantity: item.quantity,
                subtotal: item.subtotal,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_transition_valid() {
        assert_eq!(
            apply_transition(OrderStatus::Pending, "PROCESSING").unwrap(),
            OrderStatus::Processing
        );
        assert_eq!(
            apply_transition(OrderStatus::Shipped, "delivered").unwrap(),
            OrderStatus::Delivered
        );
        // The preserved data-correction edge
        assert_eq!(
            apply_transition(OrderStatus::Delivered, "Pending").unwrap(),
            OrderStatus::Pending
        );
    }

    #[test]
    fn test_apply_transition_unknown_status() {
        let err = apply_transition(OrderStatus::Pending, "REFUNDED").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidOrderStatus);
    }

    #[test]
    fn test_apply_transition_invalid_edge() {
        let err = apply_transition(OrderStatus::Pending, "SHIPPED").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStatusTransition);
        assert_eq!(err.message, "invalid status transition: PENDING → SHIPPED");
    }

    #[test]
    fn test_apply_transition_cancelled_terminal() {
        for requested in ["PENDING", "PROCESSING", "SHIPPED", "DELIVERED", "CANCELLED"] {
            let err = apply_transition(OrderStatus::Cancelled, requested).unwrap_err();
            assert_eq!(err.code, ErrorCode::InvalidStatusTransition);
        }
    }

    /// Every pair in the table succeeds; every pair outside it fails.
    #[test]
    fn test_apply_transition_matches_table() {
        for from in OrderStatus::ALL {
            for to in OrderStatus::ALL {
                let result = apply_transition(from, to.as_str());
                if from.can_transition_to(to) {
                    assert_eq!(result.unwrap(), to);
                } else {
                    assert_eq!(result.unwrap_err().code, ErrorCode::InvalidStatusTransition);
                }
            }
        }
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(23, 10), 3);
        assert_eq!(total_pages(23, 23), 1);
        assert_eq!(total_pages(23, 1), 23);
    }
}
