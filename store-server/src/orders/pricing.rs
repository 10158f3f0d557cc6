//! Pure validation and pricing for order creation
//!
//! The arithmetic and rule checks of checkout, separated from storage so
//! the invariants are testable without a database: request validation is
//! fail-fast (first violation wins), line subtotals are exact decimal
//! products, and snapshots are taken by value so later product edits never
//! touch historical orders.

use rust_decimal::Decimal;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{OrderItemCreate, Product};
use uuid::Uuid;

/// One order line, priced and snapshotted against the product row as held
/// under lock during the creation transaction
#[derive(Debug, Clone)]
pub struct PricedLine {
    pub product_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub unit_price: Decimal,
    pub quantity: i32,
    pub subtotal: Decimal,
}

/// Request-shape validation, before any product is looked up.
///
/// Order of checks is observable through which error surfaces first:
/// emptiness, then per-item quantity in request order.
pub fn validate_items(items: &[OrderItemCreate]) -> AppResult<()> {
    if items.is_empty() {
        return Err(AppError::new(ErrorCode::OrderEmpty));
    }
    for item in items {
        if item.quantity <= 0 {
            return Err(AppError::with_message(
                ErrorCode::QuantityNotPositive,
                format!(
                    "quantity for product {} must be greater than zero",
                    item.product_id
                ),
            ));
        }
    }
    Ok(())
}

/// Price one line: check stock, snapshot the product, compute the subtotal.
///
/// Callers pass a product already filtered to `is_active` and already
/// locked; quantity has been validated positive by [`validate_items`].
pub fn price_line(product: &Product, quantity: i32) -> AppResult<PricedLine> {
    if quantity > product.stock_quantity {
        return Err(AppError::new(ErrorCode::InsufficientStock));
    }

    let subtotal = product.current_unit_price * Decimal::from(quantity);

    Ok(PricedLine {
        product_id: product.id,
        name: product.name.clone(),
        description: product.description.clone(),
        unit_price: product.current_unit_price,
        quantity,
        subtotal,
    })
}

/// Order total: the sum of line subtotals, nothing else
pub fn order_total(lines: &[PricedLine]) -> Decimal {
    lines.iter().map(|l| l.subtotal).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(price: Decimal, stock: i32) -> Product {
        Product {
            id: Uuid::new_v4(),
            sku: "SKU-001".to_string(),
            internal_code: None,
            name: "Keyboard".to_string(),
            description: Some("Mechanical keyboard".to_string()),
            current_unit_price: price,
            stock_quantity: stock,
            is_active: true,
        }
    }

    #[test]
    fn test_empty_order_rejected() {
        let err = validate_items(&[]).unwrap_err();
        assert_eq!(err.code, ErrorCode::OrderEmpty);
        assert_eq!(err.message, "order must contain at least one item");
    }

    #[test]
    fn test_non_positive_quantity_rejected() {
        let id = Uuid::new_v4();
        let items = [
            OrderItemCreate {
                product_id: Uuid::new_v4(),
                quantity: 1,
            },
            OrderItemCreate {
                product_id: id,
                quantity: 0,
            },
        ];

        let err = validate_items(&items).unwrap_err();
        assert_eq!(err.code, ErrorCode::QuantityNotPositive);
        assert_eq!(
            err.message,
            format!("quantity for product {id} must be greater than zero")
        );
    }

    /// Emptiness is checked before quantities; among quantities, request
    /// order decides which violation surfaces.
    #[test]
    fn test_first_violation_wins() {
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        let items = [
            OrderItemCreate {
                product_id: first,
                quantity: -1,
            },
            OrderItemCreate {
                product_id: second,
                quantity: 0,
            },
        ];

        let err = validate_items(&items).unwrap_err();
        assert!(err.message.contains(&first.to_string()));
    }

    #[test]
    fn test_price_line_within_stock() {
        // stock 5, quantity 3: subtotal 3 x 10.50
        let p = product(Decimal::new(1050, 2), 5);
        let line = price_line(&p, 3).unwrap();

        assert_eq!(line.quantity, 3);
        assert_eq!(line.unit_price, Decimal::new(1050, 2));
        assert_eq!(line.subtotal, Decimal::new(3150, 2));
        assert_eq!(line.name, "Keyboard");
        assert_eq!(line.description.as_deref(), Some("Mechanical keyboard"));
    }

    #[test]
    fn test_price_line_exact_stock_boundary() {
        let p = product(Decimal::new(999, 2), 3);
        assert!(price_line(&p, 3).is_ok());

        let err = price_line(&p, 4).unwrap_err();
        assert_eq!(err.code, ErrorCode::InsufficientStock);
        assert_eq!(err.message, "insufficient stock for product");
    }

    #[test]
    fn test_subtotal_is_exact_decimal() {
        // 0.10 x 3 must be exactly 0.30
        let p = product(Decimal::new(10, 2), 100);
        let line = price_line(&p, 3).unwrap();
        assert_eq!(line.subtotal, Decimal::new(30, 2));
    }

    #[test]
    fn test_order_total_is_sum_of_subtotals() {
        let p1 = product(Decimal::new(1050, 2), 10);
        let p2 = product(Decimal::new(250, 2), 10);

        let lines = [price_line(&p1, 2).unwrap(), price_line(&p2, 3).unwrap()];
        // 2 x 10.50 + 3 x 2.50 = 28.50
        assert_eq!(order_total(&lines), Decimal::new(2850, 2));
    }

    #[test]
    fn test_order_total_empty() {
        assert_eq!(order_total(&[]), Decimal::ZERO);
    }
}
