//! Order Model
//!
//! Order wire types and the order status state machine. Status strings on
//! the wire are SCREAMING_SNAKE_CASE and parsed case-insensitively through
//! [`OrderStatus::parse`]; comparisons elsewhere always go through the
//! parsed enum, never through ad hoc string uppercasing.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Order status lifecycle
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// All states, in lifecycle order
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    /// Canonical wire/storage representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Processing => "PROCESSING",
            Self::Shipped => "SHIPPED",
            Self::Delivered => "DELIVERED",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// Parse a status string, case-insensitively
    ///
    /// The single normalizing entry point for user-supplied status strings.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PENDING" => Some(Self::Pending),
            "PROCESSING" => Some(Self::Processing),
            "SHIPPED" => Some(Self::Shipped),
            "DELIVERED" => Some(Self::Delivered),
            "CANCELLED" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// States this status may move to
    ///
    /// DELIVERED may move back to PENDING, a data-correction escape hatch.
    /// CANCELLED is terminal.
    pub fn allowed_transitions(self) -> &'static [OrderStatus] {
        match self {
            Self::Pending => &[Self::Processing, Self::Cancelled, Self::Delivered],
            Self::Processing => &[Self::Shipped, Self::Cancelled, Self::Delivered],
            Self::Shipped => &[Self::Delivered],
            Self::Delivered => &[Self::Pending],
            Self::Cancelled => &[],
        }
    }

    /// Whether moving from `self` to `next` is allowed by the table
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        self.allowed_transitions().contains(&next)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order line item request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemCreate {
    pub product_id: Uuid,
    pub quantity: i32,
}

/// Create order payload
///
/// The purchaser is given either as a resolved `customer_id` or as a
/// `customer_name` to be looked up (and lazily created) before the order
/// engine runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    pub customer_id: Option<Uuid>,
    pub customer_name: Option<String>,
    pub shipping_address: String,
    pub billing_address: String,
    pub items: Vec<OrderItemCreate>,
}

/// Update order status payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateOrderStatus {
    pub new_status: String,
}

/// Order line in a summary, snapshot values as captured at creation time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemSummary {
    pub product_id: Uuid,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: i32,
    pub subtotal: Decimal,
}

/// Order summary returned by every order endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderSummary {
    pub id: Uuid,
    pub customer_id: Uuid,
    /// Display name resolved at read time, not snapshotted
    pub customer_name: String,
    pub shipping_address: String,
    pub billing_address: String,
    pub total_amount: Decimal,
    pub status: String,
    pub items: Vec<OrderItemSummary>,
}

/// One page of the filtered order listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderPage {
    pub orders: Vec<OrderSummary>,
    /// Size of the filtered set, independent of the returned slice
    pub total_count: i64,
    pub page_number: i64,
    pub page_size: i64,
    pub total_pages: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(OrderStatus::parse("PENDING"), Some(OrderStatus::Pending));
        assert_eq!(OrderStatus::parse("pending"), Some(OrderStatus::Pending));
        assert_eq!(OrderStatus::parse("Shipped"), Some(OrderStatus::Shipped));
        assert_eq!(
            OrderStatus::parse("  cancelled  "),
            Some(OrderStatus::Cancelled)
        );
        assert_eq!(OrderStatus::parse("delivered"), Some(OrderStatus::Delivered));
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert_eq!(OrderStatus::parse(""), None);
        assert_eq!(OrderStatus::parse("REFUNDED"), None);
        assert_eq!(OrderStatus::parse("PEND ING"), None);
    }

    #[test]
    fn test_display_roundtrip() {
        for status in OrderStatus::ALL {
            assert_eq!(OrderStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn test_serde_screaming_snake() {
        let json = serde_json::to_string(&OrderStatus::Processing).unwrap();
        assert_eq!(json, "\"PROCESSING\"");

        let status: OrderStatus = serde_json::from_str("\"CANCELLED\"").unwrap();
        assert_eq!(status, OrderStatus::Cancelled);
    }

    #[test]
    fn test_transition_table() {
        use OrderStatus::*;

        assert_eq!(Pending.allowed_transitions(), &[Processing, Cancelled, Delivered]);
        assert_eq!(
            Processing.allowed_transitions(),
            &[Shipped, Cancelled, Delivered]
        );
        assert_eq!(Shipped.allowed_transitions(), &[Delivered]);
        assert_eq!(Delivered.allowed_transitions(), &[Pending]);
        assert!(Cancelled.allowed_transitions().is_empty());
    }

    /// Every (from, to) pair either appears in the table and is allowed,
    /// or does not and is rejected; no other outcome exists.
    #[test]
    fn test_transition_closure() {
        use OrderStatus::*;

        let allowed: &[(OrderStatus, OrderStatus)] = &[
            (Pending, Processing),
            (Pending, Cancelled),
            (Pending, Delivered),
            (Processing, Shipped),
            (Processing, Cancelled),
            (Processing, Delivered),
            (Shipped, Delivered),
            (Delivered, Pending),
        ];

        for from in OrderStatus::ALL {
            for to in OrderStatus::ALL {
                let expected = allowed.contains(&(from, to));
                assert_eq!(
                    from.can_transition_to(to),
                    expected,
                    "{from} -> {to} expected {expected}"
                );
            }
        }
    }

    #[test]
    fn test_cancelled_is_terminal() {
        for to in OrderStatus::ALL {
            assert!(!OrderStatus::Cancelled.can_transition_to(to));
        }
    }
}
