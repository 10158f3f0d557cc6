//! Product Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Product entity
///
/// `current_unit_price` and `stock_quantity` are mutated by catalog
/// updates; stock is additionally decremented by order creation. Deleting
/// a product only flips `is_active` (orders keep their own snapshots).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Product {
    pub id: Uuid,
    /// Stock keeping unit, unique across the catalog
    pub sku: String,
    pub internal_code: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub current_unit_price: Decimal,
    pub stock_quantity: i32,
    pub is_active: bool,
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub sku: String,
    pub internal_code: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub current_unit_price: Decimal,
    pub stock_quantity: i32,
}

/// Update product payload
///
/// Full replacement of the mutable fields; `is_active` is changed only
/// through the enable/disable endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub sku: String,
    pub internal_code: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub current_unit_price: Decimal,
    pub stock_quantity: i32,
}
