//! Customer Model

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Customer entity
///
/// `name` is the lookup key used by implicit customer creation during
/// checkout; it is not declared unique in storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Customer {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone_number: Option<String>,
}
