//! Shared types for the storefront backend
//!
//! Common types used by the server and by API clients: wire models,
//! the order status machine, and the unified error/response system.

pub mod error;
pub mod models;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};
