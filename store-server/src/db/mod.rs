//! Database access layer
//!
//! One module of plain query functions per table. Functions that must be
//! able to join an open transaction take `impl PgExecutor`; the rest take
//! the pool.

pub mod customers;
pub mod orders;
pub mod products;
pub mod users;
