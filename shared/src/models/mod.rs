//! Wire models shared between the server and API clients

pub mod customer;
pub mod order;
pub mod product;

pub use customer::Customer;
pub use order::{
    OrderCreate, OrderItemCreate, OrderItemSummary, OrderPage, OrderStatus, OrderSummary,
    UpdateOrderStatus,
};
pub use product::{Product, ProductCreate, ProductUpdate};
