//! Unified error codes for the storefront backend
//!
//! Error codes are shared between the server and API clients so that
//! failures can be matched on programmatically. They are organized by
//! category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Customer errors
//! - 4xxx: Order errors
//! - 5xxx: Product errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient
/// serialization and cross-language compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (username/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,
    /// Username is already registered
    UsernameTaken = 1005,
    /// Email is already registered
    EmailTaken = 1006,
    /// Unknown role requested at registration
    InvalidRole = 1007,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Admin role required
    AdminRequired = 2002,

    // ==================== 3xxx: Customer ====================
    /// Customer not found
    CustomerNotFound = 3001,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Order has no items
    OrderEmpty = 4002,
    /// Line quantity is zero or negative
    QuantityNotPositive = 4003,
    /// Requested status string is not a known status
    InvalidOrderStatus = 4004,
    /// Requested transition is not in the transition table
    InvalidStatusTransition = 4005,

    // ==================== 5xxx: Product ====================
    /// Product not found (or soft-deleted)
    ProductNotFound = 5001,
    /// Another product already uses this sku
    SkuAlreadyExists = 5002,
    /// Requested quantity exceeds current stock
    InsufficientStock = 5003,
    /// Unit price must be positive
    PriceNotPositive = 5004,
    /// Stock quantity must not be negative
    StockNegative = 5005,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9003,
}

impl ErrorCode {
    /// Get the numeric code value
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the default message for this error code
    pub fn message(&self) -> &'static str {
        match self {
            // General
            Self::Success => "Success",
            Self::Unknown => "Unknown error",
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::AlreadyExists => "Resource already exists",
            Self::InvalidRequest => "Invalid request",

            // Auth
            Self::NotAuthenticated => "Authentication required",
            Self::InvalidCredentials => "Invalid username or password",
            Self::TokenExpired => "Token expired",
            Self::TokenInvalid => "Invalid token",
            Self::UsernameTaken => "Username is already in use",
            Self::EmailTaken => "Email is already in use",
            Self::InvalidRole => "Role must be 'admin' or 'customer'",

            // Permission
            Self::PermissionDenied => "Permission denied",
            Self::AdminRequired => "Admin role required",

            // Customer
            Self::CustomerNotFound => "customer not found",

            // Order
            Self::OrderNotFound => "order not found",
            Self::OrderEmpty => "order must contain at least one item",
            Self::QuantityNotPositive => "quantity must be greater than zero",
            Self::InvalidOrderStatus => {
                "unknown order status; valid statuses: PENDING, PROCESSING, SHIPPED, DELIVERED, CANCELLED"
            }
            Self::InvalidStatusTransition => "invalid status transition",

            // Product
            Self::ProductNotFound => "product not found or inactive",
            Self::SkuAlreadyExists => "a product with this sku already exists",
            Self::InsufficientStock => "insufficient stock for product",
            Self::PriceNotPositive => "unit price must be greater than zero",
            Self::StockNegative => "stock quantity cannot be negative",

            // System
            Self::InternalError => "Internal server error",
            Self::DatabaseError => "Database error",
            Self::ConfigError => "Configuration error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when converting an unknown u16 into an [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Success),
            1 => Ok(Self::Unknown),
            2 => Ok(Self::ValidationFailed),
            3 => Ok(Self::NotFound),
            4 => Ok(Self::AlreadyExists),
            5 => Ok(Self::InvalidRequest),

            1001 => Ok(Self::NotAuthenticated),
            1002 => Ok(Self::InvalidCredentials),
            1003 => Ok(Self::TokenExpired),
            1004 => Ok(Self::TokenInvalid),
            1005 => Ok(Self::UsernameTaken),
            1006 => Ok(Self::EmailTaken),
            1007 => Ok(Self::InvalidRole),

            2001 => Ok(Self::PermissionDenied),
            2002 => Ok(Self::AdminRequired),

            3001 => Ok(Self::CustomerNotFound),

            4001 => Ok(Self::OrderNotFound),
            4002 => Ok(Self::OrderEmpty),
            4003 => Ok(Self::QuantityNotPositive),
            4004 => Ok(Self::InvalidOrderStatus),
            4005 => Ok(Self::InvalidStatusTransition),

            5001 => Ok(Self::ProductNotFound),
            5002 => Ok(Self::SkuAlreadyExists),
            5003 => Ok(Self::InsufficientStock),
            5004 => Ok(Self::PriceNotPositive),
            5005 => Ok(Self::StockNegative),

            9001 => Ok(Self::InternalError),
            9002 => Ok(Self::DatabaseError),
            9003 => Ok(Self::ConfigError),

            other => Err(InvalidErrorCode(other)),
        }
    }
}
