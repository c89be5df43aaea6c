//! # Error Types
//!
//! Domain-specific error types for tiendita-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tiendita-core errors (this file)                                      │
//! │  ├── AuthError        - Token/role failures (Authorization Guard)      │
//! │  ├── CoreError        - Catalog and order rule violations              │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  tiendita-db errors (separate crate)                                   │
//! │  └── DbError          - Snapshot file failures                         │
//! │                                                                         │
//! │  API errors (in app)                                                   │
//! │  └── ApiError         - What front-ends see: {"message": ...}          │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → HTTP status + body     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The `Display` text of each variant is the message the front-ends show to
//! the end user, so it stays short and free of internal detail.

use thiserror::Error;

use crate::types::{OrderId, OrderStatus, Role, StoreId};

// =============================================================================
// Auth Error
// =============================================================================

/// Failures of the Authorization Guard.
///
/// Every variant surfaces as HTTP 403. The distinction only matters for logs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No bearer token in the header, body or query.
    #[error("unauthorized")]
    MissingToken,

    /// Token did not decode, or decoded to no existing `(id, role)` pair.
    #[error("unauthorized")]
    InvalidToken,

    /// Token resolved to a user of another role.
    #[error("unauthorized")]
    WrongRole { required: Role, actual: Role },
}

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations. The API layer maps them
/// to status codes; nothing here knows about HTTP.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Store id does not resolve (including a store user whose `storeId`
    /// points nowhere).
    #[error("store not found")]
    StoreNotFound(Option<StoreId>),

    /// Order id does not resolve.
    #[error("order not found")]
    OrderNotFound(OrderId),

    /// Order creation against a missing or closed Store.
    #[error("store unavailable")]
    StoreUnavailable(StoreId),

    /// Order is not in a state that allows the requested transition.
    ///
    /// ## When This Occurs
    /// - A courier accepts an order that is already `accepted`
    /// - A second courier races the first and loses
    #[error("not available")]
    OrderNotAvailable {
        order_id: OrderId,
        status: OrderStatus,
    },

    /// Login with an unknown email, wrong password or mismatched role.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Registration with an email already used by any user, of any role.
    #[error("user already exists")]
    EmailTaken(String),

    /// Validation error (wraps ValidationError).
    #[error("{0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when request input doesn't meet requirements.
/// Raised at the boundary, before catalog or order logic runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Invalid format (e.g., a quantity that is not a whole number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// A computed value no longer fits its integer type.
    ///
    /// ## When This Occurs
    /// - An order total exceeds what `Money` can hold
    /// - An id counter in a hand-edited snapshot is already at `u32::MAX`
    #[error("{field} is too large")]
    Overflow { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
