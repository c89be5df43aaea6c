//! # tiendita-core: Pure Marketplace Logic
//!
//! This crate is the **heart** of Tiendita. It holds the authorization scheme,
//! the relational data model and the order lifecycle as pure functions over an
//! in-memory [`Snapshot`].
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tiendita Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │          Front-ends (consumer / store / courier)                │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ HTTP/JSON                              │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    apps/api (axum)                              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ tiendita-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌──────────┐ ┌─────────┐ ┌────────┐  │   │
//! │  │   │  token  │ │  guard  │ │ accounts │ │ catalog │ │ orders │  │   │
//! │  │   └─────────┘ └─────────┘ └──────────┘ └─────────┘ └────────┘  │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌────────────┐                        │   │
//! │  │   │  types  │ │  money  │ │ validation │                        │   │
//! │  │   └─────────┘ └─────────┘ └────────────┘                        │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILES • NO CLOCKS • PURE FUNCTIONS               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 tiendita-db (Persistent Store)                  │   │
//! │  │         load → mutate (this crate) → save, one at a time        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Entities (User, Store, Product, Order) and the [`Snapshot`]
//! - [`money`] - Money in integer cents, serialized as decimals
//! - [`error`] - Domain error types
//! - [`validation`] - Boundary validation and lenient numeric coercion
//! - [`token`] - Session Token Codec
//! - [`guard`] - Authorization Guard
//! - [`accounts`] - Login and registration
//! - [`catalog`] - Store and product operations
//! - [`orders`] - Order Lifecycle Engine
//!
//! ## Example Usage
//!
//! ```rust
//! use tiendita_core::money::Money;
//!
//! let apple = Money::from_decimal(1.25).unwrap();
//! let banana = Money::from_decimal(0.9).unwrap();
//!
//! let total = apple.multiply_quantity(2).and_then(|line| line.checked_add(banana)).unwrap();
//! assert_eq!(total.cents(), 340);
//! assert_eq!(total.to_string(), "$3.40");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod accounts;
pub mod catalog;
pub mod error;
pub mod guard;
pub mod money;
pub mod orders;
pub mod token;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{AuthError, CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum quantity of a single line in an order.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
pub const MAX_ITEM_QUANTITY: u32 = 999;

/// Address given to the Store created alongside a store-role registration.
pub const DEFAULT_STORE_ADDRESS: &str = "Address to be defined";
