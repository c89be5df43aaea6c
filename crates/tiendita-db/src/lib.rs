//! # tiendita-db: Persistent Store for Tiendita
//!
//! Durable storage of the whole marketplace as one JSON document.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tiendita Data Flow                               │
//! │                                                                         │
//! │  HTTP handler (POST /api/orders)                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   tiendita-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────────┐    ┌────────────────┐    ┌─────────────┐  │   │
//! │  │   │ SnapshotStore  │    │ transact(|s|)  │    │    seed     │  │   │
//! │  │   │  (store.rs)    │───►│ load → f → save│    │  (seed.rs)  │  │   │
//! │  │   │  one Mutex     │    │ read(|s|)      │    │ first load  │  │   │
//! │  │   └────────────────┘    └───────┬────────┘    └─────────────┘  │   │
//! │  │                                 │ f = tiendita-core operation   │   │
//! │  └─────────────────────────────────┼───────────────────────────────┘   │
//! │                                    ▼                                    │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │   db.json  { users, stores, products, orders, sequences }       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - [`SnapshotStore`] and its configuration
//! - [`seed`] - The fixed snapshot written on first load
//! - [`error`] - Persistent Store error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tiendita_db::{SnapshotStore, StoreConfig};
//!
//! let store = SnapshotStore::open(StoreConfig::new("db.json")).await?;
//! let stores = store.read(|s| s.stores.clone()).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod seed;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use seed::seed_snapshot;
pub use store::{SnapshotStore, StoreConfig};
