//! # Persistent Store Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / serde_json::Error                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbError (this module) ← Adds the file path and categorization         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (in apps/api) ← 500 with a generic message, detail logged    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Persistent Store errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// The snapshot file could not be read, written or renamed.
    ///
    /// ## When This Occurs
    /// - File permissions issue
    /// - Disk full
    /// - Parent directory cannot be created
    #[error("snapshot I/O failed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file exists but is not a valid snapshot document.
    ///
    /// ## When This Occurs
    /// - Hand-edited file with a syntax error
    /// - A field holding the wrong JSON type
    #[error("snapshot at {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The in-memory snapshot could not be encoded.
    #[error("failed to serialize snapshot: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl DbError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DbError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for Persistent Store operations.
pub type DbResult<T> = Result<T, DbError>;
