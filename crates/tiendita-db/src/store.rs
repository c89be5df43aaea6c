//! # Snapshot Store
//!
//! Load, mutate and save the snapshot document, one transaction at a time.
//!
//! ## Transaction Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      SnapshotStore::transact                            │
//! │                                                                         │
//! │  request A ──┐                                                          │
//! │  request B ──┼──► Mutex ──► load(db.json) ──► f(&mut snapshot)          │
//! │  request C ──┘   (one at       │                   │                    │
//! │                  a time)       │              Ok ──┼──► save ──► Ok(T)  │
//! │                                │             Err ──┴──► Err(E)          │
//! │                                │                  (file untouched)      │
//! │                     missing? ──┴──► seed snapshot, saved                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Reads take the same lock, so a reader never sees a transaction's
//! snapshot before it has been saved in full.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tiendita_core::Snapshot;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::seed::seed_snapshot;

// =============================================================================
// Configuration
// =============================================================================

/// Persistent Store configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = StoreConfig::new("./data/db.json").pretty(false);
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Path to the snapshot document. Created (with its parent directories)
    /// on first load.
    pub path: PathBuf,

    /// Whether to indent the saved JSON.
    /// Default: true (the file is meant to be readable by hand)
    pub pretty: bool,
}

impl StoreConfig {
    /// Creates a configuration for the snapshot at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        StoreConfig {
            path: path.into(),
            pretty: true,
        }
    }

    /// Sets whether saved JSON is indented.
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

// =============================================================================
// SnapshotStore
// =============================================================================

/// Handle to the snapshot document. Cheap to clone; clones share the lock.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    config: Arc<StoreConfig>,
    lock: Arc<Mutex<()>>,
}

impl SnapshotStore {
    /// Opens the store, writing the seed snapshot if the file is missing.
    ///
    /// A file that exists but does not parse is reported as
    /// [`DbError::Corrupt`] here rather than on the first request.
    pub async fn open(config: StoreConfig) -> DbResult<Self> {
        info!(path = %config.path.display(), "opening snapshot store");

        let store = SnapshotStore {
            config: Arc::new(config),
            lock: Arc::new(Mutex::new(())),
        };

        let (users, stores, orders) = store
            .read(|s| (s.users.len(), s.stores.len(), s.orders.len()))
            .await?;
        info!(users, stores, orders, "snapshot store ready");
        Ok(store)
    }

    /// Path of the snapshot document.
    pub fn path(&self) -> &Path {
        &self.config.path
    }

    /// Runs `f` against a freshly loaded snapshot.
    pub async fn read<T>(&self, f: impl FnOnce(&Snapshot) -> T) -> DbResult<T> {
        let _guard = self.lock.lock().await;
        let snapshot = self.load().await?;
        Ok(f(&snapshot))
    }

    /// Runs one load–mutate–save cycle.
    ///
    /// The snapshot is saved only when `f` returns `Ok`. Storage failures
    /// are converted into the caller's error type.
    pub async fn transact<T, E>(&self, f: impl FnOnce(&mut Snapshot) -> Result<T, E>) -> Result<T, E>
    where
        E: From<DbError>,
    {
        let _guard = self.lock.lock().await;
        let mut snapshot = self.load().await?;
        let value = f(&mut snapshot)?;
        self.save(&snapshot).await?;
        Ok(value)
    }

    /// Overwrites the document with `snapshot`.
    pub async fn replace(&self, snapshot: &Snapshot) -> DbResult<()> {
        let _guard = self.lock.lock().await;
        self.save(snapshot).await
    }

    async fn load(&self) -> DbResult<Snapshot> {
        let path = &self.config.path;
        match tokio::fs::read(path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|source| DbError::Corrupt {
                path: path.clone(),
                source,
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "no snapshot found, writing seed");
                let seed = seed_snapshot();
                self.save(&seed).await?;
                Ok(seed)
            }
            Err(e) => Err(DbError::io(path, e)),
        }
    }

    async fn save(&self, snapshot: &Snapshot) -> DbResult<()> {
        let path = &self.config.path;
        let bytes = if self.config.pretty {
            serde_json::to_vec_pretty(snapshot)
        } else {
            serde_json::to_vec(snapshot)
        }
        .map_err(DbError::Serialize)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| DbError::io(parent, e))?;
        }

        let tmp = temp_path(path);
        tokio::fs::write(&tmp, &bytes)
            .await
            .map_err(|e| DbError::io(&tmp, e))?;
        tokio::fs::rename(&tmp, path)
            .await
            .map_err(|e| DbError::io(path, e))?;

        debug!(path = %path.display(), bytes = bytes.len(), "snapshot saved");
        Ok(())
    }
}

/// `db.json` → `db.json.tmp`, in the same directory so the rename is atomic.
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

// =============================================================================
// Unit Tests
// =============================================================================
