//! # Authorization Guard
//!
//! Turns a bearer token into a [`Principal`] and enforces the role an
//! operation requires.
//!
//! ## Guard Steps
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  (a) token present?            no  ──► AuthError::MissingToken          │
//! │  (b) token resolves to a user? no  ──► AuthError::InvalidToken          │
//! │  (c) user.role == required?    no  ──► AuthError::WrongRole             │
//! │  (d) store-scoped only:                                                 │
//! │      user.storeId resolves?    no  ──► CoreError::StoreNotFound         │
//! │                                                                         │
//! │  The guard reads the snapshot and never mutates it.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Picking the token out of a request (header, body or query) is the API
//! layer's job; this module only sees the chosen string.

use tracing::warn;

use crate::error::{AuthError, CoreError, CoreResult};
use crate::token;
use crate::types::{Role, Snapshot, StoreId, User, UserId};

/// The authenticated caller of an operation.
///
/// A small `Copy` value, so callers can keep it while mutating the snapshot
/// the user was resolved from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub user_id: UserId,
    pub role: Role,
    pub store_id: Option<StoreId>,
}

impl From<&User> for Principal {
    fn from(user: &User) -> Self {
        Principal {
            user_id: user.id,
            role: user.role,
            store_id: user.store_id,
        }
    }
}

/// Resolves `token` and requires the resolved user to hold `required`.
pub fn authorize(snapshot: &Snapshot, token: Option<&str>, required: Role) -> Result<Principal, AuthError> {
    let token = token
        .filter(|t| !t.trim().is_empty())
        .ok_or(AuthError::MissingToken)?;

    let user = token::resolve(token, &snapshot.users).ok_or_else(|| {
        warn!(%required, "rejected token that resolves to no user");
        AuthError::InvalidToken
    })?;

    if user.role != required {
        warn!(user_id = user.id, actual = %user.role, %required, "rejected caller with wrong role");
        return Err(AuthError::WrongRole {
            required,
            actual: user.role,
        });
    }

    Ok(Principal::from(user))
}

/// Returns the id of the Store administered by `principal`.
///
/// The store must still exist in this snapshot.
pub fn owned_store(snapshot: &Snapshot, principal: &Principal) -> CoreResult<StoreId> {
    principal
        .store_id
        .filter(|id| snapshot.store(*id).is_some())
        .ok_or(CoreError::StoreNotFound(principal.store_id))
}

// =============================================================================
// Unit Tests
// =============================================================================
