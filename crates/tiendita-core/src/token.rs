//! # Session Token Codec
//!
//! Stateless bearer tokens: standard base64 of `"{id}:{role}"`.
//!
//! ```text
//! issue(User { id: 3, role: courier })  ──►  "Mzpjb3VyaWVy"
//! resolve("Mzpjb3VyaWVy", users)         ──►  Some(&User { id: 3, .. })
//! ```
//!
//! There is no signature, no expiry and no server-side session table. Anyone
//! who can spell a valid `(id, role)` pair is treated as that user. This is
//! the accepted weakness of the scheme the front-ends were built against.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::types::{Role, User, UserId};

/// Encodes a user's identity into a bearer token.
///
/// Deterministic: the same user always gets the same token.
pub fn issue(user: &User) -> String {
    STANDARD.encode(format!("{}:{}", user.id, user.role))
}

/// Decodes a token into its `(id, role)` claim without looking anything up.
///
/// Splits on the first `:`; the remainder must be exactly a role name.
pub fn decode(token: &str) -> Option<(UserId, Role)> {
    let bytes = STANDARD.decode(token.trim()).ok()?;
    let text = String::from_utf8(bytes).ok()?;
    let (id, role) = text.split_once(':')?;
    Some((id.parse().ok()?, role.parse().ok()?))
}

/// Resolves a token to the user whose id and role both match.
///
/// Any decode failure or lookup miss yields `None`.
pub fn resolve<'a>(token: &str, users: &'a [User]) -> Option<&'a User> {
    let (id, role) = decode(token)?;
    users.iter().find(|u| u.id == id && u.role == role)
}

// =============================================================================
// Unit Tests
// =============================================================================
