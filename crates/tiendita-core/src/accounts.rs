//! # Accounts
//!
//! Login and registration.
//!
//! Registration of a store-role user also opens (closed) a Store for them:
//! ownership is 1:1 and permanent.

use tracing::info;

use crate::error::{CoreError, CoreResult};
use crate::token;
use crate::types::{Role, Snapshot, Store, User};
use crate::validation::validate_required;
use crate::DEFAULT_STORE_ADDRESS;

/// Input for [`register`].
#[derive(Debug, Clone)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub name: String,
    pub role: Role,
}

/// Checks credentials and issues a token.
///
/// Email and password must match exactly. When `role` is given the user must
/// also hold that role, so a consumer front-end cannot log a courier in.
pub fn login<'a>(
    snapshot: &'a Snapshot,
    email: &str,
    password: &str,
    role: Option<Role>,
) -> CoreResult<(String, &'a User)> {
    let user = snapshot
        .users
        .iter()
        .find(|u| u.email == email && u.password == password && role.map_or(true, |r| u.role == r))
        .ok_or(CoreError::InvalidCredentials)?;

    Ok((token::issue(user), user))
}

/// Creates a user, and for the store role its Store.
///
/// Returns the created user.
pub fn register(snapshot: &mut Snapshot, registration: Registration) -> CoreResult<User> {
    let Registration {
        email,
        password,
        name,
        role,
    } = registration;

    validate_required("email", &email)?;
    validate_required("password", &password)?;
    validate_required("name", &name)?;

    if snapshot.users.iter().any(|u| u.email == email) {
        return Err(CoreError::EmailTaken(email));
    }

    let user_id = snapshot.next_user_id()?;
    let store_id = if role == Role::Store {
        let store = Store {
            id: snapshot.next_store_id()?,
            name: format!("{name}'s Store"),
            address: DEFAULT_STORE_ADDRESS.to_string(),
            is_open: false,
        };
        let id = store.id;
        snapshot.stores.push(store);
        Some(id)
    } else {
        None
    };

    let user = User {
        id: user_id,
        email,
        password,
        name,
        role,
        store_id,
    };
    snapshot.users.push(user.clone());

    info!(user_id = user.id, role = %user.role, store_id = ?user.store_id, "user registered");
    Ok(user)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn registration(email: &str, name: &str, role: Role) -> Registration {
        Registration {
            email: email.to_string(),
            password: "secret".to_string(),
            name: name.to_string(),
            role,
        }
    }

    fn snapshot_with_alice() -> Snapshot {
        let mut snapshot = Snapshot::default();
        register(
            &mut snapshot,
            Registration {
                email: "alice@demo.com".to_string(),
                password: "1234".to_string(),
                name: "Alice".to_string(),
                role: Role::Consumer,
            },
        )
        .unwrap();
        snapshot
    }

    #[test]
    fn test_login_issues_resolvable_token() {
        let snapshot = snapshot_with_alice();
        let (token, user) = login(&snapshot, "alice@demo.com", "1234", None).unwrap();
        assert_eq!(token::resolve(&token, &snapshot.users), Some(user));
    }

    #[test]
    fn test_login_role_filter() {
        let snapshot = snapshot_with_alice();
        assert!(login(&snapshot, "alice@demo.com", "1234", Some(Role::Consumer)).is_ok());
        assert!(matches!(
            login(&snapshot, "alice@demo.com", "1234", Some(Role::Courier)),
            Err(CoreError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_login_rejects_wrong_password() {
        let snapshot = snapshot_with_alice();
        assert!(matches!(
            login(&snapshot, "alice@demo.com", "12345", None),
            Err(CoreError::InvalidCredentials)
        ));
        assert!(login(&snapshot, "nobody@demo.com", "1234", None).is_err());
    }

    #[test]
    fn test_register_store_user_opens_closed_store() {
        let mut snapshot = snapshot_with_alice();
        let bob = register(&mut snapshot, registration("bob@demo.com", "Bob", Role::Store)).unwrap();

        assert_eq!(bob.id, 2);
        let store_id = bob.store_id.unwrap();
        let store = snapshot.store(store_id).unwrap();
        assert_eq!(store.name, "Bob's Store");
        assert_eq!(store.address, DEFAULT_STORE_ADDRESS);
        assert!(!store.is_open);
    }

    #[test]
    fn test_register_non_store_roles_get_no_store() {
        let mut snapshot = Snapshot::default();
        let rider = register(&mut snapshot, registration("r@demo.com", "Rick", Role::Courier)).unwrap();
        assert_eq!(rider.store_id, None);
        assert!(snapshot.stores.is_empty());
    }

    #[test]
    fn test_email_is_unique_across_roles() {
        let mut snapshot = snapshot_with_alice();
        let result = register(&mut snapshot, registration("alice@demo.com", "Other", Role::Courier));
        assert!(matches!(result, Err(CoreError::EmailTaken(_))));
        assert_eq!(snapshot.users.len(), 1);
    }

    #[test]
    fn test_register_requires_fields() {
        let mut snapshot = Snapshot::default();
        let result = register(&mut snapshot, registration("", "Bob", Role::Store));
        assert!(matches!(result, Err(CoreError::Validation(_))));
        assert!(snapshot.stores.is_empty());
    }
}
