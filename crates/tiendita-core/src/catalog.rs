//! # Catalog Service
//!
//! Store and product operations.
//!
//! ## Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Read (anyone)                   Write (store-role, own store only)    │
//! │  ─────────────                   ───────────────────────────────────   │
//! │  list_stores()                   toggle_store_open(isOpen)             │
//! │  store_detail(id)                update_store_info(name?, address?)    │
//! │  store_products(id)              create_product(name, price)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Writes never take a store id from the caller: the target is always the
//! Store named by the principal's `storeId`.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::guard::{owned_store, Principal};
use crate::money::Money;
use crate::types::{Product, Snapshot, Store, StoreId};
use crate::validation::{validate_price, validate_required};

/// A Store together with its products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StoreDetail {
    pub store: Store,
    pub products: Vec<Product>,
}

/// Input for [`create_product`].
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    /// Already coerced to a number; `None` when the input was not numeric.
    pub price: Option<f64>,
}

/// All stores, open or not.
pub fn list_stores(snapshot: &Snapshot) -> &[Store] {
    &snapshot.stores
}

/// A store and its products; not-found when the id does not resolve.
pub fn store_detail(snapshot: &Snapshot, store_id: StoreId) -> CoreResult<StoreDetail> {
    let store = snapshot
        .store(store_id)
        .ok_or(CoreError::StoreNotFound(Some(store_id)))?;

    debug!(store_id, "store detail");
    Ok(StoreDetail {
        store: store.clone(),
        products: store_products(snapshot, store_id),
    })
}

/// Products of one store. Empty for an unknown store id.
pub fn store_products(snapshot: &Snapshot, store_id: StoreId) -> Vec<Product> {
    snapshot
        .products
        .iter()
        .filter(|p| p.store_id == store_id)
        .cloned()
        .collect()
}

/// Opens or closes the caller's store.
///
/// `None` (a non-boolean input) leaves the flag unchanged; the store is
/// still returned.
pub fn toggle_store_open(
    snapshot: &mut Snapshot,
    principal: &Principal,
    is_open: Option<bool>,
) -> CoreResult<Store> {
    let store_id = owned_store(snapshot, principal)?;
    let store = snapshot
        .store_mut(store_id)
        .ok_or(CoreError::StoreNotFound(Some(store_id)))?;

    if let Some(is_open) = is_open {
        store.is_open = is_open;
        info!(store_id, is_open, "store availability changed");
    }
    Ok(store.clone())
}

/// Updates the caller's store name and/or address.
///
/// Missing or empty values are treated as "not supplied"; anything else,
/// whitespace included, is stored as given.
pub fn update_store_info(
    snapshot: &mut Snapshot,
    principal: &Principal,
    name: Option<&str>,
    address: Option<&str>,
) -> CoreResult<Store> {
    let store_id = owned_store(snapshot, principal)?;
    let store = snapshot
        .store_mut(store_id)
        .ok_or(CoreError::StoreNotFound(Some(store_id)))?;

    let supplied = |value: Option<&str>| value.filter(|v| !v.is_empty()).map(str::to_string);
    if let Some(name) = supplied(name) {
        store.name = name;
    }
    if let Some(address) = supplied(address) {
        store.address = address;
    }

    info!(store_id, "store info updated");
    Ok(store.clone())
}

/// Adds a product to the caller's store with the next product id.
///
/// A non-numeric price is kept as "no price" rather than rejected; a
/// negative one or one above [`MAX_PRICE`](crate::validation::MAX_PRICE) is
/// rejected.
pub fn create_product(
    snapshot: &mut Snapshot,
    principal: &Principal,
    input: NewProduct,
) -> CoreResult<Product> {
    let store_id = owned_store(snapshot, principal)?;
    validate_required("name", &input.name)?;

    let price = input.price.and_then(Money::from_decimal);
    if let Some(price) = price {
        validate_price(price)?;
    }

    let product = Product {
        id: snapshot.take_product_id()?,
        store_id,
        name: input.name,
        price,
    };
    snapshot.products.push(product.clone());

    info!(product_id = product.id, store_id, price = ?product.price, "product created");
    Ok(product)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Role, Sequences, User};

    fn snapshot() -> Snapshot {
        Snapshot {
            users: vec![User {
                id: 2,
                email: "store@demo.com".to_string(),
                password: "1234".to_string(),
                name: "Demo Store Admin".to_string(),
                role: Role::Store,
                store_id: Some(1),
            }],
            stores: vec![
                Store {
                    id: 1,
                    name: "Demo Store".to_string(),
                    address: "Main St 123".to_string(),
                    is_open: true,
                },
                Store {
                    id: 2,
                    name: "Other".to_string(),
                    address: "Elm St 9".to_string(),
                    is_open: false,
                },
            ],
            products: vec![Product {
                id: 1,
                store_id: 1,
                name: "Apple".to_string(),
                price: Some(Money::from_cents(125)),
            }],
            orders: vec![],
            sequences: Sequences {
                order: 1,
                product: 2,
            },
        }
    }

    fn admin(snapshot: &Snapshot) -> Principal {
        Principal::from(snapshot.user(2).unwrap())
    }

    #[test]
    fn test_store_detail() {
        let snapshot = snapshot();
        let detail = store_detail(&snapshot, 1).unwrap();
        assert_eq!(detail.store.name, "Demo Store");
        assert_eq!(detail.products.len(), 1);

        assert!(store_detail(&snapshot, 2).unwrap().products.is_empty());
        assert!(matches!(
            store_detail(&snapshot, 9),
            Err(CoreError::StoreNotFound(Some(9)))
        ));
    }

    #[test]
    fn test_store_products_unknown_store_is_empty() {
        assert!(store_products(&snapshot(), 9).is_empty());
    }

    #[test]
    fn test_toggle_only_touches_own_store() {
        let mut snapshot = snapshot();
        let admin = admin(&snapshot);

        let store = toggle_store_open(&mut snapshot, &admin, Some(false)).unwrap();
        assert!(!store.is_open);
        assert!(!snapshot.store(1).unwrap().is_open);
        assert!(!snapshot.store(2).unwrap().is_open);
    }

    #[test]
    fn test_toggle_ignores_non_boolean() {
        let mut snapshot = snapshot();
        let admin = admin(&snapshot);
        let store = toggle_store_open(&mut snapshot, &admin, None).unwrap();
        assert!(store.is_open);
    }

    #[test]
    fn test_update_skips_blank_fields() {
        let mut snapshot = snapshot();
        let admin = admin(&snapshot);

        let store = update_store_info(&mut snapshot, &admin, Some(""), Some("Oak Ave 5")).unwrap();
        assert_eq!(store.name, "Demo Store");
        assert_eq!(store.address, "Oak Ave 5");

        let store = update_store_info(&mut snapshot, &admin, Some("Fruteria"), None).unwrap();
        assert_eq!(store.name, "Fruteria");
        assert_eq!(store.address, "Oak Ave 5");

        let store = update_store_info(&mut snapshot, &admin, None, Some("  ")).unwrap();
        assert_eq!(store.address, "  ");
    }

    #[test]
    fn test_create_product_uses_sequence() {
        let mut snapshot = snapshot();
        let admin = admin(&snapshot);

        let product = create_product(
            &mut snapshot,
            &admin,
            NewProduct {
                name: "Pear".to_string(),
                price: Some(2.5),
            },
        )
        .unwrap();

        assert_eq!(product.id, 2);
        assert_eq!(product.store_id, 1);
        assert_eq!(product.price, Some(Money::from_cents(250)));
        assert_eq!(snapshot.sequences.product, 3);
        assert_eq!(snapshot.products.len(), 2);
    }

    #[test]
    fn test_create_product_with_unusable_price() {
        let mut snapshot = snapshot();
        let admin = admin(&snapshot);
        let product = create_product(
            &mut snapshot,
            &admin,
            NewProduct {
                name: "Mystery".to_string(),
                price: None,
            },
        )
        .unwrap();
        assert_eq!(product.price, None);
    }

    #[test]
    fn test_create_product_rejects_negative_price() {
        let mut snapshot = snapshot();
        let admin = admin(&snapshot);
        let result = create_product(
            &mut snapshot,
            &admin,
            NewProduct {
                name: "Refund".to_string(),
                price: Some(-1.0),
            },
        );
        assert!(matches!(result, Err(CoreError::Validation(_))));
        assert_eq!(snapshot.sequences.product, 2);
    }

    #[test]
    fn test_create_product_rejects_price_above_max() {
        let mut snapshot = snapshot();
        let admin = admin(&snapshot);
        let result = create_product(
            &mut snapshot,
            &admin,
            NewProduct {
                name: "Yacht".to_string(),
                price: Some(9.0e16),
            },
        );
        assert!(matches!(
            result,
            Err(CoreError::Validation(crate::error::ValidationError::OutOfRange { .. }))
        ));
        assert_eq!(snapshot.products.len(), 1);
    }
}
