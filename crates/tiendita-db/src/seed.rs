//! # Seed Snapshot
//!
//! The document written when no snapshot file exists yet.
//!
//! | id | email            | role     | name             | storeId |
//! |----|------------------|----------|------------------|---------|
//! | 1  | alice@demo.com   | consumer | Alice            |         |
//! | 2  | store@demo.com   | store    | Demo Store Admin | 1       |
//! | 3  | rider@demo.com   | courier  | Rider Rick       |         |
//!
//! Every seeded password is `1234`. Store 1 ("Demo Store") is open and sells
//! Apple (1.25) and Banana (0.90).

use tiendita_core::{Money, Product, Role, Sequences, Snapshot, Store, User};

const SEED_PASSWORD: &str = "1234";

/// Builds the seed snapshot.
pub fn seed_snapshot() -> Snapshot {
    let user = |id, email: &str, name: &str, role, store_id| User {
        id,
        email: email.to_string(),
        password: SEED_PASSWORD.to_string(),
        name: name.to_string(),
        role,
        store_id,
    };

    Snapshot {
        users: vec![
            user(1, "alice@demo.com", "Alice", Role::Consumer, None),
            user(2, "store@demo.com", "Demo Store Admin", Role::Store, Some(1)),
            user(3, "rider@demo.com", "Rider Rick", Role::Courier, None),
        ],
        stores: vec![Store {
            id: 1,
            name: "Demo Store".to_string(),
            address: "Main St 123".to_string(),
            is_open: true,
        }],
        products: vec![
            Product {
                id: 1,
                store_id: 1,
                name: "Apple".to_string(),
                price: Some(Money::from_cents(125)),
            },
            Product {
                id: 2,
                store_id: 1,
                name: "Banana".to_string(),
                price: Some(Money::from_cents(90)),
            },
        ],
        orders: Vec::new(),
        sequences: Sequences {
            order: 1,
            product: 3,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_is_referentially_consistent() {
        let seed = seed_snapshot();

        let admin = seed.user(2).unwrap();
        assert_eq!(admin.role, Role::Store);
        assert!(seed.store(admin.store_id.unwrap()).unwrap().is_open);

        for product in &seed.products {
            assert!(seed.store(product.store_id).is_some());
            assert!(product.id < seed.sequences.product);
        }
    }

    #[test]
    fn test_seed_wire_shape() {
        let json = serde_json::to_value(seed_snapshot()).unwrap();
        assert_eq!(json["sequences"], serde_json::json!({ "order": 1, "product": 3 }));
        assert_eq!(json["products"][0]["price"], serde_json::json!(1.25));
        assert_eq!(json["stores"][0]["isOpen"], serde_json::json!(true));
        assert_eq!(json["users"][1]["storeId"], serde_json::json!(1));
        assert!(json["users"][0].get("storeId").is_none());
    }
}
