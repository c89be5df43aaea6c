//! # Domain Types
//!
//! Entities of the marketplace and the [`Snapshot`] that holds them all.
//!
//! ## Entity Relations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐  1:1   ┌─────────────────┐  1:N  ┌──────────────┐ │
//! │  │ User            │───────►│ Store           │◄──────│ Product      │ │
//! │  │  role = store   │storeId │  isOpen         │storeId│  price       │ │
//! │  └─────────────────┘        └────────▲────────┘       └──────▲───────┘ │
//! │                                      │ storeId               │         │
//! │  ┌─────────────────┐  consumerId ┌───┴─────────────┐ productId│         │
//! │  │ User            │◄────────────│ Order           │──────────┘         │
//! │  │  role = consumer│             │  status         │  (items)           │
//! │  └─────────────────┘             │  total          │                    │
//! │  ┌─────────────────┐  courierId  │                 │                    │
//! │  │ User            │◄────────────│  (null until    │                    │
//! │  │  role = courier │             │   accepted)     │                    │
//! │  └─────────────────┘             └─────────────────┘                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Names
//! Field names are camelCase (`storeId`, `isOpen`, `createdAt`) because the
//! snapshot file and the API bodies share these types with the front-ends.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::validation::ValidationResult;

// =============================================================================
// Identifiers
// =============================================================================

/// User id, assigned as max(existing ids) + 1.
pub type UserId = u32;
/// Store id, assigned as max(existing ids) + 1.
pub type StoreId = u32;
/// Product id, assigned from `sequences.product`.
pub type ProductId = u32;
/// Order id, assigned from `sequences.order`.
pub type OrderId = u32;

// =============================================================================
// Role
// =============================================================================

/// The three marketplace roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Browses stores and places orders.
    Consumer,
    /// Administers exactly one Store.
    Store,
    /// Claims and delivers orders.
    Courier,
}

impl Role {
    /// Wire name of the role, as it appears in tokens and JSON.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Consumer => "consumer",
            Role::Store => "store",
            Role::Courier => "courier",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "consumer" => Ok(Role::Consumer),
            "store" => Ok(Role::Store),
            "courier" => Ok(Role::Courier),
            _ => Err(()),
        }
    }
}

// =============================================================================
// User
// =============================================================================

/// A registered account.
///
/// `password` is an opaque credential compared by exact match. It is
/// persisted but never returned by the API; see [`UserProfile`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    /// Unique across all users regardless of role.
    pub email: String,
    pub password: String,
    pub name: String,
    pub role: Role,
    /// Present only for `role = store`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_id: Option<StoreId>,
}

/// Public projection of a [`User`], returned by login and register.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: UserId,
    pub email: String,
    pub name: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub store_id: Option<StoreId>,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        UserProfile {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role,
            store_id: user.store_id,
        }
    }
}

// =============================================================================
// Store
// =============================================================================

/// A seller storefront. Created together with its store-role user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    pub id: StoreId,
    pub name: String,
    pub address: String,
    /// Orders are accepted only while this is `true`.
    pub is_open: bool,
}

// =============================================================================
// Product
// =============================================================================

/// A catalog entry owned by one Store. Immutable after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub store_id: StoreId,
    pub name: String,
    /// `None` when the price given at creation was not a number. Such a
    /// product contributes nothing to order totals.
    pub price: Option<Money>,
}

// =============================================================================
// Order Status
// =============================================================================

/// The status of an order.
///
/// ## State Machine
/// ```text
/// created ──accept(courier)──► accepted
/// ```
/// Single forward edge, no cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Placed by a consumer, visible to every courier.
    #[default]
    Created,
    /// Claimed by exactly one courier.
    Accepted,
}

impl OrderStatus {
    /// Whether `self → next` is an edge of the lifecycle.
    pub const fn can_transition_to(&self, next: OrderStatus) -> bool {
        matches!((self, next), (OrderStatus::Created, OrderStatus::Accepted))
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderStatus::Created => f.write_str("created"),
            OrderStatus::Accepted => f.write_str("accepted"),
        }
    }
}

// =============================================================================
// Order
// =============================================================================

/// A line of an order, as normalized at creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: ProductId,
    /// Always ≥ 1.
    pub quantity: u32,
}

/// A consumer's order against one Store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub store_id: StoreId,
    pub consumer_id: UserId,
    /// `None` until a courier accepts the order.
    pub courier_id: Option<UserId>,
    pub status: OrderStatus,
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    /// Computed once, at creation.
    pub total: Money,
    /// Unix epoch milliseconds.
    #[ts(type = "number")]
    pub created_at: i64,
}

// =============================================================================
// Snapshot
// =============================================================================

/// Next-id counters for the entities that do not derive ids from the
/// collection maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sequences {
    pub order: OrderId,
    pub product: ProductId,
}

impl Default for Sequences {
    fn default() -> Self {
        Sequences {
            order: 1,
            product: 1,
        }
    }
}

/// The complete persisted state at one point in time.
///
/// Every request works on its own freshly loaded `Snapshot`; there is no
/// shared in-memory copy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub stores: Vec<Store>,
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub orders: Vec<Order>,
    #[serde(default)]
    pub sequences: Sequences,
}

impl Snapshot {
    /// Looks up a user by id.
    pub fn user(&self, id: UserId) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    /// Looks up a store by id.
    pub fn store(&self, id: StoreId) -> Option<&Store> {
        self.stores.iter().find(|s| s.id == id)
    }

    /// Looks up a store by id for mutation.
    pub fn store_mut(&mut self, id: StoreId) -> Option<&mut Store> {
        self.stores.iter_mut().find(|s| s.id == id)
    }

    /// Looks up a product by id.
    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Looks up an order by id for mutation.
    pub fn order_mut(&mut self, id: OrderId) -> Option<&mut Order> {
        self.orders.iter_mut().find(|o| o.id == id)
    }

    /// Next user id: current maximum + 1, recomputed on every call.
    pub fn next_user_id(&self) -> ValidationResult<UserId> {
        bump("user id", self.users.iter().map(|u| u.id).max().unwrap_or(0))
    }

    /// Next store id: current maximum + 1, recomputed on every call.
    pub fn next_store_id(&self) -> ValidationResult<StoreId> {
        bump("store id", self.stores.iter().map(|s| s.id).max().unwrap_or(0))
    }

    /// Takes the next order id and advances the counter.
    ///
    /// The counter is left untouched when it cannot advance.
    pub fn take_order_id(&mut self) -> ValidationResult<OrderId> {
        let id = self.sequences.order;
        self.sequences.order = bump("order id", id)?;
        Ok(id)
    }

    /// Takes the next product id and advances the counter.
    pub fn take_product_id(&mut self) -> ValidationResult<ProductId> {
        let id = self.sequences.product;
        self.sequences.product = bump("product id", id)?;
        Ok(id)
    }
}

fn bump(field: &str, id: u32) -> ValidationResult<u32> {
    id.checked_add(1).ok_or_else(|| ValidationError::Overflow {
        field: field.to_string(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn store_user() -> User {
        User {
            id: 2,
            email: "store@demo.com".to_string(),
            password: "1234".to_string(),
            name: "Demo Store Admin".to_string(),
            role: Role::Store,
            store_id: Some(1),
        }
    }

    #[test]
    fn test_role_round_trips_through_str() {
        for role in [Role::Consumer, Role::Store, Role::Courier] {
            assert_eq!(role.as_str().parse::<Role>(), Ok(role));
        }
        assert!("admin".parse::<Role>().is_err());
        assert!("Consumer".parse::<Role>().is_err());
    }

    #[test]
    fn test_status_transitions_are_forward_only() {
        assert!(OrderStatus::Created.can_transition_to(OrderStatus::Accepted));
        assert!(!OrderStatus::Accepted.can_transition_to(OrderStatus::Accepted));
        assert!(!OrderStatus::Accepted.can_transition_to(OrderStatus::Created));
        assert!(!OrderStatus::Created.can_transition_to(OrderStatus::Created));
    }

    #[test]
    fn test_user_json_uses_camel_case() {
        let json = serde_json::to_value(store_user()).unwrap();
        assert_eq!(json["storeId"], 1);
        assert_eq!(json["role"], "store");
    }

    #[test]
    fn test_profile_hides_password() {
        let profile = UserProfile::from(&store_user());
        let json = serde_json::to_value(&profile).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["email"], "store@demo.com");
    }

    #[test]
    fn test_consumer_omits_store_id() {
        let mut user = store_user();
        user.role = Role::Consumer;
        user.store_id = None;
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("storeId").is_none());
    }

    #[test]
    fn test_order_wire_shape() {
        let order = Order {
            id: 1,
            store_id: 1,
            consumer_id: 1,
            courier_id: None,
            status: OrderStatus::Created,
            items: vec![OrderItem {
                product_id: 1,
                quantity: 2,
            }],
            payment_method: Some("cash".to_string()),
            address: Some("Main St 1".to_string()),
            total: Money::from_cents(250),
            created_at: 1_700_000_000_000,
        };
        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["status"], "created");
        assert!(json["courierId"].is_null());
        assert_eq!(json["items"][0]["productId"], 1);
        assert_eq!(json["total"], 2.5);
        assert_eq!(json["createdAt"], 1_700_000_000_000_i64);
    }

    #[test]
    fn test_id_derivation() {
        let mut snapshot = Snapshot::default();
        assert_eq!(snapshot.next_user_id(), Ok(1));
        assert_eq!(snapshot.next_store_id(), Ok(1));

        snapshot.users.push(store_user());
        assert_eq!(snapshot.next_user_id(), Ok(3));

        assert_eq!(snapshot.take_order_id(), Ok(1));
        assert_eq!(snapshot.take_order_id(), Ok(2));
        assert_eq!(snapshot.sequences.order, 3);
    }

    #[test]
    fn test_exhausted_ids_are_errors() {
        let mut snapshot = Snapshot::default();
        let mut user = store_user();
        user.id = u32::MAX;
        snapshot.users.push(user);
        snapshot.sequences.order = u32::MAX;
        snapshot.sequences.product = u32::MAX;

        assert!(matches!(
            snapshot.next_user_id(),
            Err(ValidationError::Overflow { .. })
        ));
        assert!(snapshot.take_order_id().is_err());
        assert!(snapshot.take_product_id().is_err());
        assert_eq!(snapshot.sequences.order, u32::MAX);
        assert_eq!(snapshot.sequences.product, u32::MAX);
    }

    #[test]
    fn test_snapshot_tolerates_missing_collections() {
        let snapshot: Snapshot = serde_json::from_str(r#"{"users": []}"#).unwrap();
        assert!(snapshot.orders.is_empty());
        assert_eq!(snapshot.sequences, Sequences::default());
    }
}
