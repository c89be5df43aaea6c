//! # Order Lifecycle Engine
//!
//! Validates order creation, computes totals and drives status transitions.
//!
//! ## Order Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Order Lifecycle                                   │
//! │                                                                         │
//! │  1. CREATE (consumer)                                                  │
//! │     └── store exists and is open? ── no ──► StoreUnavailable (400)     │
//! │     └── total = Σ price × qty (unresolved products count 0)            │
//! │     └── Order { status: created, courierId: null }                     │
//! │                                                                         │
//! │  2. LIST AVAILABLE (every courier)                                     │
//! │     └── all orders with status = created                               │
//! │                                                                         │
//! │  3. ACCEPT (courier)                                                   │
//! │     └── order exists? ── no ──► OrderNotFound (404)                    │
//! │     └── status = created? ── no ──► OrderNotAvailable (400)            │
//! │     └── Order { status: accepted, courierId: caller }                  │
//! │                                                                         │
//! │  First accept wins. The Persistent Store serializes transactions, so   │
//! │  two couriers can never both observe `created` for the same order.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The engine is clock-free: the caller passes the creation timestamp.

use tracing::{debug, info};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::guard::Principal;
use crate::money::Money;
use crate::types::{Order, OrderId, OrderItem, OrderStatus, Product, Snapshot, StoreId};

/// Input for [`create`]. Items are already normalized (quantity ≥ 1).
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub store_id: StoreId,
    pub items: Vec<OrderItem>,
    pub payment_method: Option<String>,
    pub address: Option<String>,
}

/// Sums `price × quantity` over the items whose product resolves and has a
/// usable price. Everything else contributes zero.
///
/// A total that does not fit in `Money` is a validation error.
///
/// ## Example
/// ```rust
/// use tiendita_core::money::Money;
/// use tiendita_core::orders::order_total;
/// use tiendita_core::{OrderItem, Product};
///
/// let products = vec![Product {
///     id: 1,
///     store_id: 1,
///     name: "Apple".to_string(),
///     price: Some(Money::from_cents(125)),
/// }];
/// let items = vec![
///     OrderItem { product_id: 1, quantity: 2 },
///     OrderItem { product_id: 99, quantity: 5 },
/// ];
/// assert_eq!(order_total(&items, &products).unwrap().cents(), 250);
/// ```
pub fn order_total(items: &[OrderItem], products: &[Product]) -> CoreResult<Money> {
    let overflow = || ValidationError::Overflow {
        field: "total".to_string(),
    };

    let mut total = Money::zero();
    for item in items {
        let price = products
            .iter()
            .find(|p| p.id == item.product_id)
            .and_then(|p| p.price);
        if let Some(price) = price {
            let line = price.multiply_quantity(item.quantity).ok_or_else(overflow)?;
            total = total.checked_add(line).ok_or_else(overflow)?;
        }
    }
    Ok(total)
}

/// Places an order for `principal` against an open store.
///
/// On rejection nothing is mutated, including the order sequence.
pub fn create(
    snapshot: &mut Snapshot,
    principal: &Principal,
    input: NewOrder,
    created_at: i64,
) -> CoreResult<Order> {
    let store_open = snapshot.store(input.store_id).is_some_and(|s| s.is_open);
    if !store_open {
        debug!(store_id = input.store_id, "order rejected: store unavailable");
        return Err(CoreError::StoreUnavailable(input.store_id));
    }

    let total = order_total(&input.items, &snapshot.products)?;
    let order = Order {
        id: snapshot.take_order_id()?,
        store_id: input.store_id,
        consumer_id: principal.user_id,
        courier_id: None,
        status: OrderStatus::Created,
        items: input.items,
        payment_method: input.payment_method,
        address: input.address,
        total,
        created_at,
    };
    snapshot.orders.push(order.clone());

    info!(
        order_id = order.id,
        store_id = order.store_id,
        consumer_id = order.consumer_id,
        total = %order.total,
        "order created"
    );
    Ok(order)
}

/// Assigns a `created` order to the calling courier.
pub fn accept(snapshot: &mut Snapshot, principal: &Principal, order_id: OrderId) -> CoreResult<Order> {
    let order = snapshot
        .order_mut(order_id)
        .ok_or(CoreError::OrderNotFound(order_id))?;

    if !order.status.can_transition_to(OrderStatus::Accepted) {
        debug!(order_id, status = %order.status, "accept rejected: not available");
        return Err(CoreError::OrderNotAvailable {
            order_id,
            status: order.status,
        });
    }

    order.status = OrderStatus::Accepted;
    order.courier_id = Some(principal.user_id);

    info!(order_id, courier_id = principal.user_id, "order accepted");
    Ok(order.clone())
}

/// Orders placed by the calling consumer, in any store or status.
pub fn list_mine(snapshot: &Snapshot, principal: &Principal) -> Vec<Order> {
    snapshot
        .orders
        .iter()
        .filter(|o| o.consumer_id == principal.user_id)
        .cloned()
        .collect()
}

/// Orders waiting for a courier. Every courier sees the same list.
pub fn list_available(snapshot: &Snapshot) -> Vec<Order> {
    snapshot
        .orders
        .iter()
        .filter(|o| o.status == OrderStatus::Created)
        .cloned()
        .collect()
}

/// Orders accepted by the calling courier.
pub fn list_accepted(snapshot: &Snapshot, principal: &Principal) -> Vec<Order> {
    snapshot
        .orders
        .iter()
        .filter(|o| o.courier_id == Some(principal.user_id))
        .cloned()
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Role, Sequences, Store, User};

    const NOW: i64 = 1_700_000_000_000;

    fn user(id: u32, role: Role) -> User {
        User {
            id,
            email: format!("u{id}@demo.com"),
            password: "1234".to_string(),
            name: format!("User {id}"),
            role,
            store_id: None,
        }
    }

    fn snapshot() -> Snapshot {
        Snapshot {
            users: vec![
                user(1, Role::Consumer),
                user(3, Role::Courier),
                user(4, Role::Courier),
                user(5, Role::Consumer),
            ],
            stores: vec![
                Store {
                    id: 1,
                    name: "Demo Store".to_string(),
                    address: "Main St 123".to_string(),
                    is_open: true,
                },
                Store {
                    id: 2,
                    name: "Bob's Store".to_string(),
                    address: "Address to be defined".to_string(),
                    is_open: false,
                },
            ],
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
                Product {
                    id: 3,
                    store_id: 1,
                    name: "Mystery".to_string(),
                    price: None,
                },
            ],
            orders: vec![],
            sequences: Sequences {
                order: 1,
                product: 4,
            },
        }
    }

    fn principal(snapshot: &Snapshot, id: u32) -> Principal {
        Principal::from(snapshot.user(id).unwrap())
    }

    fn seed_order(store_id: StoreId) -> NewOrder {
        NewOrder {
            store_id,
            items: vec![
                OrderItem {
                    product_id: 1,
                    quantity: 2,
                },
                OrderItem {
                    product_id: 2,
                    quantity: 1,
                },
            ],
            payment_method: Some("cash".to_string()),
            address: Some("Calle 1".to_string()),
        }
    }

    #[test]
    fn test_create_computes_total_and_status() {
        let mut snapshot = snapshot();
        let alice = principal(&snapshot, 1);

        let order = create(&mut snapshot, &alice, seed_order(1), NOW).unwrap();

        assert_eq!(order.id, 1);
        assert_eq!(order.total, Money::from_cents(340));
        assert_eq!(order.status, OrderStatus::Created);
        assert_eq!(order.courier_id, None);
        assert_eq!(order.consumer_id, 1);
        assert_eq!(order.created_at, NOW);
        assert_eq!(snapshot.orders, vec![order]);
        assert_eq!(snapshot.sequences.order, 2);
    }

    #[test]
    fn test_unresolved_and_unpriced_products_count_zero() {
        let mut snapshot = snapshot();
        let alice = principal(&snapshot, 1);
        let input = NewOrder {
            items: vec![
                OrderItem {
                    product_id: 1,
                    quantity: 1,
                },
                OrderItem {
                    product_id: 3,
                    quantity: 4,
                },
                OrderItem {
                    product_id: 77,
                    quantity: 2,
                },
            ],
            ..seed_order(1)
        };

        let order = create(&mut snapshot, &alice, input, NOW).unwrap();
        assert_eq!(order.total, Money::from_cents(125));
        assert_eq!(order.items.len(), 3);
    }

    #[test]
    fn test_total_overflow_is_rejected_without_mutation() {
        let mut snapshot = snapshot();
        // A price written straight into the file, past what validation allows
        snapshot.products[0].price = Money::from_decimal(9.0e16);
        let alice = principal(&snapshot, 1);

        let result = create(&mut snapshot, &alice, seed_order(1), NOW);

        assert!(matches!(
            result,
            Err(CoreError::Validation(ValidationError::Overflow { ref field })) if field == "total"
        ));
        assert!(snapshot.orders.is_empty());
        assert_eq!(snapshot.sequences.order, 1);
    }

    #[test]
    fn test_closed_or_missing_store_creates_nothing() {
        let mut snapshot = snapshot();
        let alice = principal(&snapshot, 1);

        for store_id in [2, 99] {
            let result = create(&mut snapshot, &alice, seed_order(store_id), NOW);
            assert!(matches!(result, Err(CoreError::StoreUnavailable(id)) if id == store_id));
        }
        assert!(snapshot.orders.is_empty());
        assert_eq!(snapshot.sequences.order, 1);
    }

    #[test]
    fn test_first_accept_wins() {
        let mut snapshot = snapshot();
        let alice = principal(&snapshot, 1);
        let courier_a = principal(&snapshot, 3);
        let courier_b = principal(&snapshot, 4);
        let order = create(&mut snapshot, &alice, seed_order(1), NOW).unwrap();

        let accepted = accept(&mut snapshot, &courier_a, order.id).unwrap();
        assert_eq!(accepted.status, OrderStatus::Accepted);
        assert_eq!(accepted.courier_id, Some(3));

        for courier in [&courier_b, &courier_a] {
            let result = accept(&mut snapshot, courier, order.id);
            assert!(matches!(
                result,
                Err(CoreError::OrderNotAvailable {
                    status: OrderStatus::Accepted,
                    ..
                })
            ));
        }
        assert_eq!(snapshot.orders[0].courier_id, Some(3));
    }

    #[test]
    fn test_accept_unknown_order() {
        let mut snapshot = snapshot();
        let courier = principal(&snapshot, 3);
        assert!(matches!(
            accept(&mut snapshot, &courier, 42),
            Err(CoreError::OrderNotFound(42))
        ));
    }

    #[test]
    fn test_listings() {
        let mut snapshot = snapshot();
        let alice = principal(&snapshot, 1);
        let other = principal(&snapshot, 5);
        let courier = principal(&snapshot, 3);

        let first = create(&mut snapshot, &alice, seed_order(1), NOW).unwrap();
        let second = create(&mut snapshot, &other, seed_order(1), NOW).unwrap();
        let third = create(&mut snapshot, &alice, seed_order(1), NOW).unwrap();
        accept(&mut snapshot, &courier, first.id).unwrap();

        let mine: Vec<OrderId> = list_mine(&snapshot, &alice).iter().map(|o| o.id).collect();
        assert_eq!(mine, vec![first.id, third.id]);

        let available: Vec<OrderId> = list_available(&snapshot).iter().map(|o| o.id).collect();
        assert_eq!(available, vec![second.id, third.id]);

        let accepted: Vec<OrderId> = list_accepted(&snapshot, &courier).iter().map(|o| o.id).collect();
        assert_eq!(accepted, vec![first.id]);
    }
}
