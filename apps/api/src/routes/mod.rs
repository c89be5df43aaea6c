//! # HTTP Routes
//!
//! One module per audience.
//!
//! | Method & Path                          | Role     | Handler                       |
//! |----------------------------------------|----------|-------------------------------|
//! | `POST /api/login`                      | none     | [`accounts::login`]           |
//! | `POST /api/register`                   | none     | [`accounts::register`]        |
//! | `GET  /api/stores`                     | none     | [`stores::list_stores`]       |
//! | `GET  /api/stores/{id}`                | none     | [`stores::store_detail`]      |
//! | `GET  /api/stores/{id}/products`       | none     | [`stores::store_products`]    |
//! | `PUT  /api/store/toggle`               | store    | [`stores::toggle_store`]      |
//! | `PUT  /api/store/update`               | store    | [`stores::update_store`]      |
//! | `POST /api/store/products`             | store    | [`stores::create_product`]    |
//! | `POST /api/orders`                     | consumer | [`orders::create_order`]      |
//! | `GET  /api/my/orders`                  | consumer | [`orders::my_orders`]         |
//! | `GET  /api/courier/orders/available`   | courier  | [`courier::available_orders`] |
//! | `POST /api/courier/orders/{id}/accept` | courier  | [`courier::accept_order`]     |
//! | `GET  /api/courier/orders/accepted`    | courier  | [`courier::accepted_orders`]  |
//!
//! Each handler does all its work inside one `read` or `transact` call, so
//! the guard and the operation see the same snapshot.

pub mod accounts;
pub mod courier;
pub mod orders;
pub mod stores;

use axum::response::IntoResponse;

/// Liveness check.
pub async fn health() -> impl IntoResponse {
    "OK"
}
