//! # tiendita-api: HTTP/JSON API
//!
//! The API Surface the consumer, store and courier front-ends talk to.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  POST /api/orders  {token, storeId, items, ...}                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  extract: BearerToken + RawBody (token only, shape unchecked)          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SnapshotStore::transact(|snapshot| {                                  │
//! │      guard::authorize(snapshot, token, Role::Consumer)?;               │
//! │      body.parse::<CreateOrderRequest>()?;                              │
//! │      orders::create(snapshot, ...)                                     │
//! │  })                                                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  201 Order  |  ApiError → {"message": ...}                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`config`] - Layered server configuration
//! - [`error`] - [`ApiError`](error::ApiError) and its HTTP mapping
//! - [`extract`] - Token, body and path extractors
//! - [`routes`] - Handlers, one module per audience

pub mod config;
pub mod error;
pub mod extract;
pub mod routes;

use axum::routing::{get, post, put};
use axum::Router;
use tiendita_db::SnapshotStore;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub store: SnapshotStore,
}

impl AppState {
    pub fn new(store: SnapshotStore) -> Self {
        AppState { store }
    }
}

/// Builds the full router: every API route, `/health`, CORS and tracing.
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        // Accounts
        .route("/login", post(routes::accounts::login))
        .route("/register", post(routes::accounts::register))
        // Catalog (public)
        .route("/stores", get(routes::stores::list_stores))
        .route("/stores/{id}", get(routes::stores::store_detail))
        .route("/stores/{id}/products", get(routes::stores::store_products))
        // Catalog (store admin)
        .route("/store/toggle", put(routes::stores::toggle_store))
        .route("/store/update", put(routes::stores::update_store))
        .route("/store/products", post(routes::stores::create_product))
        // Consumer orders
        .route("/orders", post(routes::orders::create_order))
        .route("/my/orders", get(routes::orders::my_orders))
        // Courier
        .route("/courier/orders/available", get(routes::courier::available_orders))
        .route("/courier/orders/{id}/accept", post(routes::courier::accept_order))
        .route("/courier/orders/accepted", get(routes::courier::accepted_orders));

    Router::new()
        .nest("/api", api)
        .route("/health", get(routes::health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
