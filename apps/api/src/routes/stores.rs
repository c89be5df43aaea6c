//! Catalog routes.
//!
//! Public reads under `/api/stores`, and store-admin writes under
//! `/api/store` that always target the caller's own Store.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;
use tiendita_core::catalog::{self, NewProduct, StoreDetail};
use tiendita_core::guard::authorize;
use tiendita_core::validation::coerce_number;
use tiendita_core::{CoreError, Product, Role, Store};
use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::extract::{BearerToken, PathId, RawBody};
use crate::AppState;

// Request bodies below are typed only after the Guard has run; `null`
// reads as absent.

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleRequest {
    /// Anything but a JSON boolean leaves the flag unchanged.
    #[serde(default)]
    pub is_open: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStoreRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    #[serde(default)]
    pub name: Option<String>,
    /// Coerced leniently; absent or non-numeric means "no price".
    #[serde(default)]
    pub price: Option<Value>,
}

/// `GET /api/stores`
pub async fn list_stores(State(state): State<AppState>) -> ApiResult<Json<Vec<Store>>> {
    let stores = state.store.read(|s| catalog::list_stores(s).to_vec()).await?;
    debug!(count = stores.len(), "listed stores");
    Ok(Json(stores))
}

/// `GET /api/stores/{id}`
pub async fn store_detail(State(state): State<AppState>, PathId(id): PathId) -> ApiResult<Json<StoreDetail>> {
    let id = id.ok_or(CoreError::StoreNotFound(None))?;
    let detail = state.store.read(|s| catalog::store_detail(s, id)).await??;
    Ok(Json(detail))
}

/// `GET /api/stores/{id}/products`
pub async fn store_products(State(state): State<AppState>, PathId(id): PathId) -> ApiResult<Json<Vec<Product>>> {
    let Some(id) = id else {
        return Ok(Json(Vec::new()));
    };
    let products = state.store.read(|s| catalog::store_products(s, id)).await?;
    Ok(Json(products))
}

/// `PUT /api/store/toggle`
pub async fn toggle_store(
    State(state): State<AppState>,
    bearer: BearerToken,
    body: RawBody,
) -> ApiResult<Json<Store>> {
    let token = bearer.or_body(body.token());

    let store = state
        .store
        .transact(|snapshot| {
            let principal = authorize(snapshot, token.as_deref(), Role::Store)?;
            let body: ToggleRequest = body.parse()?;
            let is_open = body.is_open.as_ref().and_then(Value::as_bool);
            catalog::toggle_store_open(snapshot, &principal, is_open).map_err(ApiError::from)
        })
        .await?;
    Ok(Json(store))
}

/// `PUT /api/store/update`
pub async fn update_store(
    State(state): State<AppState>,
    bearer: BearerToken,
    body: RawBody,
) -> ApiResult<Json<Store>> {
    let token = bearer.or_body(body.token());

    let store = state
        .store
        .transact(|snapshot| {
            let principal = authorize(snapshot, token.as_deref(), Role::Store)?;
            let body: UpdateStoreRequest = body.parse()?;
            catalog::update_store_info(snapshot, &principal, body.name.as_deref(), body.address.as_deref())
                .map_err(ApiError::from)
        })
        .await?;
    Ok(Json(store))
}

/// `POST /api/store/products`
pub async fn create_product(
    State(state): State<AppState>,
    bearer: BearerToken,
    body: RawBody,
) -> ApiResult<(StatusCode, Json<Product>)> {
    let token = bearer.or_body(body.token());

    let product = state
        .store
        .transact(|snapshot| {
            let principal = authorize(snapshot, token.as_deref(), Role::Store)?;
            let body: CreateProductRequest = body.parse()?;
            let input = NewProduct {
                name: body.name.unwrap_or_default(),
                price: body.price.as_ref().and_then(coerce_number),
            };
            catalog::create_product(snapshot, &principal, input).map_err(ApiError::from)
        })
        .await?;
    Ok((StatusCode::CREATED, Json(product)))
}
