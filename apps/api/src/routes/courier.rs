//! Courier routes: the open order pool, claiming, and the caller's claims.

use axum::extract::State;
use axum::Json;
use tiendita_core::guard::authorize;
use tiendita_core::{orders, CoreError, Order, Role};

use crate::error::{ApiError, ApiResult};
use crate::extract::{BearerToken, PathId, RawBody};
use crate::AppState;

/// `GET /api/courier/orders/available`
pub async fn available_orders(State(state): State<AppState>, bearer: BearerToken) -> ApiResult<Json<Vec<Order>>> {
    let token = bearer.into_token();
    let available = state
        .store
        .read(|snapshot| {
            authorize(snapshot, token.as_deref(), Role::Courier)?;
            Ok::<_, ApiError>(orders::list_available(snapshot))
        })
        .await??;
    Ok(Json(available))
}

/// `POST /api/courier/orders/{id}/accept`
///
/// First accept wins; every later attempt gets 400 "not available".
/// The body carries nothing but an optional `token`.
pub async fn accept_order(
    State(state): State<AppState>,
    PathId(order_id): PathId,
    bearer: BearerToken,
    body: RawBody,
) -> ApiResult<Json<Order>> {
    let token = bearer.or_body(body.token());

    let order = state
        .store
        .transact(|snapshot| {
            let principal = authorize(snapshot, token.as_deref(), Role::Courier)?;
            let order_id = order_id.ok_or(CoreError::OrderNotFound(0))?;
            orders::accept(snapshot, &principal, order_id).map_err(ApiError::from)
        })
        .await?;
    Ok(Json(order))
}

/// `GET /api/courier/orders/accepted`
pub async fn accepted_orders(State(state): State<AppState>, bearer: BearerToken) -> ApiResult<Json<Vec<Order>>> {
    let token = bearer.into_token();
    let accepted = state
        .store
        .read(|snapshot| {
            let principal = authorize(snapshot, token.as_deref(), Role::Courier)?;
            Ok::<_, ApiError>(orders::list_accepted(snapshot, &principal))
        })
        .await??;
    Ok(Json(accepted))
}
