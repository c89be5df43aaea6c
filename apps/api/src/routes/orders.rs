//! Consumer order routes.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;
use tiendita_core::guard::authorize;
use tiendita_core::orders::{self, NewOrder};
use tiendita_core::validation::{coerce_id, normalize_quantity, ValidationResult};
use tiendita_core::{Order, OrderItem, Role, ValidationError};

use crate::error::{ApiError, ApiResult};
use crate::extract::{BearerToken, RawBody};
use crate::AppState;

/// Body of `POST /api/orders`, typed after the caller is authorized.
///
/// `null` reads as absent everywhere, so `"items": null` is an empty order.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    #[serde(default)]
    pub store_id: Value,
    #[serde(default)]
    pub items: Option<Vec<ItemRequest>>,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRequest {
    #[serde(default)]
    pub product_id: Value,
    #[serde(default)]
    pub quantity: Option<Value>,
}

impl ItemRequest {
    fn normalize(&self) -> ValidationResult<OrderItem> {
        let product_id = coerce_id(&self.product_id).ok_or_else(|| ValidationError::InvalidFormat {
            field: "productId".to_string(),
            reason: "must be a positive integer".to_string(),
        })?;
        Ok(OrderItem {
            product_id,
            quantity: normalize_quantity(self.quantity.as_ref())?,
        })
    }
}

/// `POST /api/orders`
pub async fn create_order(
    State(state): State<AppState>,
    bearer: BearerToken,
    body: RawBody,
) -> ApiResult<(StatusCode, Json<Order>)> {
    let token = bearer.or_body(body.token());
    let created_at = Utc::now().timestamp_millis();

    let order = state
        .store
        .transact(|snapshot| {
            let principal = authorize(snapshot, token.as_deref(), Role::Consumer)?;
            let body: CreateOrderRequest = body.parse()?;
            // 0 never resolves, so an unusable storeId reads as "store unavailable"
            let store_id = coerce_id(&body.store_id).unwrap_or_default();
            let items = body
                .items
                .unwrap_or_default()
                .iter()
                .map(ItemRequest::normalize)
                .collect::<ValidationResult<Vec<_>>>()?;

            let input = NewOrder {
                store_id,
                items,
                payment_method: body.payment_method,
                address: body.address,
            };
            orders::create(snapshot, &principal, input, created_at).map_err(ApiError::from)
        })
        .await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// `GET /api/my/orders`
pub async fn my_orders(State(state): State<AppState>, bearer: BearerToken) -> ApiResult<Json<Vec<Order>>> {
    let token = bearer.into_token();
    let mine = state
        .store
        .read(|snapshot| {
            let principal = authorize(snapshot, token.as_deref(), Role::Consumer)?;
            Ok::<_, ApiError>(orders::list_mine(snapshot, &principal))
        })
        .await??;
    Ok(Json(mine))
}
