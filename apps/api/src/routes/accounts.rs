//! Login and registration.
//!
//! Both endpoints are public. Responses carry a [`UserProfile`], never the
//! stored password.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tiendita_core::accounts::{self, Registration};
use tiendita_core::{CoreError, Role, UserProfile};
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::extract::JsonBody;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    /// Optional role filter. An unknown role matches no user.
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserProfile,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub name: String,
    pub role: Role,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user: UserProfile,
}

/// `POST /api/login`
pub async fn login(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let role = match body.role.as_deref().filter(|r| !r.is_empty()) {
        None => None,
        Some(raw) => match raw.parse::<Role>() {
            Ok(role) => Some(role),
            Err(()) => return Err(CoreError::InvalidCredentials.into()),
        },
    };

    let response = state
        .store
        .read(|snapshot| {
            accounts::login(snapshot, &body.email, &body.password, role).map(|(token, user)| LoginResponse {
                token,
                user: UserProfile::from(user),
            })
        })
        .await??;

    info!(user_id = response.user.id, role = %response.user.role, "user logged in");
    Ok(Json(response))
}

/// `POST /api/register`
pub async fn register(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<RegisterResponse>)> {
    let registration = Registration {
        email: body.email,
        password: body.password,
        name: body.name,
        role: body.role,
    };

    let user = state
        .store
        .transact(|snapshot| accounts::register(snapshot, registration).map_err(ApiError::from))
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "user created".to_string(),
            user: UserProfile::from(&user),
        }),
    ))
}
