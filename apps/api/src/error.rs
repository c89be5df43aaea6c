//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Tiendita                               │
//! │                                                                         │
//! │  Handler: Result<T, ApiError>                                          │
//! │       │                                                                 │
//! │       ├── AuthError (guard)            ──► 403 "unauthorized"          │
//! │       ├── CoreError::*NotFound         ──► 404                          │
//! │       ├── CoreError::InvalidCredentials ─► 401                          │
//! │       ├── CoreError / ValidationError  ──► 400                          │
//! │       ├── malformed JSON body          ──► 400                          │
//! │       └── DbError                      ──► 500 (detail logged only)     │
//! │                                                                         │
//! │  Every body is {"message": "..."}; the front-ends show it in an alert. │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tiendita_core::{AuthError, CoreError, ValidationError};
use tiendita_db::DbError;
use tracing::error;

/// Error returned by every handler.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Db(#[from] DbError),

    /// The request body could not be read as the expected JSON.
    #[error("{0}")]
    BadRequest(String),
}

/// What the front-ends receive when a request fails.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Auth(_) => StatusCode::FORBIDDEN,
            ApiError::Core(err) => match err {
                CoreError::StoreNotFound(_) | CoreError::OrderNotFound(_) => StatusCode::NOT_FOUND,
                CoreError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                CoreError::StoreUnavailable(_)
                | CoreError::OrderNotAvailable { .. }
                | CoreError::EmailTaken(_)
                | CoreError::Validation(_) => StatusCode::BAD_REQUEST,
            },
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message shown to the end user.
    pub fn message(&self) -> String {
        match self {
            ApiError::Db(_) => "internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Db(err) = &self {
            error!(error = %err, "snapshot store failure");
        }
        let body = ErrorBody {
            message: self.message(),
        };
        (self.status(), Json(body)).into_response()
    }
}

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;
