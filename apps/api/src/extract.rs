//! # Request Extractors
//!
//! Lenient request parsing shared by every route.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  BearerToken   Authorization: Bearer <t>  ──► header                    │
//! │                ?token=<t>                 ──► query                     │
//! │                resolved as header, then body `token`, then query        │
//! │                                                                         │
//! │  JsonBody<T>   ""            ──► T from {}                              │
//! │                "{bad json"   ──► 400 {"message": ...}                   │
//! │                                                                         │
//! │  RawBody       JSON kept as a `Value`; typed only after the Guard       │
//! │                                                                         │
//! │  PathId        "/orders/7"   ──► PathId(Some(7))                        │
//! │                "/orders/x"   ──► PathId(None)  (behaves as unknown id)  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The front-ends also send the token as a `token` field in JSON bodies;
//! handlers combine that with [`BearerToken::or_body`]. Protected routes take
//! a [`RawBody`] so an unauthorized caller gets 403 whatever the body holds.

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::error::ApiError;

// =============================================================================
// Bearer Token
// =============================================================================

/// Tokens from the `Authorization` header and the `token` query parameter,
/// kept apart so a body token can rank between them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BearerToken {
    header: Option<String>,
    query: Option<String>,
}

#[derive(Deserialize)]
struct TokenQuery {
    token: Option<String>,
}

impl BearerToken {
    /// Header, then the `token` field of a JSON body, then the query.
    pub fn or_body(self, body_token: Option<String>) -> Option<String> {
        self.header
            .or_else(|| body_token.as_deref().and_then(non_blank))
            .or(self.query)
    }

    /// Header, then the query. For routes without a body.
    pub fn into_token(self) -> Option<String> {
        self.header.or(self.query)
    }
}

fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.strip_prefix("Bearer ").unwrap_or(value))
            .and_then(non_blank);

        let query = Query::<TokenQuery>::try_from_uri(&parts.uri)
            .ok()
            .and_then(|Query(query)| query.token)
            .as_deref()
            .and_then(non_blank);

        Ok(BearerToken { header, query })
    }
}

// =============================================================================
// JSON Body
// =============================================================================

/// JSON request body where an empty body means `{}`.
///
/// Unlike `axum::Json`, the content type is not checked and every rejection
/// is an [`ApiError`], so clients always get a `{message}` body.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

        let raw: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
            b"{}"
        } else {
            &bytes
        };

        serde_json::from_slice(raw)
            .map(JsonBody)
            .map_err(invalid_body)
    }
}

fn invalid_body(e: serde_json::Error) -> ApiError {
    ApiError::BadRequest(format!("invalid request body: {e}"))
}

// =============================================================================
// Raw Body
// =============================================================================

/// JSON body held as a [`Value`] until the caller has been authorized.
///
/// Only syntax is checked on extraction. Shape errors surface from
/// [`RawBody::parse`], which handlers call after the Guard.
#[derive(Debug, Clone, Default)]
pub struct RawBody(pub Value);

impl RawBody {
    /// The body's `token` field, when it is a non-blank string.
    pub fn token(&self) -> Option<String> {
        self.0.get("token").and_then(Value::as_str).and_then(non_blank)
    }

    /// Types the body; a mismatch is a 400.
    pub fn parse<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        serde_json::from_value(self.0).map_err(invalid_body)
    }
}

impl<S> FromRequest<S> for RawBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let JsonBody(value) = JsonBody::<Value>::from_request(req, state).await?;
        Ok(RawBody(value))
    }
}

// =============================================================================
// Path Id
// =============================================================================

/// A numeric id taken from the single path parameter.
///
/// `None` when the segment is not a positive integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathId(pub Option<u32>);

impl<S> FromRequestParts<S> for PathId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

        Ok(PathId(raw.trim().parse().ok().filter(|id| *id > 0)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request as HttpRequest;
    use serde_json::json;

    async fn bearer(req: HttpRequest<Body>) -> BearerToken {
        let (mut parts, _) = req.into_parts();
        BearerToken::from_request_parts(&mut parts, &()).await.unwrap()
    }

    fn token(value: &str) -> Option<String> {
        Some(value.to_string())
    }

    #[tokio::test]
    async fn test_header_body_query_precedence() {
        let req = HttpRequest::get("/api/my/orders?token=fromquery")
            .header(AUTHORIZATION, "Bearer fromheader")
            .body(Body::empty())
            .unwrap();
        let both = bearer(req).await;
        assert_eq!(both.clone().into_token(), token("fromheader"));
        assert_eq!(both.or_body(token("frombody")), token("fromheader"));

        let req = HttpRequest::get("/api/my/orders?token=fromquery")
            .body(Body::empty())
            .unwrap();
        let query_only = bearer(req).await;
        assert_eq!(query_only.clone().or_body(token("frombody")), token("frombody"));
        assert_eq!(query_only.clone().or_body(None), token("fromquery"));
        assert_eq!(query_only.into_token(), token("fromquery"));
    }

    #[tokio::test]
    async fn test_blank_token_is_absent() {
        let req = HttpRequest::get("/api/my/orders?token=")
            .header(AUTHORIZATION, "Bearer ")
            .body(Body::empty())
            .unwrap();
        let blank = bearer(req).await;
        assert_eq!(blank, BearerToken::default());
        assert_eq!(blank.clone().or_body(token(" ")), None);
        assert_eq!(blank.or_body(token("abc")), token("abc"));
    }

    #[tokio::test]
    async fn test_empty_body_reads_as_empty_object() {
        let req = HttpRequest::post("/").body(Body::empty()).unwrap();
        let JsonBody(value) = JsonBody::<Value>::from_request(req, &()).await.unwrap();
        assert_eq!(value, json!({}));
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let req = HttpRequest::post("/").body(Body::from("{oops")).unwrap();
        let err = JsonBody::<Value>::from_request(req, &()).await.unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_raw_body_defers_shape_errors() {
        let req = HttpRequest::post("/")
            .body(Body::from(r#"{"token": "abc", "items": "x"}"#))
            .unwrap();
        let body = RawBody::from_request(req, &()).await.unwrap();
        assert_eq!(body.token(), token("abc"));
        assert!(matches!(
            body.parse::<std::collections::HashMap<String, u32>>(),
            Err(ApiError::BadRequest(_))
        ));

        assert_eq!(RawBody(json!({ "token": 7 })).token(), None);
        assert_eq!(RawBody(json!([1, 2])).token(), None);
    }
}
