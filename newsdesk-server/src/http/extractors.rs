//! Custom Axum extractors

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use super::server::AppState;
use crate::db::repos::Visibility;
use crate::models::ValidationError;

/// Header carrying the admin shared secret
pub const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

/// JSON body that ignores `Content-Type` and rejects with a JSON 400.
///
/// Browsers posting from the news site do not always set the header.
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await?;

        // An empty body is treated as `{}` so missing fields surface as field errors.
        let slice: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
            b"{}"
        } else {
            &bytes
        };

        let value = serde_json::from_slice(slice).map_err(|e| {
            ApiError::Validation(ValidationError::Malformed {
                message: format!("Invalid JSON body: {e}"),
            })
        })?;

        Ok(Self(value))
    }
}

/// Whether the request carries the configured admin token.
///
/// Never rejects; use [`RequireAdmin`] on write routes.
pub struct AdminAccess(pub bool);

impl FromRequestParts<Arc<AppState>> for AdminAccess {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let presented = parts
            .headers
            .get(ADMIN_TOKEN_HEADER)
            .and_then(|v| v.to_str().ok());

        Ok(Self(state.is_admin_token(presented)))
    }
}

/// Read visibility: every post for admin callers, published posts otherwise.
impl FromRequestParts<Arc<AppState>> for Visibility {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let AdminAccess(is_admin) = AdminAccess::from_request_parts(parts, state).await?;
        Ok(Visibility::for_admin(is_admin))
    }
}

/// Rejects with 401 unless the admin token matches.
///
/// Runs before any body extractor, so the body is never looked at.
pub struct RequireAdmin;

impl FromRequestParts<Arc<AppState>> for RequireAdmin {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let AdminAccess(is_admin) = AdminAccess::from_request_parts(parts, state).await?;
        if !is_admin {
            tracing::warn!(uri = %parts.uri, "rejected request without valid admin token");
            return Err(ApiError::Unauthorized);
        }
        Ok(Self)
    }
}
