//! Route handlers, one module per endpoint

pub mod health;
pub mod news;
pub mod subscribe;
pub mod image_generate;
pub mod news_generate;
pub mod web_search;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::routing::MethodRouter;

use super::error::ApiError;
use super::server::AppState;

/// Add OPTIONS and a JSON 405 fallback to an endpoint's method router.
///
/// The CORS layer answers OPTIONS before it reaches the handler; the
/// explicit route keeps OPTIONS a 200 even without that layer.
pub(crate) fn endpoint(methods: MethodRouter<Arc<AppState>>) -> MethodRouter<Arc<AppState>> {
    methods.options(preflight).fallback(method_not_allowed)
}

async fn preflight() -> StatusCode {
    StatusCode::OK
}

async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

/// Fallback for unknown paths
pub(crate) async fn not_found() -> ApiError {
    ApiError::NotFound { resource: "route" }
}
