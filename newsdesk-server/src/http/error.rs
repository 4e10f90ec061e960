//! API error types with IntoResponse
//!
//! Every error becomes a JSON body `{"error": "..."}` with a matching status.

use axum::extract::rejection::{BytesRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use newsdesk_providers::ProviderError;
use serde_json::json;

use crate::db::repos::DbError;
use crate::models::ValidationError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Validation failed (400)
    Validation(ValidationError),

    /// Missing or wrong admin token (401)
    Unauthorized,

    /// Resource not found (404)
    NotFound { resource: &'static str },

    /// Route exists but not for this method (405)
    MethodNotAllowed,

    /// Provider needed by this request has no API key (500)
    NotConfigured { setting: &'static str },

    /// Upstream provider failed (502, provider message passed through)
    Upstream(ProviderError),

    /// Database error (500, logged)
    Database(DbError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
            Self::NotConfigured { .. } | Self::Database(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn message(&self) -> String {
        match self {
            Self::Validation(e) => e.to_string(),
            Self::Unauthorized => "Unauthorized".to_string(),
            Self::NotFound { resource } => format!("{resource} not found"),
            Self::MethodNotAllowed => "Method not allowed".to_string(),
            Self::NotConfigured { setting } => format!("{setting} is not configured"),
            Self::Upstream(e) => e.client_message(),
            Self::Database(_) => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            // Log the actual error, return generic message
            Self::Database(e) => tracing::error!("Database error: {}", e),
            Self::Upstream(e) => tracing::warn!("Upstream error: {}", e),
            Self::NotConfigured { setting } => {
                tracing::error!(setting, "request needs a provider that is not configured")
            }
            _ => {}
        }

        let body = json!({ "error": self.message() });
        (self.status(), Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { resource, .. } => Self::NotFound { resource },
            _ => Self::Database(e),
        }
    }
}

impl From<ProviderError> for ApiError {
    fn from(e: ProviderError) -> Self {
        Self::Upstream(e)
    }
}

impl From<QueryRejection> for ApiError {
    fn from(e: QueryRejection) -> Self {
        Self::Validation(ValidationError::Malformed {
            message: format!("Invalid query string: {}", e.body_text()),
        })
    }
}

impl From<BytesRejection> for ApiError {
    fn from(e: BytesRejection) -> Self {
        Self::Validation(ValidationError::Malformed {
            message: format!("Invalid request body: {}", e.body_text()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn validation_error_is_400() {
        let (status, body) =
            body_json(ApiError::Validation(ValidationError::Required { field: "title" })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "title is required");
    }

    #[tokio::test]
    async fn unauthorized_is_401() {
        let (status, body) = body_json(ApiError::Unauthorized).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Unauthorized");
    }

    #[tokio::test]
    async fn not_found_from_db_error() {
        let err = ApiError::from(DbError::NotFound {
            resource: "post",
            id: "42".into(),
        });
        let (status, body) = body_json(err).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "post not found");
    }

    #[tokio::test]
    async fn upstream_error_is_502_with_provider_message() {
        let err = ApiError::from(ProviderError::Api {
            provider: "openai",
            status: 429,
            message: "Rate limit reached".into(),
        });
        let (status, body) = body_json(err).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"], "Rate limit reached");
    }

    #[tokio::test]
    async fn database_errors_hide_details() {
        let (status, body) = body_json(ApiError::from(DbError::Sqlx(sqlx::Error::Protocol(
            "secret connection detail".into(),
        ))))
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Internal server error");
    }

    #[tokio::test]
    async fn not_configured_names_variable() {
        let (status, body) = body_json(ApiError::NotConfigured {
            setting: "BRAVE_API_KEY",
        })
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "BRAVE_API_KEY is not configured");
    }
}
