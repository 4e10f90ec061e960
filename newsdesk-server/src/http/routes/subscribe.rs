//! Newsletter subscription endpoint

use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use crate::db::repos::SubscriberRepo;
use crate::http::error::ApiError;
use crate::http::extractors::JsonBody;
use crate::http::routes::endpoint;
use crate::http::server::AppState;
use crate::models::EmailAddress;

#[derive(Debug, Default, Deserialize)]
pub struct SubscribeRequest {
    pub email: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscribeResponse {
    pub success: bool,
    pub message: &'static str,
    pub is_new: bool,
}

impl SubscribeResponse {
    fn new(is_new: bool) -> Self {
        Self {
            success: true,
            message: if is_new {
                "Subscribed successfully"
            } else {
                "Already subscribed"
            },
            is_new,
        }
    }
}

/// POST /api/subscribe
async fn subscribe(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<SubscribeRequest>,
) -> Result<Json<SubscribeResponse>, ApiError> {
    let email = EmailAddress::parse(req.email.as_deref())?;
    let is_new = SubscriberRepo::new(&state.pool).subscribe(&email).await?;

    tracing::info!(is_new, "newsletter subscription");
    Ok(Json(SubscribeResponse::new(is_new)))
}

/// Subscribe routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/subscribe", endpoint(post(subscribe)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_shape() {
        let json = serde_json::to_value(SubscribeResponse::new(false)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"success": true, "message": "Already subscribed", "isNew": false})
        );
    }

    #[test]
    fn repeat_subscription_is_still_success() {
        let first = SubscribeResponse::new(true);
        let second = SubscribeResponse::new(false);
        assert!(first.success && second.success);
        assert_eq!(first.message, "Subscribed successfully");
        assert!(first.is_new);
        assert!(!second.is_new);
    }
}
