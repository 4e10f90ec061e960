//! Header image generation endpoint
//!
//! `provider: "openai"` calls the image API; anything else returns a
//! stock photo URL for the topic.

use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use crate::http::error::ApiError;
use crate::http::extractors::JsonBody;
use crate::http::routes::endpoint;
use crate::http::server::AppState;
use crate::models::{Provider, Topic};

const STOCK_PHOTO_BASE: &str = "https://source.unsplash.com/1600x900/";

#[derive(Debug, Default, Deserialize)]
pub struct ImageRequest {
    pub topic: Option<String>,
    pub provider: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageResponse {
    pub image_url: String,
}

/// Stock photo URL searched by topic.
pub fn stock_photo_url(topic: &Topic) -> String {
    format!(
        "{STOCK_PHOTO_BASE}?{},news",
        urlencoding::encode(topic.as_str())
    )
}

/// POST /api/image-generate
async fn generate_image(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<ImageRequest>,
) -> Result<Json<ImageResponse>, ApiError> {
    let topic = Topic::parse(req.topic.as_deref())?;
    let provider = Provider::from_field(req.provider.as_deref());

    let image_url = match provider {
        Provider::OpenAi => {
            state
                .providers
                .openai()?
                .generate_image(topic.as_str())
                .await?
        }
        Provider::Fallback => stock_photo_url(&topic),
    };

    tracing::info!(provider = provider.as_str(), "image generated");
    Ok(Json(ImageResponse { image_url }))
}

/// Image generation routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/image-generate", endpoint(post(generate_image)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_url_encodes_topic() {
        let topic = Topic::parse(Some("solar & wind")).unwrap();
        assert_eq!(
            stock_photo_url(&topic),
            "https://source.unsplash.com/1600x900/?solar%20%26%20wind,news"
        );
    }
}
