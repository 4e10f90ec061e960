//! Article generation endpoint
//!
//! `provider: "openai"` uses the Responses API with web search (and cites
//! sources); anything else, including no provider, goes to Gemini.

use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use newsdesk_providers::gemini::article_prompt;
use serde::{Deserialize, Serialize};

use crate::http::error::ApiError;
use crate::http::extractors::JsonBody;
use crate::http::routes::endpoint;
use crate::http::server::AppState;
use crate::models::{split_article, Provider, Topic};

#[derive(Debug, Default, Deserialize)]
pub struct GenerateRequest {
    pub topic: Option<String>,
    pub provider: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GeneratedNews {
    pub title: String,
    pub content: String,
    pub sources: Vec<String>,
}

impl GeneratedNews {
    fn from_text(topic: &Topic, text: &str, sources: Vec<String>) -> Self {
        let (title, content) = split_article(text);
        Self {
            // A heading made only of markup leaves nothing; the topic stands in.
            title: if title.is_empty() {
                topic.as_str().to_string()
            } else {
                title
            },
            content,
            sources,
        }
    }
}

/// POST /api/news-generate
async fn generate_news(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<GenerateRequest>,
) -> Result<Json<GeneratedNews>, ApiError> {
    let topic = Topic::parse(req.topic.as_deref())?;
    let provider = Provider::from_field(req.provider.as_deref());

    let (text, sources) = match provider {
        Provider::OpenAi => {
            let article = state
                .providers
                .openai()?
                .generate_article(topic.as_str())
                .await?;
            (article.text, article.sources)
        }
        Provider::Fallback => {
            let text = state
                .providers
                .gemini()?
                .generate_text(&article_prompt(topic.as_str()))
                .await?;
            (text, Vec::new())
        }
    };

    let news = GeneratedNews::from_text(&topic, &text, sources);
    tracing::info!(
        provider = provider.as_str(),
        sources = news.sources.len(),
        "article generated"
    );
    Ok(Json(news))
}

/// Article generation routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/news-generate", endpoint(post(generate_news)))
}
