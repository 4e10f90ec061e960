//! Web search proxy endpoint

use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use newsdesk_providers::SearchHit;
use serde::{Deserialize, Serialize};

use crate::http::error::ApiError;
use crate::http::extractors::JsonBody;
use crate::http::routes::endpoint;
use crate::http::server::AppState;
use crate::models::{SearchLimit, SearchQuery};

#[derive(Debug, Default, Deserialize)]
pub struct WebSearchRequest {
    pub query: Option<String>,
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct WebSearchResponse {
    pub results: Vec<SearchHit>,
}

/// POST /api/web-search
async fn web_search(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<WebSearchRequest>,
) -> Result<Json<WebSearchResponse>, ApiError> {
    let query = SearchQuery::parse(req.query.as_deref())?;
    let limit = SearchLimit::new(req.limit);

    let results = state
        .providers
        .brave()?
        .search(query.as_str(), limit.get())
        .await?;

    tracing::debug!(count = results.len(), "web search complete");
    Ok(Json(WebSearchResponse { results }))
}

/// Web search routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/web-search", endpoint(post(web_search)))
}
