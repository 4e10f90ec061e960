//! Brave Search API client

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{ProviderError, Result};
use crate::http::{join, read_json};

const PROVIDER: &str = "brave";

/// Default Brave Search API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.search.brave.com";

/// One search result, reshaped for API callers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub title: String,
    pub url: String,
    pub snippet: String,
}

#[derive(Clone)]
pub struct BraveClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl std::fmt::Debug for BraveClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BraveClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[derive(Deserialize)]
struct SearchResponse {
    web: Option<WebResults>,
}

#[derive(Deserialize)]
struct WebResults {
    #[serde(default)]
    results: Vec<WebResult>,
}

#[derive(Deserialize)]
struct WebResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    url: String,
    description: Option<String>,
}

impl From<WebResult> for SearchHit {
    fn from(r: WebResult) -> Self {
        Self {
            title: r.title,
            url: r.url,
            snippet: r.description.unwrap_or_default(),
        }
    }
}

impl BraveClient {
    pub fn new(client: Client, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Web search returning at most `count` hits.
    pub async fn search(&self, query: &str, count: u32) -> Result<Vec<SearchHit>> {
        tracing::debug!(provider = PROVIDER, count, "sending web search request");

        let response = self
            .client
            .get(join(&self.base_url, "res/v1/web/search"))
            .header("Accept", "application/json")
            .header("X-Subscription-Token", &self.api_key)
            .query(&[("q", query.to_string()), ("count", count.to_string())])
            .send()
            .await
            .map_err(|e| ProviderError::from_reqwest(PROVIDER, e))?;

        let body: SearchResponse = read_json(PROVIDER, response).await?;

        Ok(body
            .web
            .map(|web| web.results.into_iter().map(SearchHit::from).collect())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(server: &MockServer) -> BraveClient {
        BraveClient::new(Client::new(), "brave-key").with_base_url(server.uri())
    }

    #[tokio::test]
    async fn reshapes_web_results() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/res/v1/web/search"))
            .and(query_param("q", "rust async"))
            .and(query_param("count", "2"))
            .and(header("x-subscription-token", "brave-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "type": "search",
                "web": {"results": [
                    {"title": "Async Rust", "url": "https://a.example", "description": "The book", "age": "1 day"},
                    {"title": "Tokio", "url": "https://tokio.rs"}
                ]}
            })))
            .mount(&server)
            .await;

        let hits = test_client(&server).search("rust async", 2).await.unwrap();
        assert_eq!(
            hits,
            vec![
                SearchHit {
                    title: "Async Rust".into(),
                    url: "https://a.example".into(),
                    snippet: "The book".into(),
                },
                SearchHit {
                    title: "Tokio".into(),
                    url: "https://tokio.rs".into(),
                    snippet: String::new(),
                },
            ]
        );
    }

    #[tokio::test]
    async fn missing_web_section_means_no_results() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"type": "search"})))
            .mount(&server)
            .await;

        let hits = test_client(&server).search("nothing", 5).await.unwrap();
        assert!(hits.is_empty());
    }

    #[tokio::test]
    async fn quota_error_is_passed_through() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429).set_body_json(json!({
                "type": "ErrorResponse",
                "error": {"code": "RATE_LIMITED", "detail": "Request rate limit exceeded", "status": 429}
            })))
            .mount(&server)
            .await;

        let err = test_client(&server).search("x", 5).await.unwrap_err();
        assert!(matches!(err, ProviderError::Api { status: 429, .. }));
        assert_eq!(err.client_message(), "Request rate limit exceeded");
    }
}
