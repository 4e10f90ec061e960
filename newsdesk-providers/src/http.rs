//! Shared request plumbing for the provider clients

use std::time::Duration;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use crate::error::{ProviderError, Result};

/// Default overall timeout for outbound calls.
/// Article generation overrides this per request.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Upper bound on how much of an error body is logged
const MAX_LOGGED_BODY: usize = 500;

/// Build the `reqwest::Client` shared by every provider.
pub fn build_http_client() -> Client {
    Client::builder()
        .timeout(DEFAULT_TIMEOUT)
        .user_agent(concat!("newsdesk/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to default HTTP client");
            Client::new()
        })
}

/// Turn a non-2xx response into `ProviderError::Api`, otherwise decode JSON.
pub(crate) async fn read_json<T: DeserializeOwned>(
    provider: &'static str,
    response: Response,
) -> Result<T> {
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        tracing::error!(
            provider,
            status = %status,
            body = %truncate(&body, MAX_LOGGED_BODY),
            "provider returned an error"
        );
        let message = error_message(&body).unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("upstream request failed")
                .to_string()
        });
        return Err(ProviderError::Api {
            provider,
            status: status.as_u16(),
            message,
        });
    }

    response
        .json::<T>()
        .await
        .map_err(|e| ProviderError::from_reqwest(provider, e))
}

/// Pull a human-readable message out of a provider error body.
///
/// Handles `{"error": {"message": ..}}` (OpenAI, Gemini),
/// `{"error": {"detail": ..}}` (Brave), `{"error": ".."}` and `{"message": ..}`.
pub(crate) fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let candidates = [
        value.pointer("/error/message"),
        value.pointer("/error/detail"),
        value.get("error").filter(|v| v.is_string()),
        value.get("message"),
    ];

    // Bound before returning: the chain borrows `value`.
    let found = candidates
        .into_iter()
        .flatten()
        .filter_map(|v| v.as_str())
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string);
    found
}

fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &s[..end])
}

pub(crate) fn join(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}
