//! OpenAI client
//!
//! Two calls are used:
//! - `POST /v1/images/generations` for header images
//! - `POST /v1/responses` with web search and image tools for articles

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{ProviderError, Result};
use crate::http::{join, read_json};

const PROVIDER: &str = "openai";

/// Default `OpenAI` API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

const IMAGE_MODEL: &str = "dall-e-3";
const IMAGE_SIZE: &str = "1792x1024";
const ARTICLE_MODEL: &str = "gpt-4.1";

/// Deadline for article generation calls.
pub const ARTICLE_TIMEOUT: Duration = Duration::from_secs(25);

const ARTICLE_INSTRUCTIONS: &str = "You are a news writer. Research the topic using web search \
and write a short, factual news article. Put the headline alone on the first line, then the \
article body. Do not use markdown tables.";

/// Prompt sent to the image model for a topic.
pub fn image_prompt(topic: &str) -> String {
    format!(
        "A professional, editorial-style news illustration about: {topic}. \
         No text or lettering in the image."
    )
}

/// Generated article text plus the URLs the model cited
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedArticle {
    pub text: String,
    pub sources: Vec<String>,
}

/// `OpenAI` API client
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    base_url: String,
    prompt_id: Option<String>,
}

impl std::fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("base_url", &self.base_url)
            .field("prompt_id", &self.prompt_id)
            .finish_non_exhaustive()
    }
}

// -- Wire types --

#[derive(Serialize)]
struct ImageRequest<'a> {
    model: &'a str,
    prompt: String,
    n: u32,
    size: &'a str,
}

#[derive(Deserialize)]
struct ImageResponse {
    #[serde(default)]
    data: Vec<ImageData>,
}

#[derive(Deserialize)]
struct ImageData {
    url: Option<String>,
    b64_json: Option<String>,
}

#[derive(Serialize)]
struct ResponsesRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    prompt: Option<PromptRef<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    instructions: Option<&'a str>,
    input: String,
    tools: Vec<Tool>,
}

#[derive(Serialize)]
struct PromptRef<'a> {
    id: &'a str,
}

#[derive(Serialize)]
struct Tool {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct ResponsesResponse {
    #[serde(default)]
    output: Vec<OutputItem>,
}

#[derive(Deserialize)]
struct OutputItem {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    content: Vec<ContentPart>,
}

#[derive(Deserialize)]
struct ContentPart {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    annotations: Vec<Annotation>,
}

#[derive(Deserialize)]
struct Annotation {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    url: Option<String>,
}

impl OpenAiClient {
    pub fn new(client: Client, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            prompt_id: None,
        }
    }

    /// Point the client at another base URL (e.g. a proxy or mock server)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Use a stored prompt for article generation instead of inline instructions
    pub fn with_prompt_id(mut self, prompt_id: Option<String>) -> Self {
        self.prompt_id = prompt_id;
        self
    }

    /// Generate one image for `topic`.
    ///
    /// Returns the hosted URL, or a `data:` URL when the API answers with base64.
    pub async fn generate_image(&self, topic: &str) -> Result<String> {
        let request = ImageRequest {
            model: IMAGE_MODEL,
            prompt: image_prompt(topic),
            n: 1,
            size: IMAGE_SIZE,
        };

        tracing::debug!(provider = PROVIDER, model = IMAGE_MODEL, "sending image generation request");

        let response = self
            .client
            .post(join(&self.base_url, "images/generations"))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::from_reqwest(PROVIDER, e))?;

        let body: ImageResponse = read_json(PROVIDER, response).await?;

        body.data
            .into_iter()
            .find_map(|d| {
                d.url
                    .filter(|u| !u.is_empty())
                    .or_else(|| d.b64_json.map(|b64| format!("data:image/png;base64,{b64}")))
            })
            .ok_or(ProviderError::Empty {
                provider: PROVIDER,
                what: "image",
            })
    }

    /// Write an article about `topic` with web search and image tools enabled.
    pub async fn generate_article(&self, topic: &str) -> Result<GeneratedArticle> {
        let request = match &self.prompt_id {
            Some(id) => ResponsesRequest {
                model: None,
                prompt: Some(PromptRef { id }),
                instructions: None,
                input: topic.to_string(),
                tools: article_tools(),
            },
            None => ResponsesRequest {
                model: Some(ARTICLE_MODEL),
                prompt: None,
                instructions: Some(ARTICLE_INSTRUCTIONS),
                input: format!("Write a news article about: {topic}"),
                tools: article_tools(),
            },
        };

        tracing::debug!(
            provider = PROVIDER,
            stored_prompt = self.prompt_id.is_some(),
            "sending article generation request"
        );

        let response = self
            .client
            .post(join(&self.base_url, "responses"))
            .bearer_auth(&self.api_key)
            .timeout(ARTICLE_TIMEOUT)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::from_reqwest(PROVIDER, e))?;

        let body: ResponsesResponse = read_json(PROVIDER, response).await?;
        let article = collect_article(body);

        if article.text.trim().is_empty() {
            return Err(ProviderError::Empty {
                provider: PROVIDER,
                what: "text",
            });
        }

        Ok(article)
    }
}

fn article_tools() -> Vec<Tool> {
    vec![
        Tool {
            kind: "web_search_preview",
        },
        Tool {
            kind: "image_generation",
        },
    ]
}

/// Concatenate every `output_text` part and gather distinct citation URLs.
fn collect_article(body: ResponsesResponse) -> GeneratedArticle {
    let mut text = String::new();
    let mut sources: Vec<String> = Vec::new();

    let parts = body
        .output
        .into_iter()
        .filter(|item| item.kind == "message")
        .flat_map(|item| item.content)
        .filter(|part| part.kind == "output_text");

    for part in parts {
        if let Some(chunk) = part.text {
            text.push_str(&chunk);
        }
        for url in part
            .annotations
            .into_iter()
            .filter(|a| a.kind == "url_citation")
            .filter_map(|a| a.url)
        {
            if !sources.contains(&url) {
                sources.push(url);
            }
        }
    }

    GeneratedArticle { text, sources }
}
