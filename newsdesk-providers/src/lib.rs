//! newsdesk-providers - outbound HTTP clients
//!
//! This crate provides:
//! - OpenAI client (image generation, Responses API article generation)
//! - Gemini client (`generateContent` text generation)
//! - Brave Search client (web search)
//!
//! ## Architecture
//!
//! ```text
//! handler → client.call(..) → reqwest → provider REST API
//!                                 ↓
//!                    non-2xx → ProviderError::Api { message from body }
//! ```
//!
//! Clients hold a shared `reqwest::Client` and never retry.

pub mod brave;
pub mod error;
pub mod gemini;
pub mod openai;

mod http;

pub use brave::{BraveClient, SearchHit};
pub use error::{ProviderError, Result};
pub use gemini::GeminiClient;
pub use openai::{GeneratedArticle, OpenAiClient};
pub use http::build_http_client;
