//! newsdesk-server: HTTP API for the news site
//!
//! Exposes news post CRUD, newsletter subscriptions, and thin proxies in
//! front of AI generation (OpenAI, Gemini) and web search (Brave).

pub mod db;
pub mod http;
pub mod models;

pub use http::{build_router, run_server, AppState, ServerConfig};
