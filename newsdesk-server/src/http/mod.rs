//! HTTP server layer
//!
//! Axum server with:
//! - Open CORS on every response
//! - Request tracing
//! - Graceful shutdown
//! - JSON error responses

pub mod server;
pub mod error;
pub mod extractors;
pub mod routes;

pub use server::{build_router, run_server, AppState, Providers, ServerConfig, ServerError};
pub use error::ApiError;
