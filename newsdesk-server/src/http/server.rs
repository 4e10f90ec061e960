//! Axum server setup
//!
//! Server skeleton with:
//! - Open CORS (`Access-Control-Allow-Origin: *`), the API is public
//! - Tracing middleware
//! - Graceful shutdown on SIGTERM/Ctrl+C

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{header, HeaderName, Method};
use axum::Router;
use newsdesk_core::settings::{BRAVE_API_KEY_VAR, GEMINI_API_KEY_VAR, OPENAI_API_KEY_VAR};
use newsdesk_core::Settings;
use newsdesk_providers::{build_http_client, BraveClient, GeminiClient, OpenAiClient};
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::error::ApiError;
use super::extractors::ADMIN_TOKEN_HEADER;
use super::routes;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 127.0.0.1:8788)
    pub bind_addr: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8788)),
        }
    }
}

impl From<&Settings> for ServerConfig {
    fn from(settings: &Settings) -> Self {
        Self {
            bind_addr: settings.bind_addr,
        }
    }
}

/// Outbound provider clients; `None` when the API key is not set
#[derive(Debug, Clone, Default)]
pub struct Providers {
    pub openai: Option<OpenAiClient>,
    pub gemini: Option<GeminiClient>,
    pub brave: Option<BraveClient>,
}

impl Providers {
    /// Build clients for every provider that has a key, sharing one HTTP client.
    pub fn from_settings(settings: &Settings) -> Self {
        let http = build_http_client();
        let endpoints = &settings.endpoints;

        let openai = settings.keys.openai.as_ref().map(|key| {
            let client = OpenAiClient::new(http.clone(), key.as_str())
                .with_prompt_id(settings.openai_prompt_id.clone());
            match &endpoints.openai {
                Some(base) => client.with_base_url(base.as_str()),
                None => client,
            }
        });

        let gemini = settings.keys.gemini.as_ref().map(|key| {
            let client = GeminiClient::new(http.clone(), key.as_str());
            match &endpoints.gemini {
                Some(base) => client.with_base_url(base.as_str()),
                None => client,
            }
        });

        let brave = settings.keys.brave.as_ref().map(|key| {
            let client = BraveClient::new(http.clone(), key.as_str());
            match &endpoints.brave {
                Some(base) => client.with_base_url(base.as_str()),
                None => client,
            }
        });

        Self {
            openai,
            gemini,
            brave,
        }
    }

    pub fn openai(&self) -> Result<&OpenAiClient, ApiError> {
        self.openai.as_ref().ok_or(ApiError::NotConfigured {
            setting: OPENAI_API_KEY_VAR,
        })
    }

    pub fn gemini(&self) -> Result<&GeminiClient, ApiError> {
        self.gemini.as_ref().ok_or(ApiError::NotConfigured {
            setting: GEMINI_API_KEY_VAR,
        })
    }

    pub fn brave(&self) -> Result<&BraveClient, ApiError> {
        self.brave.as_ref().ok_or(ApiError::NotConfigured {
            setting: BRAVE_API_KEY_VAR,
        })
    }
}

/// Shared application state
pub struct AppState {
    pub pool: PgPool,
    pub providers: Providers,
    admin_token: Option<String>,
}

impl AppState {
    pub fn new(pool: PgPool, admin_token: Option<String>, providers: Providers) -> Self {
        Self {
            pool,
            providers,
            admin_token,
        }
    }

    pub fn from_settings(pool: PgPool, settings: &Settings) -> Self {
        Self::new(
            pool,
            settings.admin_token.clone(),
            Providers::from_settings(settings),
        )
    }

    /// True only when an admin token is configured and `presented` equals it.
    pub fn is_admin_token(&self, presented: Option<&str>) -> bool {
        match (self.admin_token.as_deref(), presented) {
            (Some(expected), Some(given)) => expected == given,
            _ => false,
        }
    }
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static(ADMIN_TOKEN_HEADER)])
}

/// Build the application router with all routes.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(routes::health::router())
        .merge(routes::news::router())
        .merge(routes::subscribe::router())
        .merge(routes::image_generate::router())
        .merge(routes::news_generate::router())
        .merge(routes::web_search::router())
        .fallback(routes::not_found)
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the HTTP server.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool(&database_url).await?;
/// let state = AppState::from_settings(pool, &settings);
/// run_server(state, ServerConfig::from(&settings)).await?;
/// ```
pub async fn run_server(state: AppState, config: ServerConfig) -> Result<(), ServerError> {
    tracing::info!(
        openai = state.providers.openai.is_some(),
        gemini = state.providers.gemini.is_some(),
        brave = state.providers.brave.is_some(),
        admin = state.admin_token.is_some(),
        "providers configured"
    );

    let app = build_router(Arc::new(state));

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
