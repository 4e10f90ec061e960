//! HTTP server command
//!
//! Loads settings, connects to Postgres, applies the schema and serves the API.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;
use newsdesk_core::settings::DATABASE_URL_VAR;
use newsdesk_core::Settings;
use newsdesk_server::db::{create_pool_with_options, migrations};
use newsdesk_server::{run_server, AppState, ServerConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (default: 127.0.0.1:8788)
    #[arg(long, short = 'b', env = "NEWSDESK_BIND")]
    pub bind: Option<SocketAddr>,

    /// Database URL (overrides environment)
    #[arg(long, env = DATABASE_URL_VAR, hide_env_values = true)]
    pub database_url: Option<String>,

    /// Skip creating tables on startup
    #[arg(long)]
    pub no_migrate: bool,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let mut settings = Settings::from_env().context("Invalid configuration")?;
    if let Some(bind) = args.bind {
        settings.bind_addr = bind;
    }
    if args.database_url.is_some() {
        settings.database_url = args.database_url;
    }

    let database_url = settings
        .require_database_url()
        .context("Set it via --database-url, the environment, or a .env file")?;

    tracing::info!(
        bind = %settings.bind_addr,
        max_connections = settings.max_connections,
        "Starting newsdesk server"
    );

    let pool = create_pool_with_options(database_url, settings.max_connections)
        .await
        .context("Failed to create database pool")?;

    if args.no_migrate {
        tracing::info!("Skipping migrations (--no-migrate)");
    } else {
        migrations::run(&pool)
            .await
            .context("Failed to run migrations")?;
    }

    let config = ServerConfig::from(&settings);
    let state = AppState::from_settings(pool, &settings);

    // Blocks until shutdown
    run_server(state, config).await.context("Server error")?;

    Ok(())
}
