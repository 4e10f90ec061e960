//! newsdesk CLI - runs the news site API
//!
//! - `serve`: HTTP API (news posts, subscriptions, generation and search proxies)
//! - `migrate`: create tables and indexes
//! - `config check`: show which environment variables are set

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

use tracing_setup::{LogFormat, TracingConfig};

#[derive(Parser, Debug)]
#[command(
    name = "newsdesk",
    author,
    version,
    about = "JSON API backend for a news site",
    long_about = "Serves news posts from Postgres, newsletter signups, AI-generated \
                  articles and header images, and a web search proxy."
)]
struct Cli {
    /// Debug logging (RUST_LOG still wins when set)
    #[arg(long, global = true)]
    debug: bool,

    /// Log line format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Compact)]
    log_format: LogFormat,

    /// Export traces over OTLP (needs the telemetry feature)
    #[arg(long, global = true)]
    otel: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Create database tables and indexes
    Migrate(commands::migrate::MigrateArgs),
    /// Inspect configuration
    Config(commands::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine; real environment variables win.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    tracing_setup::init(&TracingConfig {
        debug: cli.debug,
        format: cli.log_format,
        otel: cli.otel,
    })
    .ok();

    let result = match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await,
        Commands::Migrate(args) => commands::run_migrate(args).await,
        Commands::Config(args) => commands::run_config(args),
    };

    tracing_setup::shutdown_otel();
    result
}
