//! Apply the database schema without starting the server

use anyhow::{Context, Result};
use clap::Parser;
use newsdesk_core::settings::DATABASE_URL_VAR;
use newsdesk_core::Settings;
use newsdesk_server::db::{create_pool_with_options, migrations};

#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// Database URL (overrides environment)
    #[arg(long, env = DATABASE_URL_VAR, hide_env_values = true)]
    pub database_url: Option<String>,
}

pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    let mut settings = Settings::from_env().context("Invalid configuration")?;
    if args.database_url.is_some() {
        settings.database_url = args.database_url;
    }

    let database_url = settings
        .require_database_url()
        .context("Set it via --database-url, the environment, or a .env file")?;

    let pool = create_pool_with_options(database_url, 1)
        .await
        .context("Failed to connect to database")?;

    migrations::run(&pool)
        .await
        .context("Failed to run migrations")?;

    pool.close().await;
    println!("✅ Schema is up to date");
    Ok(())
}
