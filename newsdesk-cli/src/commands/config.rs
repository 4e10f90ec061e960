//! Inspect configuration without printing secrets

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use newsdesk_core::settings::SettingsReport;
use newsdesk_core::Settings;

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show which environment variables are configured
    Check(CheckArgs),
}

#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Exit non-zero when any variable is unset
    #[arg(long)]
    pub strict: bool,
}

pub fn run_config(args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Check(args) => run_check(args),
    }
}

fn run_check(args: CheckArgs) -> Result<()> {
    let settings = Settings::from_env().context("Invalid configuration")?;
    let report = settings.report();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    let missing = report.missing();
    if args.strict && !missing.is_empty() {
        anyhow::bail!("unset: {}", missing.join(", "));
    }
    Ok(())
}

fn mark(present: bool) -> &'static str {
    if present {
        "✓"
    } else {
        "✗"
    }
}

fn print_report(report: &SettingsReport) {
    println!("🔍 newsdesk configuration");
    println!("   bind address:     {}", report.bind_addr);
    println!("   max connections:  {}", report.max_connections);
    println!("   {} NEON_DATABASE_URL", mark(report.database_url));
    println!("   {} ADMIN_TOKEN", mark(report.admin_token));
    println!("   {} OPENAI_API_KEY", mark(report.openai_api_key));
    println!("   {} GEMINI_API_KEY", mark(report.gemini_api_key));
    println!("   {} BRAVE_API_KEY", mark(report.brave_api_key));
    if let Some(prompt) = &report.openai_prompt_id {
        println!("   OPENAI_PROMPT_ID: {}", prompt);
    }

    let missing = report.missing();
    if missing.is_empty() {
        println!("\n✅ All variables set");
    } else {
        println!("\n⚠️  Routes needing these will fail: {}", missing.join(", "));
    }
}
