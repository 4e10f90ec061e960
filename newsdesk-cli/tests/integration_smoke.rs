//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;

const VARS: [&str; 10] = [
    "NEON_DATABASE_URL",
    "ADMIN_TOKEN",
    "OPENAI_API_KEY",
    "GEMINI_API_KEY",
    "BRAVE_API_KEY",
    "OPENAI_PROMPT_ID",
    "NEWSDESK_BIND",
    "NEWSDESK_MAX_CONNECTIONS",
    "RUST_LOG",
    "OTEL_EXPORTER_OTLP_ENDPOINT",
];

/// `newsdesk` with none of its variables inherited from the test environment.
fn newsdesk() -> Command {
    let mut cmd = Command::cargo_bin("newsdesk").unwrap();
    for var in VARS {
        cmd.env_remove(var);
    }
    cmd
}

// === Help ===

#[test]
fn test_help_lists_commands() {
    newsdesk()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("migrate"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_serve_help() {
    newsdesk()
        .arg("serve")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Address to bind to"))
        .stdout(predicate::str::contains("--no-migrate"));
}

#[test]
fn test_config_check_help() {
    newsdesk()
        .arg("config")
        .arg("check")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Print the report as JSON"));
}

// === Config check ===

#[test]
fn test_config_check_reports_missing() {
    newsdesk()
        .arg("config")
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("✗ NEON_DATABASE_URL"))
        .stdout(predicate::str::contains("127.0.0.1:8788"));
}

#[test]
fn test_config_check_never_prints_secrets() {
    newsdesk()
        .env("ADMIN_TOKEN", "super-secret-admin")
        .env("OPENAI_API_KEY", "sk-very-secret")
        .arg("config")
        .arg("check")
        .arg("--json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"admin_token\": true"))
        .stdout(predicate::str::contains("\"openai_api_key\": true"))
        .stdout(predicate::str::contains("super-secret-admin").not())
        .stdout(predicate::str::contains("sk-very-secret").not());
}

#[test]
fn test_config_check_strict_fails_when_unset() {
    newsdesk()
        .arg("config")
        .arg("check")
        .arg("--strict")
        .assert()
        .failure()
        .stderr(predicate::str::contains("BRAVE_API_KEY"));
}

#[test]
fn test_invalid_bind_is_rejected() {
    newsdesk()
        .env("NEWSDESK_BIND", "not-an-address")
        .arg("config")
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("NEWSDESK_BIND"));
}

// === Serve ===

#[test]
fn test_serve_requires_database_url() {
    newsdesk()
        .arg("serve")
        .assert()
        .failure()
        .stderr(predicate::str::contains("NEON_DATABASE_URL"));
}
