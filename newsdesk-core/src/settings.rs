//! Environment-driven configuration.
//!
//! Everything the service needs comes from environment variables (a `.env`
//! file is loaded by the binary before [`Settings::from_env`] runs).
//! Provider keys are optional at startup: a route whose provider is not
//! configured answers with a 500 naming the missing variable.

use std::net::SocketAddr;

use serde::Serialize;

use crate::error::{CoreError, Result};

pub const DATABASE_URL_VAR: &str = "NEON_DATABASE_URL";
pub const ADMIN_TOKEN_VAR: &str = "ADMIN_TOKEN";
pub const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";
pub const GEMINI_API_KEY_VAR: &str = "GEMINI_API_KEY";
pub const BRAVE_API_KEY_VAR: &str = "BRAVE_API_KEY";

const DEFAULT_BIND: &str = "127.0.0.1:8788";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// API keys for the outbound providers
#[derive(Clone, Default)]
pub struct ProviderKeys {
    pub openai: Option<String>,
    pub gemini: Option<String>,
    pub brave: Option<String>,
}

// Keys never show up in logs.
impl std::fmt::Debug for ProviderKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderKeys")
            .field("openai", &self.openai.is_some())
            .field("gemini", &self.gemini.is_some())
            .field("brave", &self.brave.is_some())
            .finish()
    }
}

/// Base URL overrides, mostly useful for pointing at mock servers
#[derive(Debug, Clone, Default)]
pub struct ProviderEndpoints {
    pub openai: Option<String>,
    pub gemini: Option<String>,
    pub brave: Option<String>,
}

/// Service configuration
#[derive(Clone)]
pub struct Settings {
    /// Postgres connection string (`NEON_DATABASE_URL`)
    pub database_url: Option<String>,
    /// Shared secret for `X-Admin-Token` (`ADMIN_TOKEN`)
    pub admin_token: Option<String>,
    pub keys: ProviderKeys,
    pub endpoints: ProviderEndpoints,
    /// Stored prompt used by the OpenAI article generator (`OPENAI_PROMPT_ID`)
    pub openai_prompt_id: Option<String>,
    /// Listen address (`NEWSDESK_BIND`, default 127.0.0.1:8788)
    pub bind_addr: SocketAddr,
    /// Pool size (`NEWSDESK_MAX_CONNECTIONS`, default 5)
    pub max_connections: u32,
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("database_url", &self.database_url.is_some())
            .field("admin_token", &self.admin_token.is_some())
            .field("keys", &self.keys)
            .field("endpoints", &self.endpoints)
            .field("openai_prompt_id", &self.openai_prompt_id)
            .field("bind_addr", &self.bind_addr)
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

impl Settings {
    /// Load settings from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load settings through an arbitrary lookup function.
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let bind_raw = get("NEWSDESK_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind_addr = bind_raw
            .parse::<SocketAddr>()
            .map_err(|e| CoreError::invalid("NEWSDESK_BIND", bind_raw.as_str(), e))?;

        let max_connections = match get("NEWSDESK_MAX_CONNECTIONS") {
            Some(raw) => match raw.parse::<u32>() {
                Ok(0) => return Err(CoreError::invalid("NEWSDESK_MAX_CONNECTIONS", raw, "must be at least 1")),
                Ok(n) => n,
                Err(e) => return Err(CoreError::invalid("NEWSDESK_MAX_CONNECTIONS", raw, e)),
            },
            None => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Self {
            database_url: get(DATABASE_URL_VAR),
            admin_token: get(ADMIN_TOKEN_VAR),
            keys: ProviderKeys {
                openai: get(OPENAI_API_KEY_VAR),
                gemini: get(GEMINI_API_KEY_VAR),
                brave: get(BRAVE_API_KEY_VAR),
            },
            endpoints: ProviderEndpoints {
                openai: get("OPENAI_BASE_URL"),
                gemini: get("GEMINI_BASE_URL"),
                brave: get("BRAVE_BASE_URL"),
            },
            openai_prompt_id: get("OPENAI_PROMPT_ID"),
            bind_addr,
            max_connections,
        })
    }

    /// Database URL or a `MissingSetting` error.
    pub fn require_database_url(&self) -> Result<&str> {
        self.database_url
            .as_deref()
            .ok_or(CoreError::MissingSetting {
                name: DATABASE_URL_VAR,
            })
    }

    /// Which settings are present, for `newsdesk config check`.
    pub fn report(&self) -> SettingsReport {
        SettingsReport {
            bind_addr: self.bind_addr.to_string(),
            max_connections: self.max_connections,
            database_url: self.database_url.is_some(),
            admin_token: self.admin_token.is_some(),
            openai_api_key: self.keys.openai.is_some(),
            gemini_api_key: self.keys.gemini.is_some(),
            brave_api_key: self.keys.brave.is_some(),
            openai_prompt_id: self.openai_prompt_id.clone(),
        }
    }
}

/// Secret-free summary of [`Settings`]
#[derive(Debug, Serialize)]
pub struct SettingsReport {
    pub bind_addr: String,
    pub max_connections: u32,
    pub database_url: bool,
    pub admin_token: bool,
    pub openai_api_key: bool,
    pub gemini_api_key: bool,
    pub brave_api_key: bool,
    pub openai_prompt_id: Option<String>,
}

impl SettingsReport {
    /// Variables that are unset, in a stable order.
    pub fn missing(&self) -> Vec<&'static str> {
        [
            (DATABASE_URL_VAR, self.database_url),
            (ADMIN_TOKEN_VAR, self.admin_token),
            (OPENAI_API_KEY_VAR, self.openai_api_key),
            (GEMINI_API_KEY_VAR, self.gemini_api_key),
            (BRAVE_API_KEY_VAR, self.brave_api_key),
        ]
        .into_iter()
        .filter_map(|(name, present)| (!present).then_some(name))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> Result<Settings> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn defaults_when_empty() {
        let s = settings(&[]).unwrap();
        assert_eq!(s.bind_addr.port(), 8788);
        assert_eq!(s.max_connections, DEFAULT_MAX_CONNECTIONS);
        assert!(s.database_url.is_none());
        assert!(s.admin_token.is_none());
        assert!(s.require_database_url().is_err());
    }

    #[test]
    fn blank_values_are_unset() {
        let s = settings(&[("ADMIN_TOKEN", "   "), ("OPENAI_API_KEY", "")]).unwrap();
        assert!(s.admin_token.is_none());
        assert!(s.keys.openai.is_none());
    }

    #[test]
    fn reads_all_variables() {
        let s = settings(&[
            ("NEON_DATABASE_URL", "postgres://u:p@db.example/news?sslmode=require"),
            ("ADMIN_TOKEN", "secret"),
            ("OPENAI_API_KEY", "sk-test"),
            ("GEMINI_API_KEY", "g-test"),
            ("BRAVE_API_KEY", "b-test"),
            ("NEWSDESK_BIND", "0.0.0.0:9000"),
            ("NEWSDESK_MAX_CONNECTIONS", "12"),
            ("BRAVE_BASE_URL", "http://localhost:1234"),
        ])
        .unwrap();

        assert_eq!(s.admin_token.as_deref(), Some("secret"));
        assert_eq!(s.bind_addr.port(), 9000);
        assert_eq!(s.max_connections, 12);
        assert_eq!(s.endpoints.brave.as_deref(), Some("http://localhost:1234"));
        assert!(s.report().missing().is_empty());
    }

    #[test]
    fn rejects_bad_bind_address() {
        let err = settings(&[("NEWSDESK_BIND", "not-an-addr")]).unwrap_err();
        assert!(matches!(err, CoreError::InvalidSetting { name: "NEWSDESK_BIND", .. }));
    }

    #[test]
    fn rejects_zero_connections() {
        let err = settings(&[("NEWSDESK_MAX_CONNECTIONS", "0")]).unwrap_err();
        assert!(err.to_string().contains("at least 1"));
    }

    #[test]
    fn debug_output_hides_secrets() {
        let s = settings(&[("ADMIN_TOKEN", "hunter2"), ("OPENAI_API_KEY", "sk-live")]).unwrap();
        let debug = format!("{s:?}");
        assert!(!debug.contains("hunter2"));
        assert!(!debug.contains("sk-live"));
    }

    #[test]
    fn report_lists_missing_keys() {
        let s = settings(&[("ADMIN_TOKEN", "t")]).unwrap();
        assert_eq!(
            s.report().missing(),
            vec!["NEON_DATABASE_URL", "OPENAI_API_KEY", "GEMINI_API_KEY", "BRAVE_API_KEY"]
        );
    }
}
