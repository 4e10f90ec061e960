/// Structured error type for newsdesk-core.
///
/// The binary (newsdesk-cli) wraps these in `anyhow` with context;
/// the server maps them onto HTTP responses.
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    /// A required environment variable is not set (or is blank)
    #[error("missing required setting {name}")]
    MissingSetting { name: &'static str },

    /// An environment variable is set but cannot be parsed
    #[error("invalid value for {name}: '{value}' ({reason})")]
    InvalidSetting {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Result type alias for newsdesk-core operations
pub type Result<T> = std::result::Result<T, CoreError>;

impl CoreError {
    pub fn invalid(name: &'static str, value: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidSetting {
            name,
            value: value.into(),
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_setting_names_the_variable() {
        let err = CoreError::MissingSetting {
            name: "NEON_DATABASE_URL",
        };
        assert_eq!(err.to_string(), "missing required setting NEON_DATABASE_URL");
    }

    #[test]
    fn invalid_setting_display() {
        let err = CoreError::invalid("NEWSDESK_MAX_CONNECTIONS", "lots", "not a number");
        assert_eq!(
            err.to_string(),
            "invalid value for NEWSDESK_MAX_CONNECTIONS: 'lots' (not a number)"
        );
    }
}
