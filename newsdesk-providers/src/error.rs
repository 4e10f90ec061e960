//! Provider error types

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    /// Request could not be sent or the connection failed
    #[error("failed to reach {provider}: {message}")]
    Connection {
        provider: &'static str,
        message: String,
    },

    /// Request exceeded its deadline
    #[error("{provider} request timed out")]
    Timeout { provider: &'static str },

    /// Provider answered with a non-success status
    #[error("{provider} API error ({status}): {message}")]
    Api {
        provider: &'static str,
        status: u16,
        message: String,
    },

    /// Body did not match the expected shape
    #[error("unexpected response from {provider}: {message}")]
    InvalidResponse {
        provider: &'static str,
        message: String,
    },

    /// Provider answered successfully but produced nothing usable
    #[error("{provider} returned no {what}")]
    Empty {
        provider: &'static str,
        what: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, ProviderError>;

impl ProviderError {
    pub(crate) fn from_reqwest(provider: &'static str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout { provider }
        } else if err.is_decode() {
            Self::InvalidResponse {
                provider,
                message: err.to_string(),
            }
        } else {
            Self::Connection {
                provider,
                message: err.to_string(),
            }
        }
    }

    /// Message suitable for returning to API callers.
    ///
    /// Upstream API errors pass the provider's own message through.
    pub fn client_message(&self) -> String {
        match self {
            Self::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}
