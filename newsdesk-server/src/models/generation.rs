//! Inputs and output shaping for the AI generation routes

use super::validation::required;
use super::ValidationError;

/// Validated generation topic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic(String);

impl Topic {
    pub fn parse(s: Option<&str>) -> Result<Self, ValidationError> {
        let topic = required("topic", s)?;
        Ok(Self(topic.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Provider selected by the request's `provider` field.
///
/// Only `"openai"` is recognized; anything else, including a missing
/// field, selects the route's fallback path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    OpenAi,
    Fallback,
}

impl Provider {
    pub fn from_field(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("openai") => Self::OpenAi,
            _ => Self::Fallback,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Fallback => "fallback",
        }
    }
}

/// Split generated text into `(title, content)`.
///
/// The first non-empty line is the title, with markdown heading markers and
/// emphasis stars stripped. Everything after it, trimmed, is the content.
pub fn split_article(text: &str) -> (String, String) {
    let text = text.trim();
    let (first, rest) = match text.split_once('\n') {
        Some((first, rest)) => (first, rest),
        None => (text, ""),
    };

    let title = first
        .trim()
        .trim_start_matches('#')
        .trim()
        .trim_matches('*')
        .trim()
        .to_string();

    (title, rest.trim().to_string())
}
