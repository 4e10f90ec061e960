//! Web search input

use super::validation::required;
use super::ValidationError;

/// Default number of results
const DEFAULT_LIMIT: u32 = 5;

/// Maximum results per request (Brave caps `count` at 20)
const MAX_LIMIT: u32 = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    pub fn parse(s: Option<&str>) -> Result<Self, ValidationError> {
        let query = required("query", s)?;
        Ok(Self(query.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Result count, clamped to 1..=20
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimit(u32);

impl SearchLimit {
    pub fn new(limit: Option<i64>) -> Self {
        match limit {
            Some(n) => Self(n.clamp(1, MAX_LIMIT as i64) as u32),
            None => Self(DEFAULT_LIMIT),
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_defaults_and_clamps() {
        assert_eq!(SearchLimit::new(None).get(), 5);
        assert_eq!(SearchLimit::new(Some(0)).get(), 1);
        assert_eq!(SearchLimit::new(Some(-3)).get(), 1);
        assert_eq!(SearchLimit::new(Some(10)).get(), 10);
        assert_eq!(SearchLimit::new(Some(500)).get(), 20);
    }

    #[test]
    fn query_required() {
        assert!(SearchQuery::parse(Some("")).is_err());
        assert_eq!(SearchQuery::parse(Some(" rust ")).unwrap().as_str(), "rust");
    }

    #[test]
    fn long_query_is_accepted() {
        let long = "q".repeat(1_000);
        assert_eq!(SearchQuery::parse(Some(&long)).unwrap().as_str(), long);
    }
}
