//! Subscriber email validation

use super::validation::required;
use super::ValidationError;

/// Normalized (trimmed, lowercased) email address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Parse and normalize; the only format rule is that an `@` is present.
    ///
    /// # Example
    /// ```
    /// use newsdesk_server::models::EmailAddress;
    ///
    /// let email = EmailAddress::parse(Some(" Reader@Example.COM ")).unwrap();
    /// assert_eq!(email.as_str(), "reader@example.com");
    /// assert!(EmailAddress::parse(Some("nobody")).is_err());
    /// ```
    pub fn parse(s: Option<&str>) -> Result<Self, ValidationError> {
        let email = required("email", s)?;

        if !email.contains('@') {
            return Err(ValidationError::InvalidFormat {
                field: "email",
                reason: "a valid email address is required",
            });
        }

        Ok(Self(email.to_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
