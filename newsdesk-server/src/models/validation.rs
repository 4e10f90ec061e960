//! Validation error types

use std::fmt;

/// Validation error for domain models
#[derive(Debug, Clone)]
pub enum ValidationError {
    /// Field is missing or blank when it shouldn't be
    Required { field: &'static str },

    /// String doesn't match required format (e.g., email)
    InvalidFormat { field: &'static str, reason: &'static str },

    /// Request body or query string could not be decoded
    Malformed { message: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required { field } => write!(f, "{} is required", field),
            Self::InvalidFormat { field, reason } => {
                write!(f, "{}: {}", field, reason)
            }
            Self::Malformed { message } => f.write_str(message),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Trim `value` and reject it when missing or blank.
pub(crate) fn required<'a>(
    field: &'static str,
    value: Option<&'a str>,
) -> Result<&'a str, ValidationError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(ValidationError::Required { field })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::InvalidFormat {
            field: "email",
            reason: "a valid email address is required",
        };
        assert_eq!(err.to_string(), "email: a valid email address is required");
        assert_eq!(
            ValidationError::Required { field: "email" }.to_string(),
            "email is required"
        );
    }

    #[test]
    fn required_trims_and_rejects_blank() {
        assert_eq!(required("x", Some("  hi ")).unwrap(), "hi");
        assert!(required("x", Some("   ")).is_err());
        assert!(required("x", None).is_err());
    }
}
