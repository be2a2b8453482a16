//! Client error types
//!
//! Errors fall into two user-facing families: network/API failures whose
//! messages are surfaced verbatim, and validation failures raised before a
//! request is issued.

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

/// Error type for all PayDesk client operations
#[derive(Error, Debug)]
pub enum Error {
    /// Transport-level failure: connect, timeout, body read.
    #[error("network error: {0}")]
    Network(String),

    /// Non-2xx API response. The message is extracted from the response body
    /// and surfaced verbatim.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// A 401 that survived the refresh flow (the retried request was also
    /// rejected).
    #[error("not authorized")]
    Unauthorized,

    /// The refresh exchange failed or no refresh token was held. All local
    /// session state has been cleared; the caller must sign in again.
    #[error("session expired, sign in again")]
    SessionExpired,

    /// Client-side field checks failed before submission.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// The response body did not match the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),

    #[error("configuration error: {0}")]
    Config(String),

    /// Session persistence failure (file store read/write).
    #[error("session storage error: {0}")]
    Session(String),
}

impl Error {
    /// HTTP status of an API failure, if this error carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::Unauthorized => Some(401),
            _ => None,
        }
    }

    /// Whether the caller should re-authenticate before retrying.
    pub fn requires_login(&self) -> bool {
        matches!(self, Error::Unauthorized | Error::SessionExpired)
    }
}

/// Field-level validation errors collected before a request is sent
#[derive(Debug, Default, Clone)]
pub struct ValidationErrors {
    /// Field-specific errors: field_name -> error messages
    pub errors: HashMap<String, Vec<String>>,
    /// Errors not tied to a specific field
    pub base_errors: Vec<String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    pub fn add_base(&mut self, message: impl Into<String>) {
        self.base_errors.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.base_errors.is_empty()
    }

    /// Check if there are errors for a specific field
    pub fn has_error(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    /// Get errors for a specific field
    pub fn get(&self, field: &str) -> Option<&Vec<String>> {
        self.errors.get(field)
    }

    pub fn merge(&mut self, other: ValidationErrors) {
        for (field, messages) in other.errors {
            self.errors.entry(field).or_default().extend(messages);
        }
        self.base_errors.extend(other.base_errors);
    }

    pub fn full_messages(&self) -> Vec<String> {
        let mut messages = self.base_errors.clone();
        for (field, field_messages) in &self.errors {
            for msg in field_messages {
                messages.push(format!("{} {}", field, msg));
            }
        }
        messages
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.full_messages().join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

impl From<validator::ValidationErrors> for ValidationErrors {
    fn from(source: validator::ValidationErrors) -> Self {
        let mut errors = ValidationErrors::new();
        for (field, field_errors) in source.field_errors() {
            for err in field_errors {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| err.code.to_string());
                // validator stores struct-level (schema) errors under "__all__"
                if field == "__all__" {
                    errors.add_base(message);
                } else {
                    errors.add(field, message);
                }
            }
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_query() {
        let mut errors = ValidationErrors::new();
        assert!(errors.is_empty());

        errors.add("amount", "must be positive");
        errors.add_base("request is incomplete");

        assert!(!errors.is_empty());
        assert!(errors.has_error("amount"));
        assert_eq!(errors.get("amount").unwrap().len(), 1);
    }

    #[test]
    fn test_merge() {
        let mut a = ValidationErrors::new();
        a.add("amount", "must be positive");

        let mut b = ValidationErrors::new();
        b.add("amount", "too many decimal places");
        b.add("phone_number", "is required");

        a.merge(b);
        assert_eq!(a.get("amount").unwrap().len(), 2);
        assert!(a.has_error("phone_number"));
    }

    #[test]
    fn test_full_messages() {
        let mut errors = ValidationErrors::new();
        errors.add("email", "is required for Paystack payments");
        let messages = errors.full_messages();
        assert_eq!(messages, vec!["email is required for Paystack payments"]);
    }

    #[test]
    fn test_requires_login() {
        assert!(Error::SessionExpired.requires_login());
        assert!(Error::Unauthorized.requires_login());
        assert!(!Error::Network("timed out".into()).requires_login());
    }

    #[test]
    fn test_api_error_status() {
        let err = Error::Api {
            status: 404,
            message: "Invoice not found".into(),
        };
        assert_eq!(err.status(), Some(404));
        assert!(err.to_string().contains("Invoice not found"));
    }
}
