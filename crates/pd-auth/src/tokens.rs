//! Access/refresh token pair

use serde::{Deserialize, Serialize};

/// Bearer credential pair: a short-lived access token renewed through the
/// long-lived refresh token. Both are opaque strings to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthTokens {
    pub access: String,
    pub refresh: String,
}

impl AuthTokens {
    pub fn new(access: impl Into<String>, refresh: impl Into<String>) -> Self {
        Self {
            access: access.into(),
            refresh: refresh.into(),
        }
    }

    /// Authorization header value for the current access token
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.access)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_format() {
        let tokens = AuthTokens::new("abc123", "def456");
        assert_eq!(tokens.bearer(), "Bearer abc123");
    }
}
