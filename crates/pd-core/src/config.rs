//! Client configuration
//!
//! A handful of environment values with defaults; `.env` loading is the
//! binary's concern, not this crate's.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default API base URL for local development
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api";

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// API base URL, e.g. `https://portal.example.com/api`
    pub base_url: String,

    /// Per-request timeout
    pub timeout: Duration,

    /// Fixed interval between status poll ticks
    pub poll_interval: Duration,

    /// How long a terminal poll result stays on screen before the watch
    /// output is cleared
    pub poll_display_delay: Duration,

    /// Where the file-backed session store persists tokens and the
    /// last-known user
    pub session_path: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            poll_interval: Duration::from_secs(3),
            poll_display_delay: Duration::from_secs(3),
            session_path: PathBuf::from(".paydesk/session.json"),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset or unparseable.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("PAYDESK_API_BASE_URL") {
            config.base_url = url;
        }
        if let Some(ms) = parse_ms("PAYDESK_API_TIMEOUT_MS") {
            config.timeout = ms;
        }
        if let Some(ms) = parse_ms("PAYDESK_POLL_INTERVAL_MS") {
            config.poll_interval = ms;
        }
        if let Ok(path) = std::env::var("PAYDESK_SESSION_PATH") {
            config.session_path = PathBuf::from(path);
        }

        config
    }
}

fn parse_ms(var: &str) -> Option<Duration> {
    std::env::var(var)
        .ok()
        .and_then(|v| v.parse().ok())
        .map(Duration::from_millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.poll_interval, Duration::from_secs(3));
    }

    #[test]
    fn test_from_env_overrides() {
        std::env::set_var("PAYDESK_API_BASE_URL", "https://portal.example.com/api");
        std::env::set_var("PAYDESK_API_TIMEOUT_MS", "5000");

        let config = ClientConfig::from_env();
        assert_eq!(config.base_url, "https://portal.example.com/api");
        assert_eq!(config.timeout, Duration::from_millis(5000));

        std::env::remove_var("PAYDESK_API_BASE_URL");
        std::env::remove_var("PAYDESK_API_TIMEOUT_MS");
    }

    #[test]
    fn test_from_env_bad_value_falls_back() {
        std::env::set_var("PAYDESK_POLL_INTERVAL_MS", "not-a-number");
        let config = ClientConfig::from_env();
        assert_eq!(config.poll_interval, Duration::from_secs(3));
        std::env::remove_var("PAYDESK_POLL_INTERVAL_MS");
    }
}
