//! # Tapsilat Configuration
//!
//! Connection settings for the Tapsilat API. A config value is handed to
//! [`crate::Client::new`]; there is no process-wide state.

use crate::retry::RetryPolicy;
use serde::Deserialize;
use std::env;
use std::time::Duration;
use tapsilat_core::OrderError;

const DEFAULT_TIMEOUT_MS: u64 = 30_000;
const DEFAULT_MAX_ATTEMPTS: u32 = 3;
const DEFAULT_RETRY_DELAY_MS: u64 = 1000;

/// Tapsilat API configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TapsilatConfig {
    /// API base URL, e.g. `https://acquiring.tapsilat.dev/api/v1`
    #[serde(default)]
    pub base_url: Option<String>,

    /// Bearer token
    #[serde(default)]
    pub api_token: Option<String>,

    /// Per-request timeout; `0` disables it
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Attempts per operation on network faults (including the first)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Base backoff delay; attempt `n` waits `n` times this
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

fn default_retry_delay_ms() -> u64 {
    DEFAULT_RETRY_DELAY_MS
}

impl Default for TapsilatConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            api_token: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_delay_ms: DEFAULT_RETRY_DELAY_MS,
        }
    }
}

impl TapsilatConfig {
    /// Create config with explicit values
    pub fn new(base_url: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            base_url: Some(base_url.into()),
            api_token: Some(api_token.into()),
            ..Default::default()
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Reads `TAPSILAT_BASE_URL` and `TAPSILAT_API_TOKEN`, plus the optional
    /// `TAPSILAT_TIMEOUT_MS`, `TAPSILAT_MAX_ATTEMPTS` and
    /// `TAPSILAT_RETRY_DELAY_MS`. Missing credentials are left unset;
    /// [`crate::Client::new`] reports them.
    pub fn from_env() -> Result<Self, OrderError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let mut config = Self {
            base_url: env::var("TAPSILAT_BASE_URL").ok(),
            api_token: env::var("TAPSILAT_API_TOKEN").ok(),
            ..Default::default()
        };

        if let Some(ms) = parse_env("TAPSILAT_TIMEOUT_MS")? {
            config.timeout_ms = ms;
        }
        if let Some(attempts) = parse_env("TAPSILAT_MAX_ATTEMPTS")? {
            config.max_attempts = attempts;
        }
        if let Some(ms) = parse_env("TAPSILAT_RETRY_DELAY_MS")? {
            config.retry_delay_ms = ms;
        }

        Ok(config)
    }

    /// Load configuration from a TOML document
    pub fn from_toml(toml_str: &str) -> Result<Self, OrderError> {
        toml::from_str(toml_str)
            .map_err(|e| OrderError::Configuration(format!("Invalid TOML config: {}", e)))
    }

    /// True when both the base URL and the API token are set
    pub fn is_configured(&self) -> bool {
        let set = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        set(&self.base_url) && set(&self.api_token)
    }

    /// Clear the base URL and API token
    pub fn reset(&mut self) {
        self.base_url = None;
        self.api_token = None;
    }

    /// Get authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.api_token.as_deref().unwrap_or_default())
    }

    /// Per-request timeout, `None` when disabled
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_ms > 0).then(|| Duration::from_millis(self.timeout_ms))
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_attempts, Duration::from_millis(self.retry_delay_ms))
    }

    /// Builder: set API base URL
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Builder: set API token
    pub fn with_api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// Builder: set request timeout; `Duration::ZERO` disables it
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = saturating_millis(timeout);
        self
    }

    /// Builder: set retry attempts and base delay
    pub fn with_retry(mut self, max_attempts: u32, base_delay: Duration) -> Self {
        self.max_attempts = max_attempts;
        self.retry_delay_ms = saturating_millis(base_delay);
        self
    }
}

fn saturating_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Result<Option<T>, OrderError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| OrderError::Configuration(format!("{} is not a valid number", key))),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_configured() {
        let config = TapsilatConfig::new("https://api.example.com", "token");
        assert!(config.is_configured());

        assert!(!TapsilatConfig::default().is_configured());
        assert!(!TapsilatConfig::default()
            .with_base_url("https://api.example.com")
            .is_configured());
        assert!(!TapsilatConfig::new("https://api.example.com", "  ").is_configured());
    }

    #[test]
    fn test_reset_clears_credentials() {
        let mut config = TapsilatConfig::new("https://api.example.com", "token");
        config.reset();

        assert_eq!(config.base_url, None);
        assert_eq!(config.api_token, None);
        assert!(!config.is_configured());
    }

    #[test]
    fn test_auth_header() {
        let config = TapsilatConfig::new("https://api.example.com", "tok_123");
        assert_eq!(config.auth_header(), "Bearer tok_123");
    }

    #[test]
    fn test_from_toml() {
        let config = TapsilatConfig::from_toml(
            r#"
            base_url = "https://api.example.com"
            api_token = "tok_123"
            max_attempts = 5
            "#,
        )
        .unwrap();

        assert!(config.is_configured());
        assert_eq!(config.max_attempts, 5);
        assert_eq!(config.timeout_ms, 30_000);
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.retry_delay_ms, 1000);

        let err = TapsilatConfig::from_toml("max_attempts = \"many\"").unwrap_err();
        assert!(matches!(err, OrderError::Configuration(_)));
    }

    #[test]
    fn test_retry_policy_from_config() {
        let config = TapsilatConfig::new("https://api.example.com", "tok")
            .with_retry(4, Duration::from_millis(250));
        let policy = config.retry_policy();

        assert_eq!(policy.max_attempts(), 4);
        assert_eq!(policy.delay_for(2), Duration::from_millis(500));
    }

    #[test]
    fn test_sub_second_timeout_is_kept() {
        let config = TapsilatConfig::new("https://api.example.com", "tok")
            .with_timeout(Duration::from_millis(500));
        assert_eq!(config.timeout_ms, 500);
        assert_eq!(config.timeout(), Some(Duration::from_millis(500)));

        let config = TapsilatConfig::from_toml("timeout_ms = 250").unwrap();
        assert_eq!(config.timeout(), Some(Duration::from_millis(250)));
    }

    #[test]
    fn test_zero_timeout_disables_it() {
        let config = TapsilatConfig::default().with_timeout(Duration::ZERO);
        assert_eq!(config.timeout(), None);
    }

    #[test]
    fn test_durations_saturate_instead_of_wrapping() {
        let config = TapsilatConfig::default()
            .with_timeout(Duration::MAX)
            .with_retry(3, Duration::MAX);
        assert_eq!(config.timeout_ms, u64::MAX);
        assert_eq!(config.retry_delay_ms, u64::MAX);
    }
}
