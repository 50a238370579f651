//! Client configuration
//!
//! A [`ClientConfig`] carries the endpoint, the access token and the HTTP
//! settings shared by every request. It can be built in code, read from the
//! environment, or loaded from YAML:
//!
//! ```yaml
//! access_token: "sandbox_xxx"
//! environment: sandbox
//! http:
//!   timeout_seconds: 30
//!   retries: 3
//!   retry_backoff:
//!     type: exponential
//!     initial_ms: 100
//!     max_ms: 5000
//! ```

use crate::error::{Error, Result};
use crate::types::{BackoffType, Environment};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Environment variable holding the access token
pub const ENV_ACCESS_TOKEN: &str = "GOCARDLESS_ACCESS_TOKEN";
/// Environment variable selecting `live` or `sandbox`
pub const ENV_ENVIRONMENT: &str = "GOCARDLESS_ENVIRONMENT";
/// Environment variable overriding the endpoint URL
pub const ENV_ENDPOINT: &str = "GOCARDLESS_ENDPOINT";

// ============================================================================
// Top-Level Client Config
// ============================================================================

/// Complete client configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Bearer token sent with every request
    pub access_token: String,

    /// Environment used to pick the default endpoint
    #[serde(default)]
    pub environment: Environment,

    /// Explicit endpoint, overriding the environment's
    #[serde(default)]
    pub endpoint: Option<String>,

    /// HTTP settings
    #[serde(default)]
    pub http: HttpConfig,

    /// User agent override
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl ClientConfig {
    /// Create a config for the live environment
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            environment: Environment::default(),
            endpoint: None,
            http: HttpConfig::default(),
            user_agent: None,
        }
    }

    /// Create a new config builder
    pub fn builder(access_token: impl Into<String>) -> ClientConfigBuilder {
        ClientConfigBuilder {
            config: Self::new(access_token),
        }
    }

    /// Read the config from `GOCARDLESS_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the config through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup(ENV_ACCESS_TOKEN)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| Error::missing_field(ENV_ACCESS_TOKEN))?;

        let mut config = Self::new(token);
        if let Some(env) = lookup(ENV_ENVIRONMENT) {
            config.environment = env.parse()?;
        }
        config.endpoint = lookup(ENV_ENDPOINT).filter(|e| !e.is_empty());
        config.validate()?;
        Ok(config)
    }

    /// Parse a config from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Check required fields and the endpoint URL
    pub fn validate(&self) -> Result<()> {
        if self.access_token.is_empty() {
            return Err(Error::missing_field("access_token"));
        }
        let url = url::Url::parse(self.endpoint())?;
        if url.cannot_be_a_base() {
            return Err(Error::config(format!(
                "endpoint '{}' cannot be used as a base URL",
                self.endpoint()
            )));
        }
        if self.http.timeout_seconds == 0 {
            return Err(Error::config("http.timeout_seconds must be at least 1"));
        }
        Ok(())
    }

    /// The endpoint requests are sent to
    pub fn endpoint(&self) -> &str {
        self.endpoint
            .as_deref()
            .unwrap_or_else(|| self.environment.endpoint())
    }

    /// The user agent sent with every request
    pub fn user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| format!("{}/{}", crate::NAME, crate::VERSION))
    }
}

// Keeps the token out of logs.
impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("access_token", &"<redacted>")
            .field("environment", &self.environment)
            .field("endpoint", &self.endpoint)
            .field("http", &self.http)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// Builder for client config
#[derive(Debug)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the environment
    pub fn environment(mut self, environment: Environment) -> Self {
        self.config.environment = environment;
        self
    }

    /// Set an explicit endpoint
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.config.endpoint = Some(endpoint.into());
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.http.timeout_seconds = timeout.as_secs().max(1);
        self
    }

    /// Set the default number of attempts per call
    pub fn retries(mut self, retries: u32) -> Self {
        self.config.http.retries = retries;
        self
    }

    /// Set backoff configuration
    pub fn backoff(mut self, backoff_type: BackoffType, initial: Duration, max: Duration) -> Self {
        self.config.http.retry_backoff = BackoffConfig {
            backoff_type,
            initial_ms: initial.as_millis() as u64,
            max_ms: max.as_millis() as u64,
        };
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = Some(agent.into());
        self
    }

    /// Build the config
    pub fn build(self) -> ClientConfig {
        self.config
    }
}

// ============================================================================
// HTTP Config
// ============================================================================

/// HTTP client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Total attempts per call, including the first
    #[serde(default = "default_retries")]
    pub retries: u32,

    /// Retry backoff configuration
    #[serde(default)]
    pub retry_backoff: BackoffConfig,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            retries: default_retries(),
            retry_backoff: BackoffConfig::default(),
        }
    }
}

impl HttpConfig {
    /// Request timeout as a duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

fn default_timeout() -> u64 {
    30
}

fn default_retries() -> u32 {
    3
}

/// Backoff configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackoffConfig {
    /// Type of backoff
    #[serde(rename = "type", default)]
    pub backoff_type: BackoffType,

    /// Delay before the first retry
    #[serde(default = "default_initial_ms")]
    pub initial_ms: u64,

    /// Upper bound on any single delay
    #[serde(default = "default_max_ms")]
    pub max_ms: u64,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            backoff_type: BackoffType::default(),
            initial_ms: default_initial_ms(),
            max_ms: default_max_ms(),
        }
    }
}

impl BackoffConfig {
    /// Delay to wait after the given zero-based failed attempt
    pub fn delay(&self, attempt: u32) -> Duration {
        let initial = Duration::from_millis(self.initial_ms);
        let delay = match self.backoff_type {
            BackoffType::Constant => initial,
            BackoffType::Linear => initial.saturating_mul(attempt.saturating_add(1)),
            BackoffType::Exponential => initial.saturating_mul(2u32.saturating_pow(attempt)),
        };

        std::cmp::min(delay, Duration::from_millis(self.max_ms))
    }
}

fn default_initial_ms() -> u64 {
    100
}

fn default_max_ms() -> u64 {
    5000
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_config_defaults() {
        let config = ClientConfig::new("token");
        assert_eq!(config.endpoint(), "https://api.gocardless.com");
        assert_eq!(config.http.retries, 3);
        assert_eq!(config.http.timeout(), Duration::from_secs(30));
        assert_eq!(config.http.retry_backoff.backoff_type, BackoffType::Exponential);
        assert!(config.user_agent().starts_with("gocardless-client/"));
    }

    #[test]
    fn test_config_builder() {
        let config = ClientConfig::builder("token")
            .environment(Environment::Sandbox)
            .timeout(Duration::from_secs(60))
            .retries(5)
            .backoff(
                BackoffType::Linear,
                Duration::from_millis(200),
                Duration::from_secs(2),
            )
            .user_agent("test-agent/1.0")
            .build();

        assert_eq!(config.endpoint(), "https://api-sandbox.gocardless.com");
        assert_eq!(config.http.timeout_seconds, 60);
        assert_eq!(config.http.retries, 5);
        assert_eq!(config.http.retry_backoff.initial_ms, 200);
        assert_eq!(config.http.retry_backoff.max_ms, 2000);
        assert_eq!(config.user_agent(), "test-agent/1.0");
    }

    #[test]
    fn test_explicit_endpoint_wins() {
        let config = ClientConfig::builder("token")
            .environment(Environment::Sandbox)
            .endpoint("http://localhost:8080")
            .build();
        assert_eq!(config.endpoint(), "http://localhost:8080");
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
access_token: "sandbox_abc"
environment: sandbox
http:
  retries: 4
  retry_backoff:
    type: constant
    initial_ms: 50
"#;

        let config = ClientConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.access_token, "sandbox_abc");
        assert_eq!(config.environment, Environment::Sandbox);
        assert_eq!(config.http.retries, 4);
        assert_eq!(config.http.timeout_seconds, 30);
        assert_eq!(config.http.retry_backoff.backoff_type, BackoffType::Constant);
        assert_eq!(config.http.retry_backoff.initial_ms, 50);
        assert_eq!(config.http.retry_backoff.max_ms, 5000);
    }

    #[test]
    fn test_parse_yaml_rejects_empty_token() {
        let err = ClientConfig::from_yaml_str("access_token: \"\"").unwrap_err();
        assert!(matches!(err, Error::MissingConfigField { .. }));
    }

    #[test]
    fn test_parse_yaml_rejects_bad_endpoint() {
        let yaml = "access_token: t\nendpoint: \"not a url\"";
        let err = ClientConfig::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }

    #[test]
    fn test_parse_yaml_rejects_zero_timeout() {
        let yaml = "access_token: t\nhttp:\n  timeout_seconds: 0";
        let err = ClientConfig::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "access_token: file_token\nenvironment: live").unwrap();

        let config = ClientConfig::from_file(file.path()).unwrap();
        assert_eq!(config.access_token, "file_token");
        assert_eq!(config.environment, Environment::Live);
    }

    #[test]
    fn test_from_lookup() {
        let vars: HashMap<&str, &str> = [
            (ENV_ACCESS_TOKEN, "env_token"),
            (ENV_ENVIRONMENT, "sandbox"),
        ]
        .into_iter()
        .collect();

        let config =
            ClientConfig::from_lookup(|key| vars.get(key).map(ToString::to_string)).unwrap();
        assert_eq!(config.access_token, "env_token");
        assert_eq!(config.endpoint(), "https://api-sandbox.gocardless.com");
    }

    #[test]
    fn test_from_lookup_missing_token() {
        let err = ClientConfig::from_lookup(|_| None).unwrap_err();
        assert!(matches!(err, Error::MissingConfigField { field } if field == ENV_ACCESS_TOKEN));
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = ClientConfig::new("super-secret");
        let debug_str = format!("{config:?}");
        assert!(!debug_str.contains("super-secret"));
        assert!(debug_str.contains("redacted"));
    }

    #[test]
    fn test_backoff_constant() {
        let backoff = BackoffConfig {
            backoff_type: BackoffType::Constant,
            initial_ms: 100,
            max_ms: 10_000,
        };
        assert_eq!(backoff.delay(0), Duration::from_millis(100));
        assert_eq!(backoff.delay(5), Duration::from_millis(100));
    }

    #[test]
    fn test_backoff_linear() {
        let backoff = BackoffConfig {
            backoff_type: BackoffType::Linear,
            initial_ms: 100,
            max_ms: 10_000,
        };
        assert_eq!(backoff.delay(0), Duration::from_millis(100));
        assert_eq!(backoff.delay(1), Duration::from_millis(200));
        assert_eq!(backoff.delay(2), Duration::from_millis(300));
    }

    #[test]
    fn test_backoff_exponential_respects_max() {
        let backoff = BackoffConfig {
            backoff_type: BackoffType::Exponential,
            initial_ms: 100,
            max_ms: 500,
        };
        assert_eq!(backoff.delay(0), Duration::from_millis(100));
        assert_eq!(backoff.delay(1), Duration::from_millis(200));
        assert_eq!(backoff.delay(2), Duration::from_millis(400));
        assert_eq!(backoff.delay(10), Duration::from_millis(500));
    }
}
