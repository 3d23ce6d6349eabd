//! Client configuration from environment variables.
//!
//! | Variable | Default |
//! |---|---|
//! | `EASY_EVENT_GRAPHQL_URL` | [`DEFAULT_ENDPOINT`] |
//! | `EASY_EVENT_REQUEST_TIMEOUT_SECS` | no timeout |
//! | `EASY_EVENT_LOG` | [`DEFAULT_LOG_FILTER`] |
//!
//! A `.env` file in the working directory is loaded first, if present.

use easy_event_graphql::DEFAULT_ENDPOINT;
use std::time::Duration;
use thiserror::Error;

/// Endpoint variable
pub const GRAPHQL_URL_VAR: &str = "EASY_EVENT_GRAPHQL_URL";
/// Request timeout variable, in whole seconds
pub const REQUEST_TIMEOUT_VAR: &str = "EASY_EVENT_REQUEST_TIMEOUT_SECS";
/// `tracing` filter variable
pub const LOG_VAR: &str = "EASY_EVENT_LOG";

/// Filter used when `EASY_EVENT_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "easy_event=info,easy_event_graphql=warn";

/// Configuration error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A variable could not be parsed
    #[error("Failed to parse {var}: {reason}")]
    Parse {
        /// Offending variable
        var: &'static str,
        /// What was wrong with it
        reason: String,
    },
    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    Validation(String),
}

/// Settings of the headless client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// GraphQL endpoint
    pub graphql_url: String,
    /// Per-request timeout, none by default
    pub request_timeout: Option<Duration>,
    /// `tracing_subscriber::EnvFilter` directives
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            graphql_url: DEFAULT_ENDPOINT.to_string(),
            request_timeout: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl AppConfig {
    /// Load from the process environment (and `.env`)
    ///
    /// # Errors
    ///
    /// Returns error if a variable is malformed or the result is invalid
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load using `lookup` to read variables
    ///
    /// # Errors
    ///
    /// Returns error if a variable is malformed or the result is invalid
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(GRAPHQL_URL_VAR) {
            config.graphql_url = url.trim().to_string();
        }

        if let Some(secs) = lookup(REQUEST_TIMEOUT_VAR) {
            let secs = secs.trim().parse::<u64>().map_err(|e| ConfigError::Parse {
                var: REQUEST_TIMEOUT_VAR,
                reason: e.to_string(),
            })?;
            config.request_timeout = Some(Duration::from_secs(secs));
        }

        if let Some(filter) = lookup(LOG_VAR) {
            config.log_filter = filter;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns error if configuration is invalid
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.graphql_url.starts_with("http://") || self.graphql_url.starts_with("https://"))
        {
            return Err(ConfigError::Validation(format!(
                "graphql_url must be an http(s) URL, got {:?}",
                self.graphql_url
            )));
        }
        if self.request_timeout == Some(Duration::ZERO) {
            return Err(ConfigError::Validation(
                "request timeout must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_without_variables() {
        let config = AppConfig::from_lookup(lookup(&[]));
        assert_eq!(config, Ok(AppConfig::default()));
    }

    #[test]
    fn variables_override_defaults() {
        let config = AppConfig::from_lookup(lookup(&[
            (GRAPHQL_URL_VAR, " https://api.example.com/graphql "),
            (REQUEST_TIMEOUT_VAR, "15"),
            (LOG_VAR, "debug"),
        ]));
        assert_eq!(
            config,
            Ok(AppConfig {
                graphql_url: "https://api.example.com/graphql".to_string(),
                request_timeout: Some(Duration::from_secs(15)),
                log_filter: "debug".to_string(),
            })
        );
    }

    #[test]
    fn malformed_timeout_is_reported() {
        let config = AppConfig::from_lookup(lookup(&[(REQUEST_TIMEOUT_VAR, "soon")]));
        assert!(matches!(
            config,
            Err(ConfigError::Parse {
                var: REQUEST_TIMEOUT_VAR,
                ..
            })
        ));
    }

    #[test]
    fn zero_timeout_is_invalid() {
        let config = AppConfig::from_lookup(lookup(&[(REQUEST_TIMEOUT_VAR, "0")]));
        assert!(matches!(config, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn endpoint_must_be_http() {
        let config = AppConfig::from_lookup(lookup(&[(GRAPHQL_URL_VAR, "localhost:8000")]));
        assert!(matches!(config, Err(ConfigError::Validation(_))));
    }
}
