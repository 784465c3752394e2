//! Client configuration module
//! Resolves the backend location and transport settings for the API client

use crate::constants::{
    DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, ENV_API_URL, ENV_API_URL_FALLBACK,
    ENV_TIMEOUT_SECS, ENV_USER_AGENT,
};
use crate::error::{Result, TaskdeskError};
use std::env;
use std::time::Duration;
use url::Url;

/// Client configuration parameters
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the backend API, without the `/api` prefix
    pub api_url: Url,
    /// Per-request timeout
    pub timeout: Duration,
    /// User-Agent sent with every request
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: Url::parse(DEFAULT_API_URL).expect("default API URL is valid"),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ClientConfig {
    /// Configuration pointing at an explicit backend
    pub fn new(api_url: &str) -> Result<Self> {
        Ok(Self {
            api_url: Self::validate_api_url(api_url)?,
            ..Self::default()
        })
    }

    /// Override the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Point an existing configuration at another backend
    pub fn with_api_url(mut self, api_url: &str) -> Result<Self> {
        self.api_url = Self::validate_api_url(api_url)?;
        Ok(self)
    }

    /// Validate that the backend URL is usable as a base
    fn validate_api_url(raw: &str) -> Result<Url> {
        let url = Url::parse(raw.trim())?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(TaskdeskError::ConfigError(format!(
                "API URL must use http or https, got '{}'",
                url.scheme()
            )));
        }

        if url.cannot_be_a_base() || url.host_str().is_none() {
            return Err(TaskdeskError::ConfigError(format!(
                "API URL '{}' has no host",
                raw
            )));
        }

        if url.query().is_some() || url.fragment().is_some() {
            return Err(TaskdeskError::ConfigError(
                "API URL must not carry a query string or fragment".to_string(),
            ));
        }

        Ok(url)
    }

    /// Load configuration from environment variables if available
    pub fn from_env() -> Result<Self> {
        let api_url = env::var(ENV_API_URL)
            .or_else(|_| env::var(ENV_API_URL_FALLBACK))
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let timeout_secs = match env::var(ENV_TIMEOUT_SECS) {
            Ok(raw) => raw.parse::<u64>().map_err(|_| {
                TaskdeskError::ConfigError(format!(
                    "{} must be a whole number of seconds, got '{}'",
                    ENV_TIMEOUT_SECS, raw
                ))
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        if timeout_secs == 0 {
            return Err(TaskdeskError::ConfigError(format!(
                "{} must be greater than zero",
                ENV_TIMEOUT_SECS
            )));
        }

        let user_agent = env::var(ENV_USER_AGENT).unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string());

        Ok(Self {
            api_url: Self::validate_api_url(&api_url)?,
            timeout: Duration::from_secs(timeout_secs),
            user_agent,
        })
    }

    /// Resolve an absolute endpoint URL from an `/api/...` path
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        let base = self.api_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{}{}", base, path))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_points_at_localhost() {
        let config = ClientConfig::default();
        assert_eq!(config.api_url.as_str(), "http://localhost:8000/");
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        let result = ClientConfig::new("ftp://example.com");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("http or https"));
    }

    #[test]
    fn test_rejects_query_string() {
        assert!(ClientConfig::new("https://api.example.com/?debug=1").is_err());
    }

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let config = ClientConfig::new("https://api.example.com/").unwrap();
        assert_eq!(
            config.endpoint("/api/projects").unwrap().as_str(),
            "https://api.example.com/api/projects"
        );

        let nested = ClientConfig::new("https://example.com/taskdesk").unwrap();
        assert_eq!(
            nested.endpoint("/api/login").unwrap().as_str(),
            "https://example.com/taskdesk/api/login"
        );
    }
}
