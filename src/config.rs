//! Configuration types.

use std::time::Duration;

use secrecy::SecretString;

use crate::error::ConfigError;

/// Default backend base URL, including the `/api` prefix.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";

/// Candidate API client configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Backend base URL, e.g. `http://localhost:8000/api`.
    pub base_url: String,
    /// Value for the backend's `server` header, if the deployment requires one.
    pub server_token: Option<SecretString>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            server_token: None,
            timeout: Duration::from_secs(30),
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = std::env::var("CANDIDATE_API_BASE_URL")
            .map(|s| s.trim().trim_end_matches('/').to_string())
            .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());

        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                key: "CANDIDATE_API_BASE_URL".into(),
                message: format!("expected an http(s) URL, got {base_url:?}"),
            });
        }

        let server_token = non_empty_env("CANDIDATE_API_SERVER_TOKEN").map(SecretString::from);

        let timeout_secs: u64 = std::env::var("CANDIDATE_API_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(30);

        Ok(Self {
            base_url,
            server_token,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

/// HTTP server configuration for the wizard REST surface.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let host = std::env::var("ONBOARDING_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 = std::env::var("ONBOARDING_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(8080);
        Self { host, port }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Read an env var, treating unset and whitespace-only as absent.
pub(crate) fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
