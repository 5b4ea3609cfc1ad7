//! Backend API configuration.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use crate::error::ConfigError;

/// Base URL used when none is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Environment variable naming the backend base URL.
pub const API_URL_ENV: &str = "NEARLINE_API_URL";

/// Where the exam API lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_API_URL.to_owned() }
    }
}

impl ApiConfig {
    /// Validate and normalize a base URL (trailing slashes are dropped).
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is empty or not `http(s)`.
    pub fn new(raw: &str) -> Result<Self, ConfigError> {
        let trimmed = raw.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(trimmed.to_owned()));
        }
        Ok(Self { base_url: trimmed.to_owned() })
    }

    /// Load from `NEARLINE_API_URL`, falling back to [`DEFAULT_API_URL`].
    ///
    /// # Errors
    ///
    /// Returns an error if the variable is set to an invalid URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var(API_URL_ENV) {
            Ok(raw) => Self::new(&raw),
            Err(_) => Ok(Self::default()),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join an absolute API path (`/exams`) onto the base URL.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }
}
