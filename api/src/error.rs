//! Error types for API calls, identity-provider calls, and configuration.
//!
//! ERROR HANDLING
//! ==============
//! `NotFound` and `Conflict` are expected outcomes during user sync and are
//! matched on by the session bridge. Everything else degrades the UI to an
//! empty or signed-out state and is logged, never raised to the user.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Failure of a single backend request.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("resource not found")]
    NotFound,
    #[error("resource already exists")]
    Conflict,
    #[error("unauthorized")]
    Unauthorized,
    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("invalid response body: {0}")]
    Decode(String),
    /// No transport on this target (e.g. server-side rendering).
    #[error("api not available in this environment")]
    Unavailable,
}

impl ApiError {
    /// Classify a non-success HTTP status.
    #[must_use]
    pub fn from_status(status: u16, body: impl Into<String>) -> Self {
        match status {
            401 => Self::Unauthorized,
            404 => Self::NotFound,
            409 => Self::Conflict,
            _ => Self::Status { status, body: body.into() },
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// Failure reported by the identity provider.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum IdentityError {
    #[error("identity provider error: {0}")]
    Provider(String),
    #[error("no active session")]
    NoSession,
    #[error("sign-in cancelled")]
    Cancelled,
}

/// Invalid API configuration.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("api base URL is empty")]
    EmptyBaseUrl,
    #[error("api base URL must start with http:// or https://: {0}")]
    InvalidBaseUrl(String),
}
