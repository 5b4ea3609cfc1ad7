//! Per-request construction with bearer-token attachment.
//!
//! DESIGN
//! ======
//! There is no shared client with mutable default headers. Every outgoing
//! request is a fresh [`ApiRequest`] value, and the bearer credential is read
//! from the [`TokenSource`] at construction time, so a request built after
//! sign-out can never carry the previous session's token.

#[cfg(test)]
#[path = "request_test.rs"]
mod request_test;

use serde::Serialize;

use crate::error::ApiError;
use crate::identity::TokenSource;

pub const AUTHORIZATION: &str = "Authorization";
pub const CONTENT_TYPE: &str = "Content-Type";
pub const ACCEPT: &str = "Accept";
const JSON: &str = "application/json";

/// HTTP methods used by the exam API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

/// A fully-resolved outgoing request, ready for a [`crate::Transport`].
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl ApiRequest {
    #[must_use]
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self { method, url: url.into(), headers: vec![(ACCEPT.to_owned(), JSON.to_owned())], body: None }
    }

    /// Attach a JSON body and its content type.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Decode`] if the body cannot be serialized.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ApiError> {
        self.body = Some(serde_json::to_string(body)?);
        self.set_header(CONTENT_TYPE, JSON);
        Ok(self)
    }

    /// Set `Authorization: Bearer <token>` when the source has a live session;
    /// otherwise return the request untouched.
    #[must_use]
    pub fn authorized<S: TokenSource + ?Sized>(mut self, tokens: &S) -> Self {
        match tokens.current_token() {
            Some(token) if !token.is_empty() => {
                self.set_header(AUTHORIZATION, &format!("Bearer {token}"));
                tracing::trace!(url = %self.url, "attached bearer token");
            }
            _ => tracing::trace!(url = %self.url, "no active session; sending without credentials"),
        }
        self
    }

    /// First header value with this name (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// The bearer token carried by this request, if any.
    #[must_use]
    pub fn bearer(&self) -> Option<&str> {
        self.header(AUTHORIZATION)?.strip_prefix("Bearer ")
    }

    fn set_header(&mut self, name: &str, value: &str) {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.headers.push((name.to_owned(), value.to_owned()));
    }
}

/// Escape a caller-supplied id for use as one path segment.
#[must_use]
pub fn path_segment(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '%' => out.push_str("%25"),
            '/' => out.push_str("%2F"),
            '?' => out.push_str("%3F"),
            '#' => out.push_str("%23"),
            ' ' => out.push_str("%20"),
            _ => out.push(ch),
        }
    }
    out
}
