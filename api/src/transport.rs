//! HTTP transport seam.
//!
//! The browser uses `gloo-net`, the CLI uses `reqwest`, and tests use scripted
//! in-memory transports. All of them only move bytes; status classification and
//! decoding live in [`crate::ApiClient`].

use std::rc::Rc;

use crate::error::ApiError;
use crate::request::ApiRequest;

/// Raw response: status code and body text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait::async_trait(?Send)]
pub trait Transport {
    /// Send one request. Only connection-level failures are errors here;
    /// non-2xx statuses come back as responses.
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError>;
}

#[async_trait::async_trait(?Send)]
impl<T: Transport + ?Sized> Transport for &T {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        (**self).send(request).await
    }
}

#[async_trait::async_trait(?Send)]
impl<T: Transport + ?Sized> Transport for Rc<T> {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        (**self).send(request).await
    }
}
