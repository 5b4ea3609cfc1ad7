//! Typed client for the exam API.
//!
//! ERROR HANDLING
//! ==============
//! Non-2xx statuses are classified with [`ApiError::from_status`]. A 401 is
//! logged as a warning since it usually means the session token expired.

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::identity::TokenSource;
use crate::request::{ApiRequest, Method, path_segment};
use crate::transport::Transport;
use crate::types::{Exam, ExamSet, ExamSetStats, NewUser, User};

pub const CURRENT_USER_PATH: &str = "/users/me";
pub const USERS_PATH: &str = "/users";
pub const EXAMS_PATH: &str = "/exams";

#[must_use]
pub fn exam_path(exam_id: &str) -> String {
    format!("{EXAMS_PATH}/{}", path_segment(exam_id))
}

#[must_use]
pub fn exam_sets_path(exam_id: &str) -> String {
    format!("{}/sets", exam_path(exam_id))
}

#[must_use]
pub fn exam_set_stats_path(exam_id: &str) -> String {
    format!("{}/sets/stats", exam_path(exam_id))
}

/// Exam API client over a transport and a token source.
///
/// Holds no mutable state: each call builds its own request and reads the
/// token at that moment.
pub struct ApiClient<T, S> {
    config: ApiConfig,
    transport: T,
    tokens: S,
}

impl<T, S> ApiClient<T, S>
where
    T: Transport,
    S: TokenSource,
{
    pub fn new(config: ApiConfig, transport: T, tokens: S) -> Self {
        Self { config, transport, tokens }
    }

    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Build a request for `path`, attaching the bearer token if a session is live.
    #[must_use]
    pub fn build_request(&self, method: Method, path: &str) -> ApiRequest {
        ApiRequest::new(method, self.config.url(path)).authorized(&self.tokens)
    }

    async fn execute(&self, request: ApiRequest) -> Result<String, ApiError> {
        let method = request.method;
        let url = request.url.clone();
        let response = self.transport.send(request).await.inspect_err(|e| {
            tracing::warn!(method = method.as_str(), %url, error = %e, "request failed");
        })?;
        if response.is_success() {
            return Ok(response.body);
        }

        let err = ApiError::from_status(response.status, response.body);
        if err == ApiError::Unauthorized {
            tracing::warn!(method = method.as_str(), %url, "unauthorized; session token rejected");
        } else {
            tracing::debug!(method = method.as_str(), %url, status = response.status, "non-success response");
        }
        Err(err)
    }

    /// GET `path` and return the raw JSON body.
    ///
    /// # Errors
    ///
    /// Returns a transport, status, or decode error.
    pub async fn get_value(&self, path: &str) -> Result<serde_json::Value, ApiError> {
        let body = self.execute(self.build_request(Method::Get, path)).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// GET `path` and decode the body.
    ///
    /// # Errors
    ///
    /// Returns a transport, status, or decode error.
    pub async fn get_json<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        let body = self.execute(self.build_request(Method::Get, path)).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// POST a JSON body to `path` and decode the response.
    ///
    /// # Errors
    ///
    /// Returns a transport, status, or decode error.
    pub async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let request = self.build_request(Method::Post, path).json(body)?;
        let body = self.execute(request).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// `GET /users/me`.
    ///
    /// # Errors
    ///
    /// [`ApiError::NotFound`] when the backend has no record for this session yet.
    pub async fn current_user(&self) -> Result<User, ApiError> {
        self.get_json(CURRENT_USER_PATH).await
    }

    /// `POST /users`.
    ///
    /// # Errors
    ///
    /// [`ApiError::Conflict`] when a record for this identity already exists.
    pub async fn create_user(&self, body: &NewUser) -> Result<User, ApiError> {
        self.post_json(USERS_PATH, body).await
    }

    /// `GET /exams`.
    ///
    /// # Errors
    ///
    /// Returns a transport, status, or decode error.
    pub async fn exams(&self) -> Result<Vec<Exam>, ApiError> {
        self.get_json(EXAMS_PATH).await
    }

    /// `GET /exams/:id`.
    ///
    /// # Errors
    ///
    /// Returns a transport, status, or decode error.
    pub async fn exam(&self, exam_id: &str) -> Result<Exam, ApiError> {
        self.get_json(&exam_path(exam_id)).await
    }

    /// `GET /exams/:id/sets`.
    ///
    /// # Errors
    ///
    /// Returns a transport, status, or decode error.
    pub async fn exam_sets(&self, exam_id: &str) -> Result<Vec<ExamSet>, ApiError> {
        self.get_json(&exam_sets_path(exam_id)).await
    }

    /// `GET /exams/:id/sets/stats`.
    ///
    /// # Errors
    ///
    /// Returns a transport, status, or decode error.
    pub async fn exam_set_stats(&self, exam_id: &str) -> Result<Vec<ExamSetStats>, ApiError> {
        self.get_json(&exam_set_stats_path(exam_id)).await
    }
}
