//! Backend API model and session plumbing shared by the Nearline UI and CLI.
//!
//! This crate owns everything that is not rendering: the wire records served by
//! the exam API, the per-request token attachment, the typed HTTP client, the
//! identity-provider seam, the session bridge that keeps a backend user in step
//! with the provider session, and the keyed resource cache behind the data hooks.
//!
//! It compiles for both native targets and `wasm32`. Futures are `?Send` because
//! the browser runtime is single-threaded.

pub mod client;
pub mod config;
pub mod error;
pub mod fetch;
#[cfg(any(test, feature = "fixtures"))]
pub mod fixtures;
pub mod identity;
pub mod request;
pub mod session;
#[cfg(test)]
pub(crate) mod test_helpers;
pub mod transport;
pub mod types;

pub use client::ApiClient;
pub use config::ApiConfig;
pub use error::{ApiError, ConfigError, IdentityError};
pub use fetch::{Fetch, ResourceCache, Ticket};
pub use identity::{IdentityProvider, ProviderKind, SessionEvent, TokenSource};
pub use request::{ApiRequest, Method};
pub use session::{Resolution, SessionBridge, SessionState};
pub use transport::{ApiResponse, Transport};
pub use types::{Exam, ExamSet, ExamSetStats, LatestAttempt, NewUser, Principal, User};
