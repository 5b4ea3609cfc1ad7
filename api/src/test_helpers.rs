//! Scripted transport and identity doubles shared by unit tests.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};

use crate::config::ApiConfig;
use crate::error::{ApiError, IdentityError};
use crate::identity::{IdentityProvider, ProviderKind, TokenSource};
use crate::request::{ApiRequest, Method};
use crate::transport::{ApiResponse, Transport};
use crate::types::{Principal, SubscriptionStatus, User, UserRole};

pub const BASE_URL: &str = "http://api.test";

pub fn config() -> ApiConfig {
    ApiConfig::new(BASE_URL).unwrap()
}

pub enum Reply {
    Respond(Result<ApiResponse, ApiError>),
    /// Never completes.
    Hang,
}

/// Transport that answers from per-route queues and records every request.
#[derive(Default)]
pub struct ScriptedTransport {
    replies: RefCell<HashMap<String, VecDeque<Reply>>>,
    pub sent: RefCell<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    pub fn reply(&self, method: Method, path: &str, reply: Reply) -> &Self {
        self.replies
            .borrow_mut()
            .entry(route(method, path))
            .or_default()
            .push_back(reply);
        self
    }

    pub fn json(&self, method: Method, path: &str, status: u16, body: &serde_json::Value) -> &Self {
        self.reply(method, path, Reply::Respond(Ok(ApiResponse::new(status, body.to_string()))))
    }

    pub fn status(&self, method: Method, path: &str, status: u16) -> &Self {
        self.reply(method, path, Reply::Respond(Ok(ApiResponse::new(status, ""))))
    }

    pub fn calls(&self, method: Method, path: &str) -> usize {
        let url = format!("{BASE_URL}{path}");
        self.sent
            .borrow()
            .iter()
            .filter(|r| r.method == method && r.url == url)
            .count()
    }
}

fn route(method: Method, path: &str) -> String {
    format!("{} {BASE_URL}{path}", method.as_str())
}

#[async_trait::async_trait(?Send)]
impl Transport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let key = format!("{} {}", request.method.as_str(), request.url);
        self.sent.borrow_mut().push(request);
        let reply = self.replies.borrow_mut().get_mut(&key).and_then(VecDeque::pop_front);
        match reply {
            Some(Reply::Respond(result)) => result,
            Some(Reply::Hang) => futures::future::pending().await,
            None => Err(ApiError::Transport(format!("no scripted reply for {key}"))),
        }
    }
}

/// Identity provider holding a swappable token.
pub struct FakeIdentity {
    pub token: RefCell<Option<String>>,
    pub fail_refresh: Cell<bool>,
    pub sign_outs: Cell<usize>,
}

impl FakeIdentity {
    pub fn signed_in(token: &str) -> Self {
        Self {
            token: RefCell::new(Some(token.to_owned())),
            fail_refresh: Cell::new(false),
            sign_outs: Cell::new(0),
        }
    }

    pub fn signed_out() -> Self {
        Self { token: RefCell::new(None), fail_refresh: Cell::new(false), sign_outs: Cell::new(0) }
    }
}

impl TokenSource for FakeIdentity {
    fn current_token(&self) -> Option<String> {
        self.token.borrow().clone()
    }
}

#[async_trait::async_trait(?Send)]
impl IdentityProvider for FakeIdentity {
    async fn sign_in(&self, _kind: ProviderKind) -> Result<(), IdentityError> {
        Ok(())
    }

    async fn sign_out(&self) -> Result<(), IdentityError> {
        self.sign_outs.set(self.sign_outs.get() + 1);
        *self.token.borrow_mut() = None;
        Ok(())
    }

    async fn fresh_token(&self) -> Result<String, IdentityError> {
        if self.fail_refresh.get() {
            return Err(IdentityError::Provider("token refresh failed".to_owned()));
        }
        self.current_token().ok_or(IdentityError::NoSession)
    }
}

pub fn principal(uid: &str, email: &str) -> Principal {
    Principal {
        uid: uid.to_owned(),
        email: Some(email.to_owned()),
        display_name: None,
        photo_url: None,
        provider_id: "google.com".to_owned(),
    }
}

pub fn user(uid: &str, email: &str) -> User {
    User {
        id: uid.to_owned(),
        email: email.to_owned(),
        provider: "google.com".to_owned(),
        role: UserRole::Free,
        subscription_status: SubscriptionStatus::Active,
        created_at: "2025-01-01T00:00:00Z".to_owned(),
    }
}

pub fn user_json(uid: &str, email: &str) -> serde_json::Value {
    serde_json::to_value(user(uid, email)).unwrap()
}
