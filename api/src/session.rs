//! Session bridge: identity-provider session → backend user → request pipeline.
//!
//! SYSTEM CONTEXT
//! ==============
//! The identity provider pushes [`SessionEvent`]s into a channel. The bridge
//! consumes them one at a time and publishes [`SessionState`] transitions to a
//! sink (a reactive signal in the browser, stdout in the CLI).
//!
//! STATE MACHINE
//! =============
//! ```text
//!  Loading ──SignedOut──► Unauthenticated ◄──────────────┐
//!     │                        │                         │ failure
//!     └──SignedIn──► Resolving(principal) ──────────────┤
//!                              │ found / created / adopted
//!                              ▼
//!                  Authenticated { principal, user }
//! ```
//! Any event may arrive in any state. The last event wins: a resolution still
//! in flight when the next event arrives is dropped without publishing.
//!
//! User resolution tries `GET /users/me`; on 404 it creates the user; on a
//! create conflict it re-fetches exactly once. There is no other retry.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::pin::pin;

use futures::future::{Either, select};
use futures::{Stream, StreamExt};

use crate::client::ApiClient;
use crate::error::{ApiError, IdentityError};
use crate::identity::{IdentityProvider, SessionEvent, TokenSource};
use crate::transport::Transport;
use crate::types::{Principal, User};

/// Observable authentication state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SessionState {
    /// No provider event has arrived yet.
    #[default]
    Loading,
    Unauthenticated,
    /// Signed in with the provider; backend user not resolved yet.
    Resolving(Principal),
    Authenticated { principal: Principal, user: User },
}

impl SessionState {
    #[must_use]
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Authenticated { user, .. } => Some(user),
            _ => None,
        }
    }

    #[must_use]
    pub fn principal(&self) -> Option<&Principal> {
        match self {
            Self::Resolving(principal) | Self::Authenticated { principal, .. } => Some(principal),
            Self::Loading | Self::Unauthenticated => None,
        }
    }

    /// True until the bridge has settled on a user or on no user.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading | Self::Resolving(_))
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }

    #[must_use]
    pub fn is_settled(&self) -> bool {
        !self.is_loading()
    }
}

/// Outcome of resolving the backend user for a principal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// `GET /users/me` succeeded.
    Found(User),
    /// The user was missing and `POST /users` created it.
    Created(User),
    /// Create hit a conflict and the single re-fetch succeeded.
    Adopted(User),
    /// A terminal failure; the session resolves to no user.
    Failed(String),
}

impl Resolution {
    #[must_use]
    pub fn into_user(self) -> Option<User> {
        match self {
            Self::Found(user) | Self::Created(user) | Self::Adopted(user) => Some(user),
            Self::Failed(_) => None,
        }
    }

    fn into_state(self, principal: Principal) -> SessionState {
        match self.into_user() {
            Some(user) => SessionState::Authenticated { principal, user },
            None => SessionState::Unauthenticated,
        }
    }
}

/// Resolve (fetching, creating, or adopting) the backend user for `principal`.
///
/// The API client reads its bearer token from the same provider, so once the
/// token refresh succeeds every request below carries it.
pub async fn resolve_user<T, S, I>(api: &ApiClient<T, S>, identity: &I, principal: &Principal) -> Resolution
where
    T: Transport,
    S: TokenSource,
    I: IdentityProvider + ?Sized,
{
    if let Err(e) = identity.fresh_token().await {
        tracing::error!(uid = %principal.uid, error = %e, "failed to obtain session token");
        return Resolution::Failed(e.to_string());
    }

    match api.current_user().await {
        Ok(user) => Resolution::Found(user),
        Err(ApiError::NotFound) => create_or_adopt(api, principal).await,
        Err(e) => {
            tracing::error!(uid = %principal.uid, error = %e, "failed to fetch user profile");
            Resolution::Failed(e.to_string())
        }
    }
}

async fn create_or_adopt<T, S>(api: &ApiClient<T, S>, principal: &Principal) -> Resolution
where
    T: Transport,
    S: TokenSource,
{
    let Some(body) = principal.new_user() else {
        tracing::error!(uid = %principal.uid, "user not found in backend and session has no email to create one");
        return Resolution::Failed("session has no email".to_owned());
    };

    tracing::info!(uid = %principal.uid, provider = %body.provider, "user not found in backend, creating");
    match api.create_user(&body).await {
        Ok(user) => Resolution::Created(user),
        Err(ApiError::Conflict) => {
            tracing::info!(uid = %principal.uid, "user already exists (conflict), retrying fetch");
            match api.current_user().await {
                Ok(user) => Resolution::Adopted(user),
                Err(e) => {
                    tracing::error!(uid = %principal.uid, error = %e, "retry fetch failed");
                    Resolution::Failed(e.to_string())
                }
            }
        }
        Err(e) => {
            tracing::error!(uid = %principal.uid, error = %e, "failed to create user");
            Resolution::Failed(e.to_string())
        }
    }
}

/// End the provider session. The provider follows up with
/// [`SessionEvent::SignedOut`], which the running bridge turns into
/// [`SessionState::Unauthenticated`].
///
/// # Errors
///
/// Returns the provider's error; the session is left as it was.
pub async fn sign_out<I: IdentityProvider + ?Sized>(identity: &I) -> Result<(), IdentityError> {
    identity.sign_out().await.inspect_err(|e| {
        tracing::error!(error = %e, "logout failed");
    })
}

enum Step {
    Settled,
    Superseded(SessionEvent),
}

/// Drives [`SessionState`] from a stream of provider events.
pub struct SessionBridge<I, T, S, F> {
    identity: I,
    api: ApiClient<T, S>,
    publish: F,
    state: SessionState,
}

impl<I, T, S, F> SessionBridge<I, T, S, F>
where
    I: IdentityProvider,
    T: Transport,
    S: TokenSource,
    F: FnMut(&SessionState),
{
    pub fn new(identity: I, api: ApiClient<T, S>, publish: F) -> Self {
        Self { identity, api, publish, state: SessionState::Loading }
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Consume events until the stream ends.
    pub async fn run<E>(&mut self, mut events: E)
    where
        E: Stream<Item = SessionEvent> + Unpin,
    {
        let mut pending = events.next().await;
        while let Some(event) = pending.take() {
            pending = match self.handle(event, &mut events).await {
                Step::Settled => events.next().await,
                Step::Superseded(next) => Some(next),
            };
        }
        tracing::debug!("session event stream closed");
    }

    async fn handle<E>(&mut self, event: SessionEvent, events: &mut E) -> Step
    where
        E: Stream<Item = SessionEvent> + Unpin,
    {
        let principal = match event {
            SessionEvent::SignedOut => {
                tracing::info!("session ended");
                self.set(SessionState::Unauthenticated);
                return Step::Settled;
            }
            SessionEvent::SignedIn(principal) => principal,
        };

        tracing::info!(uid = %principal.uid, "session started; resolving backend user");
        self.set(SessionState::Resolving(principal.clone()));

        let outcome = {
            let resolve = pin!(resolve_user(&self.api, &self.identity, &principal));
            match select(resolve, events.next()).await {
                Either::Left((resolution, _)) => Ok(resolution),
                // Stream closed mid-resolution: nothing can supersede it, so finish.
                Either::Right((None, resolve)) => Ok(resolve.await),
                Either::Right((Some(next), _)) => Err(next),
            }
        };

        match outcome {
            Ok(resolution) => {
                self.set(resolution.into_state(principal));
                Step::Settled
            }
            Err(next) => {
                tracing::debug!(uid = %principal.uid, "resolution superseded by newer session event");
                Step::Superseded(next)
            }
        }
    }

    fn set(&mut self, state: SessionState) {
        if self.state == state {
            return;
        }
        self.state = state;
        (self.publish)(&self.state);
    }
}
