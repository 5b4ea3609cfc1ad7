//! Identity-provider seam.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser binds this to the hosted identity SDK; the CLI binds it to a
//! static token. Session changes flow out of the provider as [`SessionEvent`]s
//! on a channel consumed by [`crate::SessionBridge`].

use std::rc::Rc;
use std::sync::Arc;

use crate::error::IdentityError;
use crate::types::Principal;

/// Synchronous read of the current session token.
///
/// Implementations must return the provider's latest token on every call and
/// `None` once the session is gone.
pub trait TokenSource {
    fn current_token(&self) -> Option<String>;
}

impl<T: TokenSource + ?Sized> TokenSource for Rc<T> {
    fn current_token(&self) -> Option<String> {
        (**self).current_token()
    }
}

impl<T: TokenSource + ?Sized> TokenSource for Arc<T> {
    fn current_token(&self) -> Option<String> {
        (**self).current_token()
    }
}

impl<T: TokenSource + ?Sized> TokenSource for &T {
    fn current_token(&self) -> Option<String> {
        (**self).current_token()
    }
}

/// Sign-in methods offered on the login page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProviderKind {
    Google,
    GitHub,
    Apple,
}

impl ProviderKind {
    /// Provider id as reported on principals (e.g. `"google.com"`).
    #[must_use]
    pub fn provider_id(self) -> &'static str {
        match self {
            Self::Google => "google.com",
            Self::GitHub => "github.com",
            Self::Apple => "apple.com",
        }
    }
}

/// A change in the identity provider's session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    SignedIn(Principal),
    SignedOut,
}

impl From<Option<Principal>> for SessionEvent {
    fn from(principal: Option<Principal>) -> Self {
        principal.map_or(Self::SignedOut, Self::SignedIn)
    }
}

/// Operations the app needs from the identity provider.
#[async_trait::async_trait(?Send)]
pub trait IdentityProvider: TokenSource {
    /// Run the interactive sign-in flow. The resulting session arrives as a
    /// [`SessionEvent::SignedIn`] on the subscription channel.
    async fn sign_in(&self, kind: ProviderKind) -> Result<(), IdentityError>;

    /// End the session. A [`SessionEvent::SignedOut`] follows.
    async fn sign_out(&self) -> Result<(), IdentityError>;

    /// Force-refresh and return the current session token.
    async fn fresh_token(&self) -> Result<String, IdentityError>;
}

#[async_trait::async_trait(?Send)]
impl<T: IdentityProvider + ?Sized> IdentityProvider for &T {
    async fn sign_in(&self, kind: ProviderKind) -> Result<(), IdentityError> {
        (**self).sign_in(kind).await
    }

    async fn sign_out(&self) -> Result<(), IdentityError> {
        (**self).sign_out().await
    }

    async fn fresh_token(&self) -> Result<String, IdentityError> {
        (**self).fresh_token().await
    }
}

#[async_trait::async_trait(?Send)]
impl<T: IdentityProvider + ?Sized> IdentityProvider for Rc<T> {
    async fn sign_in(&self, kind: ProviderKind) -> Result<(), IdentityError> {
        (**self).sign_in(kind).await
    }

    async fn sign_out(&self) -> Result<(), IdentityError> {
        (**self).sign_out().await
    }

    async fn fresh_token(&self) -> Result<String, IdentityError> {
        (**self).fresh_token().await
    }
}
