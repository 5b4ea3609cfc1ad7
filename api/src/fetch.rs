//! Three-state fetch results and the keyed resource cache behind data hooks.
//!
//! DESIGN
//! ======
//! A resource key is the request path (`/exams/pcd/sets`). The cache stores
//! raw JSON per key so one cache can serve every resource type; typed views
//! decode on read.
//!
//! Each key sees at most one logical GET: `begin` hands out a [`Ticket`] only
//! when nothing is cached or in flight for it. `refresh` and `invalidate` move
//! the key to a new generation, and a completion carrying an older ticket is
//! dropped, so a slow response can never overwrite a newer one.
//!
//! Requests are never aborted. A response for a key the view no longer shows
//! still lands in its own slot, which is harmless because views only read
//! their current key.

#[cfg(test)]
#[path = "fetch_test.rs"]
mod fetch_test;

use std::collections::HashMap;

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Result of a data fetch as seen by a view.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Fetch<T> {
    /// No response yet (or no request, when the key is unknown).
    #[default]
    Pending,
    Ready(T),
    Failed(ApiError),
}

impl<T> Fetch<T> {
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    #[must_use]
    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn into_ready(self) -> Option<T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&ApiError> {
        match self {
            Self::Failed(err) => Some(err),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Fetch<U> {
        match self {
            Self::Pending => Fetch::Pending,
            Self::Ready(value) => Fetch::Ready(f(value)),
            Self::Failed(err) => Fetch::Failed(err),
        }
    }

    /// Substitute a seed value until the real one is ready.
    ///
    /// For component previews and tests only; production views render
    /// `Pending` and `Failed` explicitly.
    #[must_use]
    pub fn or_seed(self, seed: T) -> T {
        match self {
            Self::Ready(value) => value,
            Self::Pending | Self::Failed(_) => seed,
        }
    }
}

impl<T> From<Result<T, ApiError>> for Fetch<T> {
    fn from(result: Result<T, ApiError>) -> Self {
        match result {
            Ok(value) => Self::Ready(value),
            Err(err) => Self::Failed(err),
        }
    }
}

/// Permission to complete one request for one key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ticket {
    key: String,
    generation: u64,
}

impl Ticket {
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }
}

#[derive(Clone, Debug)]
enum Slot {
    Empty,
    Ready(serde_json::Value),
    Failed(ApiError),
}

#[derive(Clone, Debug)]
struct Entry {
    generation: u64,
    in_flight: bool,
    slot: Slot,
}

/// Keyed response cache with request deduplication.
#[derive(Clone, Debug, Default)]
pub struct ResourceCache {
    entries: HashMap<String, Entry>,
    generation: u64,
}

impl ResourceCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the first request for `key`. Returns `None` when the key is
    /// already cached or in flight.
    pub fn begin(&mut self, key: &str) -> Option<Ticket> {
        if self.entries.contains_key(key) {
            return None;
        }
        let generation = self.next_generation();
        self.entries
            .insert(key.to_owned(), Entry { generation, in_flight: true, slot: Slot::Empty });
        tracing::trace!(%key, generation, "fetch started");
        Some(Ticket { key: key.to_owned(), generation })
    }

    /// Like [`begin`](Self::begin), but a settled failure is claimed again:
    /// the slot goes back to pending and a new ticket is issued. Ready and
    /// in-flight keys are left alone.
    pub fn begin_or_retry(&mut self, key: &str) -> Option<Ticket> {
        let retry = matches!(
            self.entries.get(key),
            Some(Entry { in_flight: false, slot: Slot::Failed(_), .. })
        );
        if !retry {
            return self.begin(key);
        }
        let generation = self.next_generation();
        self.entries
            .insert(key.to_owned(), Entry { generation, in_flight: true, slot: Slot::Empty });
        tracing::debug!(%key, generation, "retrying failed fetch");
        Some(Ticket { key: key.to_owned(), generation })
    }

    /// Start a new request for `key` even if one is cached. The current
    /// value stays visible until the new response lands.
    pub fn refresh(&mut self, key: &str) -> Ticket {
        let generation = self.next_generation();
        let entry = self
            .entries
            .entry(key.to_owned())
            .or_insert(Entry { generation, in_flight: true, slot: Slot::Empty });
        entry.generation = generation;
        entry.in_flight = true;
        tracing::trace!(%key, generation, "fetch refreshed");
        Ticket { key: key.to_owned(), generation }
    }

    /// Record a response. Returns `false` (and stores nothing) when the
    /// ticket was superseded by `refresh`, `invalidate`, or `clear`.
    pub fn complete(&mut self, ticket: Ticket, result: Result<serde_json::Value, ApiError>) -> bool {
        let Some(entry) = self.entries.get_mut(&ticket.key) else {
            tracing::debug!(key = %ticket.key, "discarding response for invalidated key");
            return false;
        };
        if entry.generation != ticket.generation {
            tracing::debug!(key = %ticket.key, "discarding superseded response");
            return false;
        }
        entry.in_flight = false;
        entry.slot = match result {
            Ok(value) => Slot::Ready(value),
            Err(err) => {
                tracing::warn!(key = %ticket.key, error = %err, "fetch failed");
                Slot::Failed(err)
            }
        };
        true
    }

    /// Typed view of `key`.
    #[must_use]
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Fetch<T> {
        match self.entries.get(key).map(|e| &e.slot) {
            None | Some(Slot::Empty) => Fetch::Pending,
            Some(Slot::Ready(value)) => match T::deserialize(value) {
                Ok(decoded) => Fetch::Ready(decoded),
                Err(err) => Fetch::Failed(ApiError::Decode(err.to_string())),
            },
            Some(Slot::Failed(err)) => Fetch::Failed(err.clone()),
        }
    }

    /// Whether `key` has a cached value, a recorded failure, or a request in
    /// flight. Hooks use this to avoid re-claiming a key they already own.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    #[must_use]
    pub fn is_in_flight(&self, key: &str) -> bool {
        self.entries.get(key).is_some_and(|e| e.in_flight)
    }

    /// Forget `key`; the next `begin` issues a new request.
    pub fn invalidate(&mut self, key: &str) {
        self.entries.remove(key);
    }

    /// Forget everything (e.g. on sign-out).
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }
}
