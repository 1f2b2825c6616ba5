//! Shared session context
//!
//! One context is created per process and handed to every screen and
//! flow. It replaces per-screen "is logged in" flags: the current session
//! lives in a `watch` channel, so every subscriber sees the latest value
//! and intermediate values may be skipped.
//!
//! Each change bumps a generation counter. A slow identity check remembers
//! the generation it started at and only publishes if nothing else was
//! published in between, which makes the most recent identity event win.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::debug;

use crate::api::Identity;

/// Proof of an authenticated identity held by the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque session token (the backend's session cookie value)
    pub token: String,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    pub established_at: DateTime<Utc>,
}

impl Session {
    pub fn new(token: impl Into<String>, identity: Identity) -> Self {
        Self {
            token: token.into(),
            username: identity.username,
            email: identity.email,
            established_at: Utc::now(),
        }
    }

    /// Identifier the backend scopes link lists by
    pub fn identifier(&self) -> &str {
        &self.username
    }

    /// What screens show as "Logged in as"
    pub fn display_name(&self) -> &str {
        self.email.as_deref().unwrap_or(&self.username)
    }
}

/// Push-style notification from the identity source
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityEvent {
    SignedIn(Session),
    SignedOut,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub session: Option<Session>,
    pub generation: u64,
}

#[derive(Clone)]
pub struct SessionContext {
    tx: Arc<watch::Sender<SessionSnapshot>>,
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionContext {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(SessionSnapshot {
            session: None,
            generation: 0,
        });
        Self { tx: Arc::new(tx) }
    }

    pub fn current(&self) -> Option<Session> {
        self.tx.borrow().session.clone()
    }

    pub fn is_signed_in(&self) -> bool {
        self.tx.borrow().session.is_some()
    }

    pub fn generation(&self) -> u64 {
        self.tx.borrow().generation
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.tx.borrow().clone()
    }

    /// Receiver notified on every change
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.tx.subscribe()
    }

    /// Apply an identity event unconditionally; returns the new generation
    pub fn publish(&self, event: IdentityEvent) -> u64 {
        let mut generation = 0;
        self.tx.send_modify(|snapshot| {
            snapshot.session = match event {
                IdentityEvent::SignedIn(session) => Some(session),
                IdentityEvent::SignedOut => None,
            };
            snapshot.generation += 1;
            generation = snapshot.generation;
        });
        debug!("Identity event published (generation {})", generation);
        generation
    }

    /// Publish the outcome of a check that started at generation `since`
    ///
    /// Returns `false` (and changes nothing) when another event was
    /// published after the check started.
    pub fn publish_if_unchanged(&self, since: u64, session: Option<Session>) -> bool {
        let applied = self.tx.send_if_modified(|snapshot| {
            if snapshot.generation != since {
                return false;
            }
            snapshot.session = session;
            snapshot.generation += 1;
            true
        });
        if !applied {
            debug!("Discarding stale identity check (started at generation {})", since);
        }
        applied
    }
}
