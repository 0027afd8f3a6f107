// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session context: the persisted bearer token, the tab-scoped logged-in flag
//! and the last-update timestamp sent with every API request.
//!
//! A `Session` is created per browser request from its cookies and handed
//! explicitly to the resolver, the services and the page handlers. Clones
//! share the same state, so a logout performed deep inside a service is
//! visible to the handler that writes the cookies back.

use chrono::Utc;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct SessionState {
    token: Option<String>,
    logged_in: bool,
    last_update: Option<i64>,
}

/// Shared session context.
#[derive(Debug, Default, Clone)]
pub struct Session {
    state: Arc<Mutex<SessionState>>,
}

impl Session {
    /// An empty (logged-out) session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a session from persisted parts (the browser cookies).
    pub fn restore(token: Option<String>, logged_in: bool, last_update: Option<i64>) -> Self {
        let token = token.filter(|t| !t.trim().is_empty());
        Self {
            state: Arc::new(Mutex::new(SessionState {
                token,
                logged_in,
                last_update,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store a freshly issued token and flag this browser session as logged in.
    pub fn set_session(&self, token: impl Into<String>) {
        let mut state = self.lock();
        state.token = Some(token.into());
        state.logged_in = true;
        state.last_update = Some(Utc::now().timestamp_millis());
    }

    /// Forget the token, the flag and the last-update timestamp.
    pub fn clear_session(&self) {
        *self.lock() = SessionState::default();
    }

    pub fn has_token(&self) -> bool {
        self.lock()
            .token
            .as_deref()
            .is_some_and(|t| !t.trim().is_empty())
    }

    pub fn is_session_flagged(&self) -> bool {
        self.lock().logged_in
    }

    pub fn token(&self) -> Option<String> {
        self.lock().token.clone()
    }

    /// Epoch milliseconds of the last successful exchange with the API.
    pub fn last_update(&self) -> Option<i64> {
        self.lock().last_update
    }

    /// Record a successful exchange with the API.
    pub fn touch(&self) {
        self.lock().last_update = Some(Utc::now().timestamp_millis());
    }
}
