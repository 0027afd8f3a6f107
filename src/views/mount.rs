// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Liveness-gated state for a page while it loads.
//!
//! A [`Mount`] lives as long as the page handler. Each piece of data the page
//! fetches gets its own [`Slot`], filled from inside the handler future.
//!
//! Cancellation is dropping that future: when the browser disconnects, axum
//! drops the handler, and the mount and every in-flight [`Slot::fill`] go
//! with it, so nothing is stored. The liveness flag covers slot clones that
//! outlive the handler: once the mount is gone they refuse any value.

use crate::error::Result;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// Text shown in place of data that has not arrived yet.
pub const PLACEHOLDER: &str = "Please wait...";

/// A piece of page data that may not have arrived yet.
#[derive(Debug, Clone, PartialEq)]
pub enum Loadable<T> {
    Pending,
    Ready(T),
}

impl<T> Loadable<T> {
    pub fn is_ready(&self) -> bool {
        matches!(self, Loadable::Ready(_))
    }

    pub fn as_ref(&self) -> Loadable<&T> {
        match self {
            Loadable::Pending => Loadable::Pending,
            Loadable::Ready(value) => Loadable::Ready(value),
        }
    }

    pub fn ready(self) -> Option<T> {
        match self {
            Loadable::Pending => None,
            Loadable::Ready(value) => Some(value),
        }
    }
}

impl<T> Default for Loadable<T> {
    fn default() -> Self {
        Loadable::Pending
    }
}

/// Lifetime of one rendered page. Dropping it discards late results.
#[derive(Debug)]
pub struct Mount {
    alive: Arc<AtomicBool>,
}

impl Mount {
    pub fn new() -> Self {
        Self {
            alive: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }

    /// A fresh, pending slot tied to this mount.
    pub fn slot<T>(&self) -> Slot<T> {
        Slot {
            alive: self.alive.clone(),
            value: Arc::new(Mutex::new(Loadable::Pending)),
        }
    }

    pub fn unmount(&self) {
        self.alive.store(false, Ordering::Release);
    }
}

impl Default for Mount {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Mount {
    fn drop(&mut self) {
        self.unmount();
    }
}

/// One independently loaded piece of page state.
#[derive(Debug)]
pub struct Slot<T> {
    alive: Arc<AtomicBool>,
    value: Arc<Mutex<Loadable<T>>>,
}

impl<T> Clone for Slot<T> {
    fn clone(&self) -> Self {
        Self {
            alive: self.alive.clone(),
            value: self.value.clone(),
        }
    }
}

impl<T: Clone> Slot<T> {
    /// Store `value` if the page is still mounted. Returns false when the
    /// value was discarded.
    pub fn resolve(&self, value: T) -> bool {
        if !self.alive.load(Ordering::Acquire) {
            tracing::debug!("Discarding response for an unmounted page");
            return false;
        }
        *self.value.lock().unwrap_or_else(PoisonError::into_inner) = Loadable::Ready(value);
        true
    }

    /// Await `fetch` and resolve the slot with its result.
    pub async fn fill<F>(&self, fetch: F) -> Result<()>
    where
        F: Future<Output = Result<T>>,
    {
        let value = fetch.await?;
        self.resolve(value);
        Ok(())
    }

    pub fn get(&self) -> Loadable<T> {
        self.value
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
