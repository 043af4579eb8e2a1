// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Observable presentation state.
//!
//! A single view-state value published through a watch channel. The
//! session mutates it; any number of observers (UI, CLI, tests)
//! subscribe for change notification. Replaces the UI-framework-bound
//! observable-property pattern with an explicit state object.

use std::sync::Arc;

use tokio::sync::watch;

/// View state for the fortune screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FortuneView {
    /// Fortune headline
    pub header: String,
    /// Fortune body text
    pub body: String,
    /// Formatted luck line, e.g. "Your luck today is very fortunate"
    pub luck: String,
    /// Wait message while the cooldown holds, `None` otherwise
    pub wait_message: Option<String>,
    /// A request is in flight
    pub loading: bool,
    /// The gate currently permits a request
    pub allowed: bool,
}

/// Shared observable holder for [`FortuneView`].
#[derive(Clone)]
pub struct PresentationState {
    tx: Arc<watch::Sender<FortuneView>>,
}

impl PresentationState {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(FortuneView::default());
        Self { tx: Arc::new(tx) }
    }

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> watch::Receiver<FortuneView> {
        self.tx.subscribe()
    }

    /// Current state snapshot.
    pub fn snapshot(&self) -> FortuneView {
        self.tx.borrow().clone()
    }

    /// Mutate the state and notify observers.
    pub fn update(&self, f: impl FnOnce(&mut FortuneView)) {
        self.tx.send_modify(f);
    }
}

impl Default for PresentationState {
    fn default() -> Self {
        Self::new()
    }
}
