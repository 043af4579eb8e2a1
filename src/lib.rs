// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Zoltar: personalized fortunes on a cooldown.
//!
//! This crate provides the headless core of the Zoltar fortune teller:
//! profile storage, the fortune generation API client, the cooldown
//! gate, fortune history, and the observable presentation state that a
//! front-end binds to.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod session;
pub mod state;
pub mod store;
pub mod time_utils;

pub use config::Config;
pub use error::{AppError, Result};
pub use session::ZoltarSession;
pub use state::{FortuneView, PresentationState};
pub use store::SecureStore;
