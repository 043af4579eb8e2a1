// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod cooldown;
pub mod fortune;
pub mod history;
pub mod narrator;
pub mod profile;
pub mod scheduler;

pub use cooldown::{CooldownGate, Evaluation};
pub use fortune::{build_prompt, FortuneClient, Prompt};
pub use history::HistoryStore;
pub use narrator::{Narrator, NoopNarrator};
pub use profile::ProfileStore;
pub use scheduler::{NoopScheduler, ReminderScheduler};
