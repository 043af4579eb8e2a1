// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Fortune session: orchestrates the gate, API client, stores, and
//! observable state.
//!
//! All state mutation funnels through [`PresentationState`]; background
//! work (cooldown auto-rearm, narration) is fire-and-forget and marshals
//! results back through the same state object.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use chrono::Utc;

use crate::config::Config;
use crate::error::Result;
use crate::models::{FortuneRecord, TimestampedFortune, UserProfile};
use crate::services::{
    build_prompt, CooldownGate, FortuneClient, HistoryStore, Narrator, ProfileStore,
    ReminderScheduler,
};
use crate::state::PresentationState;
use crate::store::{keys, SecureStore};

/// Hidden taps required before the secret interaction unlocks a fortune.
const MAX_SPECIAL_INTERACTIONS: u32 = 5;

const FALLBACK_HEADER: &str = "...";
const FALLBACK_BODY: &str = "Zoltar remains silent.";

/// One user-facing fortune session.
pub struct ZoltarSession {
    config: Config,
    store: SecureStore,
    profiles: ProfileStore,
    history: HistoryStore,
    gate: CooldownGate,
    client: FortuneClient,
    scheduler: Arc<dyn ReminderScheduler>,
    narrator: Arc<dyn Narrator>,
    state: PresentationState,
    /// Secret-interaction tap counter; reset on every gate evaluation
    special_interactions: AtomicU32,
}

impl ZoltarSession {
    pub fn new(
        config: Config,
        store: SecureStore,
        scheduler: Arc<dyn ReminderScheduler>,
        narrator: Arc<dyn Narrator>,
    ) -> Self {
        let gate = CooldownGate::new(
            store.clone(),
            config.cooldown,
            config.unlimited_fortunes,
        );
        let client = FortuneClient::new(config.api_url.clone(), config.api_key.clone());

        Self {
            profiles: ProfileStore::new(store.clone()),
            history: HistoryStore::new(store.clone()),
            gate,
            client,
            scheduler,
            narrator,
            state: PresentationState::new(),
            special_interactions: AtomicU32::new(0),
            config,
            store,
        }
    }

    /// Observable view state.
    pub fn state(&self) -> &PresentationState {
        &self.state
    }

    /// Stored user profile, if onboarding has happened.
    pub async fn profile(&self) -> Option<UserProfile> {
        self.profiles.load().await
    }

    pub fn profiles(&self) -> &ProfileStore {
        &self.profiles
    }

    /// Load the last fortune into view state and evaluate the gate.
    pub async fn initialize(&self) {
        self.try_set_last_fortune().await;
        self.refresh_allowed(true, false).await;
        tracing::info!("Session initialized");
    }

    /// Run the full get-fortune flow.
    ///
    /// No-op when the gate denies or no profile exists. A failed request
    /// presents the fallback fortune and restores the allowed flag
    /// without consuming the cooldown.
    pub async fn get_fortune(&self) -> Result<()> {
        if !self.state.snapshot().allowed {
            return Ok(());
        }

        let profile = match self.profiles.load().await {
            Some(profile) => profile,
            None => {
                tracing::warn!("Fortune requested without a stored profile");
                return Ok(());
            }
        };

        self.state.update(|view| {
            view.allowed = false;
            view.loading = true;
        });

        tracing::info!("User requested fortune");

        let prompt = build_prompt(&profile, Utc::now().date_naive());

        let record = match self.client.request_fortune(&prompt).await {
            Ok(record) => record,
            Err(e) if e.is_fortune_api_error() => {
                tracing::error!(error = %e, "Failed to communicate with fortune API");
                tracing::warn!("User saw no fortune");
                self.set_fortune_text(FALLBACK_HEADER, FALLBACK_BODY, "");
                self.state.update(|view| {
                    view.allowed = true;
                    view.loading = false;
                });
                return Ok(());
            }
            Err(e) => {
                self.state.update(|view| {
                    view.allowed = true;
                    view.loading = false;
                });
                return Err(e);
            }
        };

        self.apply_record(&record);

        if let Err(e) = self.save_last_fortune(&record).await {
            // Degrade to a log entry; the user already has their fortune
            tracing::error!(error = %e, "Failed to persist fortune");
        }

        if profile.announce_fortune {
            self.announce();
        }

        self.refresh_allowed(true, false).await;
        self.state.update(|view| view.loading = false);

        tracing::info!("User received fortune");
        Ok(())
    }

    /// Re-evaluate the gate and publish the result.
    ///
    /// Resets the special-interaction counter. When denied with
    /// `auto_rearm`, spawns a one-shot timer that re-evaluates at the
    /// unlock time and notifies the reminder scheduler.
    pub async fn refresh_allowed(&self, auto_rearm: bool, skip_wait: bool) -> bool {
        self.special_interactions.store(0, Ordering::SeqCst);

        let eval = self.gate.check(skip_wait).await;

        self.state.update(|view| {
            view.allowed = eval.allowed;
            view.wait_message = eval.wait_message.clone();
        });

        if let (false, true, Some(unlock_at)) = (eval.allowed, auto_rearm, eval.unlock_at) {
            let gate = self.gate.clone();
            let state = self.state.clone();
            tokio::spawn(async move {
                // Wake just past the unlock instant; the gate comparison
                // is strict
                let wait = (unlock_at - Utc::now()).to_std().unwrap_or_default()
                    + std::time::Duration::from_millis(50);
                tokio::time::sleep(wait).await;
                let eval = gate.check(false).await;
                state.update(|view| {
                    view.allowed = eval.allowed;
                    view.wait_message = eval.wait_message;
                });
            });

            self.scheduler
                .schedule_notification(unlock_at.timestamp_millis());
        }

        eval.allowed
    }

    /// Hidden counter-based override: the fifth invocation grants an
    /// early fortune. Gated by the secret-interaction feature flag.
    pub async fn invoke_special_interaction(&self) {
        if !self.config.secret_interaction {
            return;
        }

        let taps = self.special_interactions.fetch_add(1, Ordering::SeqCst) + 1;
        if taps < MAX_SPECIAL_INTERACTIONS {
            return;
        }

        self.refresh_allowed(false, true).await;
        self.state.update(|view| {
            view.wait_message = Some("Zoltar grants you another fortune.".to_string());
        });
        tracing::info!("Special interaction granted an early fortune");
    }

    /// All previously received fortunes, newest first.
    pub async fn previous_fortunes(&self) -> Result<Vec<TimestampedFortune>> {
        self.history.load_all().await
    }

    /// Whether the user should be prompted about enabling notifications.
    /// Unset or unreadable preference defaults to prompting.
    pub async fn should_prompt_for_notifications(&self) -> bool {
        match self.store.get(keys::PROMPT_NOTIFICATIONS).await {
            Ok(Some(value)) => value.trim().parse().unwrap_or(true),
            Ok(None) => true,
            Err(e) => {
                tracing::error!(error = %e, "Unable to read notification prompt preference");
                true
            }
        }
    }

    /// Persist the notification prompt preference.
    pub async fn set_notification_prompt(&self, should_prompt: bool) {
        if let Err(e) = self
            .store
            .set(keys::PROMPT_NOTIFICATIONS, &should_prompt.to_string())
            .await
        {
            tracing::error!(error = %e, "Unable to store notification prompt preference");
        }
    }

    /// Persist the fortune, consume the cooldown window, and append to
    /// history.
    async fn save_last_fortune(&self, record: &FortuneRecord) -> Result<()> {
        let now = Utc::now();

        let json = serde_json::to_string(record)
            .map_err(|e| crate::error::AppError::Storage(e.to_string()))?;
        self.store.set(keys::LAST_FORTUNE, &json).await?;

        self.gate.arm(now).await?;
        self.history.append(record, now).await
    }

    /// Restore the most recent fortune into view state. Best-effort.
    async fn try_set_last_fortune(&self) {
        let json = match self.store.get(keys::LAST_FORTUNE).await {
            Ok(Some(json)) => json,
            Ok(None) => return,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load last fortune from storage");
                return;
            }
        };

        match serde_json::from_str::<FortuneRecord>(&json) {
            Ok(record) => {
                self.apply_record(&record);
                tracing::info!("Loaded last fortune from storage");
            }
            Err(e) => {
                tracing::error!(error = %e, "Stored last fortune unparsable");
            }
        }
    }

    fn apply_record(&self, record: &FortuneRecord) {
        let luck = if record.luck_text.trim().is_empty() {
            String::new()
        } else {
            format!("Your luck today is {}", record.luck_text.trim())
        };
        self.set_fortune_text(&record.header, &record.body, &luck);
    }

    fn set_fortune_text(&self, header: &str, body: &str, luck: &str) {
        let clean = |text: &str| text.replace('\n', "").trim().to_string();
        let (header, body, luck) = (clean(header), clean(body), clean(luck));
        self.state.update(|view| {
            view.header = header;
            view.body = body;
            view.luck = luck;
        });
    }

    /// Narrate the current fortune view. Fire-and-forget; never awaited
    /// by the requesting flow.
    fn announce(&self) {
        let view = self.state.snapshot();
        if view.header.is_empty() || view.body.is_empty() || view.luck.is_empty() {
            return;
        }

        let narrator = Arc::clone(&self.narrator);
        let text = format!("{}\n - \n{}\n{}", view.header, view.body, view.luck);
        tokio::spawn(async move {
            narrator.speak(&text);
        });
    }
}
