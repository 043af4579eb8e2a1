// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Fortune cooldown gate.
//!
//! Decides whether a new fortune may be requested now, based on the
//! persisted last-request timestamp. Handles:
//! - Unlimited-fortunes feature flag (always wins)
//! - Next-calendar-day and fixed-duration cooldown policies
//! - The special-interaction override (`skip_wait`)
//! - Fail-open on any storage or parse error

use chrono::{DateTime, Duration, Utc};

use crate::config::CooldownPolicy;
use crate::error::AppError;
use crate::store::{keys, SecureStore};
use crate::time_utils;

/// Outcome of a gate evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    /// May a fortune be requested now?
    pub allowed: bool,
    /// Human-readable wait message when denied
    pub wait_message: Option<String>,
    /// When the gate unlocks; `None` when already allowed with no
    /// pending cooldown
    pub unlock_at: Option<DateTime<Utc>>,
}

impl Evaluation {
    fn allowed() -> Self {
        Self {
            allowed: true,
            wait_message: None,
            unlock_at: None,
        }
    }
}

/// Gate limiting fortune requests to one per cooldown window.
#[derive(Clone)]
pub struct CooldownGate {
    store: SecureStore,
    policy: CooldownPolicy,
    unlimited: bool,
}

impl CooldownGate {
    pub fn new(store: SecureStore, policy: CooldownPolicy, unlimited: bool) -> Self {
        Self {
            store,
            policy,
            unlimited,
        }
    }

    /// Evaluate the gate against the persisted last-use timestamp.
    ///
    /// Any failure reading or parsing the timestamp is logged and treated
    /// as allowed; errors never escape this boundary.
    pub async fn check(&self, skip_wait: bool) -> Evaluation {
        let last = match self.load_last_use().await {
            Ok(last) => last,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read last fortune usage, failing open");
                return Evaluation::allowed();
            }
        };

        self.evaluate_at(Utc::now(), last, skip_wait)
    }

    /// Pure evaluation core.
    ///
    /// `skip_wait` forces an unlock regardless of elapsed time without
    /// touching the persisted timestamp.
    pub fn evaluate_at(
        &self,
        now: DateTime<Utc>,
        last: Option<DateTime<Utc>>,
        skip_wait: bool,
    ) -> Evaluation {
        if self.unlimited {
            return Evaluation::allowed();
        }

        let last = match last {
            Some(last) => last,
            None => return Evaluation::allowed(),
        };

        let unlock_at = self.unlock_time(last);
        if now > unlock_at {
            return Evaluation::allowed();
        }

        let wait_message = format!(
            "Your fate changes at {}",
            time_utils::format_unlock_time(unlock_at)
        );

        Evaluation {
            allowed: skip_wait,
            wait_message: Some(wait_message),
            unlock_at: Some(unlock_at),
        }
    }

    /// When the cooldown started at `last` expires.
    pub fn unlock_time(&self, last: DateTime<Utc>) -> DateTime<Utc> {
        match self.policy.fixed_duration() {
            Some(duration) => last + duration,
            // Midnight (UTC) of the day after the last request
            None => (last + Duration::days(1))
                .date_naive()
                .and_hms_opt(0, 0, 0)
                .unwrap_or_default()
                .and_utc(),
        }
    }

    /// Persist `now` as the last successful request time, consuming the
    /// current window.
    pub async fn arm(&self, now: DateTime<Utc>) -> Result<(), AppError> {
        self.store
            .set(keys::LAST_FORTUNE_USE, &time_utils::format_utc_rfc3339(now))
            .await
    }

    async fn load_last_use(&self) -> Result<Option<DateTime<Utc>>, AppError> {
        let raw = match self.store.get(keys::LAST_FORTUNE_USE).await? {
            Some(raw) if !raw.trim().is_empty() => raw,
            _ => return Ok(None),
        };

        time_utils::parse_utc_rfc3339(&raw)
            .map(Some)
            .map_err(|e| AppError::Storage(format!("Unparsable last-use timestamp: {}", e)))
    }
}
