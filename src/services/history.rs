// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Persisted fortune history.
//!
//! Append-only list of received fortunes. Integrity policy is
//! all-or-nothing: a single corrupt entry (or an unparsable collection)
//! wipes the whole stored history rather than being skipped.

use chrono::{DateTime, Utc};

use crate::error::AppError;
use crate::models::{FortuneRecord, TimestampedFortune};
use crate::store::{keys, SecureStore};

/// Store for previously received fortunes.
#[derive(Clone)]
pub struct HistoryStore {
    store: SecureStore,
}

impl HistoryStore {
    pub fn new(store: SecureStore) -> Self {
        Self { store }
    }

    /// Append a fortune received at `timestamp`.
    pub async fn append(
        &self,
        record: &FortuneRecord,
        timestamp: DateTime<Utc>,
    ) -> Result<(), AppError> {
        let mut entries = match self.load_raw().await? {
            Some(entries) => entries,
            None => Vec::new(),
        };

        entries.push(TimestampedFortune::new(record.clone(), timestamp));

        let json = serde_json::to_string(&entries)
            .map_err(|e| AppError::Storage(format!("Failed to serialize history: {}", e)))?;
        self.store.set(keys::PREVIOUS_FORTUNES, &json).await
    }

    /// Load all history entries, newest first.
    ///
    /// If any entry fails the non-null-record invariant, or the stored
    /// collection cannot be parsed at all, the persisted value is wiped
    /// and an empty list returned.
    pub async fn load_all(&self) -> Result<Vec<TimestampedFortune>, AppError> {
        let mut entries = match self.load_raw().await? {
            Some(entries) => entries,
            None => return Ok(Vec::new()),
        };

        if entries.iter().any(|entry| entry.record.is_none()) {
            tracing::warn!("Corrupt history entry detected, clearing stored history");
            self.store.remove(keys::PREVIOUS_FORTUNES).await?;
            return Ok(Vec::new());
        }

        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(entries)
    }

    /// Read the raw stored collection. `Ok(None)` when nothing is stored;
    /// an unparsable collection is wiped and reported as empty.
    async fn load_raw(&self) -> Result<Option<Vec<TimestampedFortune>>, AppError> {
        let json = match self.store.get(keys::PREVIOUS_FORTUNES).await? {
            Some(json) => json,
            None => return Ok(None),
        };

        match serde_json::from_str(&json) {
            Ok(entries) => Ok(Some(entries)),
            Err(e) => {
                tracing::warn!(error = %e, "Stored history unparsable, clearing");
                self.store.remove(keys::PREVIOUS_FORTUNES).await?;
                Ok(None)
            }
        }
    }
}
