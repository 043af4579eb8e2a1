//! Fortune wire and storage models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A fortune as presented to the user. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FortuneRecord {
    /// Short headline
    pub header: String,
    /// Fortune body text
    pub body: String,
    /// Luck label, e.g. "very fortunate"
    #[serde(rename = "luckText")]
    pub luck_text: String,
}

/// Response body of `POST /generate`.
///
/// Field names are an external contract with the generation service and
/// must be preserved byte-for-byte.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub fortune: Option<FortunePayload>,
    #[serde(rename = "luckText")]
    pub luck_text: Option<String>,
}

/// Inner `fortune` object of the generation response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FortunePayload {
    pub header: String,
    pub body: String,
}

/// A history entry: a fortune plus when it was received.
///
/// The inner record is `Option` only to surface corruption at load time;
/// an entry with a null record invalidates the whole stored history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimestampedFortune {
    pub record: Option<FortuneRecord>,
    pub timestamp: DateTime<Utc>,
}

impl TimestampedFortune {
    pub fn new(record: FortuneRecord, timestamp: DateTime<Utc>) -> Self {
        Self {
            record: Some(record),
            timestamp,
        }
    }
}
