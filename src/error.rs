// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types.

/// Application error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Fortune API error: {0}")]
    FortuneApi(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid profile: {0}")]
    InvalidProfile(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// True for failures of the remote generation endpoint (transport,
    /// non-success status, or unparsable response). Callers present the
    /// fallback fortune on these instead of propagating.
    pub fn is_fortune_api_error(&self) -> bool {
        matches!(self, AppError::FortuneApi(_))
    }
}

/// Result type alias for the crate
pub type Result<T> = std::result::Result<T, AppError>;
