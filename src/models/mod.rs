// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod fortune;
pub mod profile;

pub use fortune::{FortunePayload, FortuneRecord, GenerateResponse, TimestampedFortune};
pub use profile::{draw_luck, UserProfile, ZodiacSign};
