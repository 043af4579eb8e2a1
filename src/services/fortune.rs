// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Fortune generation API client and prompt assembly.

use chrono::NaiveDate;

use crate::error::AppError;
use crate::models::{draw_luck, FortuneRecord, GenerateResponse, UserProfile};

/// Prompt context for one generation request.
#[derive(Debug, Clone)]
pub struct Prompt {
    /// Context text sent to the API
    pub context: String,
    /// Luck label drawn for this request; also the fallback when the
    /// response omits its own
    pub luck: String,
}

/// Build the prompt context for a profile.
///
/// Deterministic given `today` and the drawn luck label; the label itself
/// is drawn fresh on every call. The phrasing is part of the prompt
/// contract with the generation service and is kept verbatim.
pub fn build_prompt(profile: &UserProfile, today: NaiveDate) -> Prompt {
    let luck = draw_luck().to_string();
    let mut context = format!(
        "The today is {}. You know the stranger is named {}, ",
        format_short_date(today),
        profile.name
    );

    if let Some(birthday) = profile.birthday {
        context.push_str(&format!("their birthday is {}, ", format_short_date(birthday)));
    }

    if profile.use_astrology {
        if let Some(sign) = profile.sign() {
            context.push_str(&format!(
                "their astrological sign is {} (mention their sign), ",
                sign
            ));
        }
    }

    context.push_str(&format!("and their fortune today is {}.", luck));

    Prompt { context, luck }
}

/// `M/D/YYYY`, matching the reference prompt's short date format.
fn format_short_date(date: NaiveDate) -> String {
    date.format("%-m/%-d/%Y").to_string()
}

/// Fortune generation API client.
#[derive(Clone)]
pub struct FortuneClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl FortuneClient {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            api_key,
        }
    }

    /// Request a fortune for the given prompt.
    ///
    /// `POST {base_url}/generate` with the context as a JSON string body.
    /// A missing `luckText` in the response falls back to the prompt's
    /// drawn label; a missing `fortune` object is an error. The caller
    /// presents the fixed fallback fortune on any error from here and
    /// must not consume the cooldown.
    pub async fn request_fortune(&self, prompt: &Prompt) -> Result<FortuneRecord, AppError> {
        let url = format!("{}/generate", self.base_url);

        let response = self
            .http
            .post(&url)
            .header("X-API-KEY", &self.api_key)
            .json(&prompt.context)
            .send()
            .await
            .map_err(|e| AppError::FortuneApi(e.to_string()))?;

        let result: GenerateResponse = self.check_response_json(response).await?;

        let payload = result
            .fortune
            .ok_or_else(|| AppError::FortuneApi("Response contained no fortune".to_string()))?;

        let luck_text = result
            .luck_text
            .filter(|text| !text.trim().is_empty())
            .unwrap_or_else(|| prompt.luck.clone());

        Ok(FortuneRecord {
            header: payload.header,
            body: payload.body,
            luck_text,
        })
    }

    /// Check response status and parse the JSON body.
    async fn check_response_json<T: for<'de> serde::Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, AppError> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::FortuneApi(format!("HTTP {}: {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::FortuneApi(format!("JSON parse error: {}", e)))
    }
}
