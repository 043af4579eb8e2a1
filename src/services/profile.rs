//! User profile persistence and onboarding validation.

use chrono::NaiveDate;

use crate::error::AppError;
use crate::models::UserProfile;
use crate::store::{keys, SecureStore};

/// Store for the single user profile record.
#[derive(Clone)]
pub struct ProfileStore {
    store: SecureStore,
}

impl ProfileStore {
    pub fn new(store: SecureStore) -> Self {
        Self { store }
    }

    /// Load the stored profile. Read or parse failures are logged and
    /// reported as no profile.
    pub async fn load(&self) -> Option<UserProfile> {
        let json = match self.store.get(keys::USER_PROFILE).await {
            Ok(Some(json)) => json,
            Ok(None) => return None,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load user profile from storage");
                return None;
            }
        };

        match serde_json::from_str(&json) {
            Ok(profile) => Some(profile),
            Err(e) => {
                tracing::error!(error = %e, "Stored user profile unparsable");
                None
            }
        }
    }

    /// Persist a profile, overwriting any previous one wholesale.
    pub async fn save(&self, profile: &UserProfile) -> Result<(), AppError> {
        let json = serde_json::to_string(profile)
            .map_err(|e| AppError::Storage(format!("Failed to serialize profile: {}", e)))?;
        self.store.set(keys::USER_PROFILE, &json).await
    }

    /// Validate onboarding input and persist the resulting profile.
    ///
    /// Name is required; birthday, when given, must be `MM/DD/YYYY`.
    pub async fn onboard(
        &self,
        name: &str,
        birthday: Option<&str>,
        use_astrology: bool,
        announce_fortune: bool,
    ) -> Result<UserProfile, AppError> {
        if name.trim().is_empty() {
            return Err(AppError::InvalidProfile(
                "Please enter at least your name.".to_string(),
            ));
        }

        let birthday = match birthday.map(str::trim).filter(|b| !b.is_empty()) {
            Some(raw) => Some(parse_birthday(raw)?),
            None => None,
        };

        let profile = UserProfile {
            name: name.trim().to_string(),
            birthday,
            use_astrology,
            announce_fortune,
        };

        self.save(&profile).await?;
        tracing::info!(name = %profile.name, "User profile stored");
        Ok(profile)
    }
}

fn parse_birthday(raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw, "%m/%d/%Y").map_err(|_| {
        AppError::InvalidProfile(
            "Invalid birthday format. Please use the format: MM/DD/YYYY".to_string(),
        )
    })
}
