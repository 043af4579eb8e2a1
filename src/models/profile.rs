//! User profile model: name, birthday, opt-ins, and the derived
//! zodiac sign and daily luck draw.

use chrono::{Datelike, NaiveDate};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// User profile stored in the secure store.
///
/// Created at onboarding and overwritten wholesale on re-submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// Display name (required)
    pub name: String,
    /// Birthday, if the user shared one
    pub birthday: Option<NaiveDate>,
    /// Mention the zodiac sign in the prompt
    #[serde(default)]
    pub use_astrology: bool,
    /// Narrate fortunes out loud
    #[serde(default)]
    pub announce_fortune: bool,
}

impl UserProfile {
    /// Zodiac sign derived from the birthday. Pure lookup, `None` without
    /// a birthday.
    pub fn sign(&self) -> Option<ZodiacSign> {
        self.birthday
            .map(|b| ZodiacSign::from_month_day(b.month(), b.day()))
    }
}

/// Western zodiac signs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
    Unknown,
}

impl ZodiacSign {
    /// Sign for a calendar month/day.
    pub fn from_month_day(month: u32, day: u32) -> Self {
        use ZodiacSign::*;
        match (month, day) {
            (3, 21..=31) | (4, 1..=19) => Aries,
            (4, 20..=30) | (5, 1..=20) => Taurus,
            (5, 21..=31) | (6, 1..=20) => Gemini,
            (6, 21..=30) | (7, 1..=22) => Cancer,
            (7, 23..=31) | (8, 1..=22) => Leo,
            (8, 23..=31) | (9, 1..=22) => Virgo,
            (9, 23..=30) | (10, 1..=22) => Libra,
            (10, 23..=31) | (11, 1..=21) => Scorpio,
            (11, 22..=30) | (12, 1..=21) => Sagittarius,
            (12, 22..=31) | (1, 1..=19) => Capricorn,
            (1, 20..=31) | (2, 1..=18) => Aquarius,
            // Feb 29 lands in Pisces on leap years
            (2, 19..=29) | (3, 1..=20) => Pisces,
            _ => Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ZodiacSign::Aries => "Aries",
            ZodiacSign::Taurus => "Taurus",
            ZodiacSign::Gemini => "Gemini",
            ZodiacSign::Cancer => "Cancer",
            ZodiacSign::Leo => "Leo",
            ZodiacSign::Virgo => "Virgo",
            ZodiacSign::Libra => "Libra",
            ZodiacSign::Scorpio => "Scorpio",
            ZodiacSign::Sagittarius => "Sagittarius",
            ZodiacSign::Capricorn => "Capricorn",
            ZodiacSign::Aquarius => "Aquarius",
            ZodiacSign::Pisces => "Pisces",
            ZodiacSign::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed categorical luck distribution: (label, weight).
const LUCK_BUCKETS: &[(&str, u32)] = &[
    ("terrible", 5),
    ("unlucky", 15),
    ("slightly unlucky", 20),
    ("slightly fortunate", 30),
    ("fortunate", 20),
    ("very fortunate", 10),
];

/// Draw a luck label from the fixed six-bucket distribution.
///
/// Regenerated on every read and never persisted; the drawn label flows
/// into the prompt and serves as the fallback when the API response omits
/// its own luck text.
pub fn draw_luck() -> &'static str {
    let mut rng = rand::thread_rng();
    LUCK_BUCKETS
        .choose_weighted(&mut rng, |bucket| bucket.1)
        .map(|bucket| bucket.0)
        // Static non-empty table with positive weights; only unreachable
        // misconfiguration can fail here.
        .unwrap_or("fortunate")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zodiac_boundaries() {
        assert_eq!(ZodiacSign::from_month_day(3, 21), ZodiacSign::Aries);
        assert_eq!(ZodiacSign::from_month_day(4, 19), ZodiacSign::Aries);
        assert_eq!(ZodiacSign::from_month_day(4, 20), ZodiacSign::Taurus);
        assert_eq!(ZodiacSign::from_month_day(12, 22), ZodiacSign::Capricorn);
        assert_eq!(ZodiacSign::from_month_day(1, 19), ZodiacSign::Capricorn);
        assert_eq!(ZodiacSign::from_month_day(1, 20), ZodiacSign::Aquarius);
    }

    #[test]
    fn test_zodiac_leap_day() {
        assert_eq!(ZodiacSign::from_month_day(2, 29), ZodiacSign::Pisces);
    }

    #[test]
    fn test_draw_luck_stays_in_table() {
        let labels: Vec<&str> = LUCK_BUCKETS.iter().map(|b| b.0).collect();
        for _ in 0..100 {
            assert!(labels.contains(&draw_luck()));
        }
    }

    #[test]
    fn test_sign_requires_birthday() {
        let profile = UserProfile {
            name: "Ada".to_string(),
            birthday: None,
            use_astrology: true,
            announce_fortune: false,
        };
        assert!(profile.sign().is_none());

        let profile = UserProfile {
            birthday: NaiveDate::from_ymd_opt(1990, 8, 1),
            ..profile
        };
        assert_eq!(profile.sign(), Some(ZodiacSign::Leo));
    }
}
