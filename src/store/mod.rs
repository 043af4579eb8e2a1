//! Encrypted local storage layer.

pub mod secure;

pub use secure::SecureStore;

/// Store key names as constants.
///
/// The exact strings are carried over from earlier releases; existing
/// stores must keep working.
pub mod keys {
    pub const LAST_FORTUNE: &str = "LAST_FORTUNE";
    pub const LAST_FORTUNE_USE: &str = "LAST_FORTUNE_USE";
    pub const USER_PROFILE: &str = "USER_PROFILE";
    pub const PREVIOUS_FORTUNES: &str = "previous_fortunes";
    /// Whether to prompt the user about enabling notifications
    pub const PROMPT_NOTIFICATIONS: &str = "PROMPT_NOTIFICATIONS";
}
