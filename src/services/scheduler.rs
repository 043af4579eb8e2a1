//! Platform reminder scheduling capability.

/// Schedules a best-effort local notification for when the next fortune
/// unlocks.
///
/// Implemented by platform glue (e.g. an alarm manager); platforms
/// without the capability use [`NoopScheduler`]. Failures are the
/// implementation's problem and must never surface to the caller.
pub trait ReminderScheduler: Send + Sync {
    /// Arrange a reminder at `trigger_at_epoch_ms` (Unix epoch
    /// milliseconds). One-shot; a later call replaces the pending
    /// reminder.
    fn schedule_notification(&self, trigger_at_epoch_ms: i64);
}

/// No-op scheduler for tests and platforms without local notifications.
#[derive(Debug, Clone, Default)]
pub struct NoopScheduler;

impl ReminderScheduler for NoopScheduler {
    fn schedule_notification(&self, trigger_at_epoch_ms: i64) {
        tracing::debug!(trigger_at_epoch_ms, "No reminder capability, skipping notification");
    }
}
