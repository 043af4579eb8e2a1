//! Text-to-speech capability.

/// Narrates fortune text out loud.
///
/// Narration is fire-and-forget: the session never awaits completion,
/// and the only cancellation affordance is a best-effort [`Narrator::stop`]
/// (used when the hosting window is deactivated).
pub trait Narrator: Send + Sync {
    fn speak(&self, text: &str);

    /// Best-effort stop of any in-flight narration.
    fn stop(&self) {}
}

/// No-op narrator for tests and platforms without speech output.
#[derive(Debug, Clone, Default)]
pub struct NoopNarrator;

impl Narrator for NoopNarrator {
    fn speak(&self, _text: &str) {
        tracing::debug!("No speech capability, skipping narration");
    }
}
