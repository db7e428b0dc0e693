//! Port for structured round transcript logging.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures round
//! telemetry in a machine-readable format (JSONL) — round boundaries,
//! capability degradations, per-student reactions.

use serde_json::Value;

/// A structured transcript event.
///
/// Each event has a type string and a JSON payload with event-specific
/// fields; implementations add the timestamp.
pub struct TranscriptEvent {
    /// Event type identifier (e.g. "round_started", "reactor_failed").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl TranscriptEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for recording transcript events.
///
/// The `log` method is intentionally synchronous and non-fallible to
/// avoid disrupting round processing — logging failures are silently
/// ignored.
pub trait TranscriptLogger: Send + Sync {
    fn log(&self, event: TranscriptEvent);
}

/// No-op implementation for tests and when the transcript is disabled.
pub struct NoTranscriptLogger;

impl TranscriptLogger for NoTranscriptLogger {
    fn log(&self, _event: TranscriptEvent) {}
}
