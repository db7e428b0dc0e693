//! Selector port
//!
//! Defines the interface for the per-round decision capability: given the
//! teacher's utterance and the session snapshot, pick which students react
//! and extract pedagogical signals.
//!
//! The output is deliberately a raw [`serde_json::Value`]: selectors are
//! generative and untrusted, so the round pipeline always passes their
//! output through the domain sanitizer before using it.

use async_trait::async_trait;
use classroom_domain::ClassroomSession;
use thiserror::Error;

/// Errors that can occur during a selector invocation
#[derive(Error, Debug)]
pub enum SelectorError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Timeout")]
    Timeout,
}

/// Decision capability invoked once per round
///
/// Implementations (adapters) live in the infrastructure layer. The full
/// session log travels with the session snapshot; trimming it for a
/// context window is the adapter's concern.
#[async_trait]
pub trait Selector: Send + Sync {
    /// Decide which students react to this utterance.
    ///
    /// The returned value is the capability's raw JSON output; the caller
    /// sanitizes it. A failure here never fails the round — the caller
    /// degrades to the deterministic fallback selection.
    async fn select(
        &self,
        utterance: &str,
        session: &ClassroomSession,
    ) -> Result<serde_json::Value, SelectorError>;
}
