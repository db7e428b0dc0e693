//! Reactor port
//!
//! Defines the interface for the per-student reaction capability: given
//! one student's persona and state plus the shared round context, compute
//! that student's state change for the turn.

use async_trait::async_trait;
use classroom_domain::{ClassMood, LogEntry, Persona, StudentId, StudentState};
use thiserror::Error;

/// Errors that can occur during a reactor invocation
#[derive(Error, Debug)]
pub enum ReactorError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Timeout")]
    Timeout,
}

/// Everything one reactor invocation sees.
///
/// Owned snapshot so invocations can run on independent tasks; nothing in
/// here aliases the session being mutated.
#[derive(Debug, Clone)]
pub struct ReactionRequest {
    pub student_id: StudentId,
    pub persona: Persona,
    pub state: StudentState,
    pub utterance: String,
    pub class_log: Vec<LogEntry>,
    pub class_mood: ClassMood,
    pub last_student_entry: Option<LogEntry>,
    pub teacher_asked_question: bool,
}

/// Reaction capability, invoked once per selected student per round.
///
/// All invocations within a round are independent; none sees another's
/// output. The returned value is raw JSON and is always sanitized by the
/// caller; a failure degrades to a neutral no-op for that student only.
#[async_trait]
pub trait Reactor: Send + Sync {
    async fn react(&self, request: &ReactionRequest) -> Result<serde_json::Value, ReactorError>;
}
