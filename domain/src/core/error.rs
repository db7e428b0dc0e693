//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// Everything here is a client-fixable input problem: the round pipeline
/// rejects these before touching any state.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Utterance cannot be empty")]
    EmptyUtterance,

    #[error("Session roster is empty")]
    EmptyRoster,

    #[error("Invalid persona: {0}")]
    InvalidPersona(String),

    #[error("Unknown student: {0}")]
    UnknownStudent(String),

    #[error("Invalid status value: {0}")]
    InvalidStatus(String),

    #[error("Hand queue is inconsistent with student statuses: {0}")]
    HandQueueDrift(String),
}

impl DomainError {
    /// Check if this error indicates a malformed session snapshot
    pub fn is_session_error(&self) -> bool {
        matches!(
            self,
            DomainError::EmptyRoster
                | DomainError::UnknownStudent(_)
                | DomainError::HandQueueDrift(_)
        )
    }
}
