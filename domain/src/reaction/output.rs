//! Sanitized reaction output

use crate::classroom::status::StudentStatus;
use serde::{Deserialize, Serialize};

/// One student's sanitized response to a teacher utterance.
///
/// Deltas are bounded by the policy's `max_delta`; `memory_note` is
/// absent rather than truncated when it exceeds the note length limit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reaction {
    pub attention_delta: f64,
    pub understanding_delta: f64,
    pub next_status: StudentStatus,
    pub pending_question: Option<String>,
    pub chat_message: Option<String>,
    pub memory_note: Option<String>,
}

impl Reaction {
    /// The no-op substituted when a reactor fails: zero deltas, status
    /// unchanged, nothing to say or remember.
    pub fn neutral(current_status: StudentStatus) -> Self {
        Self {
            attention_delta: 0.0,
            understanding_delta: 0.0,
            next_status: current_status,
            pending_question: None,
            chat_message: None,
            memory_note: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_keeps_current_status() {
        let reaction = Reaction::neutral(StudentStatus::Frustrated);
        assert_eq!(reaction.attention_delta, 0.0);
        assert_eq!(reaction.understanding_delta, 0.0);
        assert_eq!(reaction.next_status, StudentStatus::Frustrated);
        assert!(reaction.pending_question.is_none());
        assert!(reaction.chat_message.is_none());
        assert!(reaction.memory_note.is_none());
    }
}
