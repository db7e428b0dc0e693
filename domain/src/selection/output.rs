//! Sanitized selection output

use crate::core::ids::StudentId;
use serde::{Deserialize, Serialize};

/// Lowest Bloom taxonomy level the sanitizer will emit
pub const BLOOM_MIN: u8 = 1;
/// Highest Bloom taxonomy level the sanitizer will emit
pub const BLOOM_MAX: u8 = 6;

/// The per-round decision after sanitization: which students to
/// simulate plus the pedagogical signals extracted from the utterance.
///
/// Every id in here is guaranteed to exist in the roster the selection
/// was sanitized against, and `bloom_level` is always within
/// [`BLOOM_MIN`], [`BLOOM_MAX`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub students_to_simulate: Vec<StudentId>,
    pub teacher_asked_question: bool,
    pub bloom_level: u8,
    pub called_on_student_id: Option<StudentId>,
    pub teacher_tip: Option<String>,
    pub topic_update: Option<String>,
    pub debug_reason: Option<String>,
}

impl Selection {
    pub fn simulate_count(&self) -> usize {
        self.students_to_simulate.len()
    }

    pub fn will_simulate(&self, id: &StudentId) -> bool {
        self.students_to_simulate.contains(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_will_simulate() {
        let selection = Selection {
            students_to_simulate: vec![StudentId::new("a_0"), StudentId::new("b_1")],
            teacher_asked_question: true,
            bloom_level: 3,
            called_on_student_id: None,
            teacher_tip: None,
            topic_update: None,
            debug_reason: None,
        };
        assert_eq!(selection.simulate_count(), 2);
        assert!(selection.will_simulate(&StudentId::new("a_0")));
        assert!(!selection.will_simulate(&StudentId::new("c_2")));
    }
}
