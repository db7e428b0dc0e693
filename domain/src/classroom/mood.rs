//! Derived classroom mood

use crate::classroom::session::ClassroomSession;
use crate::classroom::status::StudentStatus;
use serde::{Deserialize, Serialize};

/// Coarse whole-class mood label, derived on demand from the roster and
/// fed to student reactions as shared context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassMood {
    Engaged,
    Confused,
    Restless,
    Neutral,
}

impl ClassMood {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassMood::Engaged => "engaged",
            ClassMood::Confused => "confused",
            ClassMood::Restless => "restless",
            ClassMood::Neutral => "neutral",
        }
    }

    /// Derive the mood from current roster state.
    ///
    /// Checks run in order: engaged, confused, restless. Only the
    /// `Confused` status counts toward the confused ratio here; the
    /// wider disengaged set belongs to the KPI confusion index.
    pub fn derive(session: &ClassroomSession) -> Self {
        if session.students.is_empty() {
            return ClassMood::Neutral;
        }

        let total = session.students.len() as f64;
        let avg_attention = session.average_attention();
        let confused = session
            .students
            .values()
            .filter(|s| s.state.status == StudentStatus::Confused)
            .count() as f64;
        let confused_ratio = confused / total;

        if avg_attention > 70.0 && confused_ratio < 0.2 {
            ClassMood::Engaged
        } else if confused_ratio > 0.4 {
            ClassMood::Confused
        } else if avg_attention < 40.0 {
            ClassMood::Restless
        } else {
            ClassMood::Neutral
        }
    }
}

impl std::fmt::Display for ClassMood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
