//! Per-round history record

use crate::core::ids::StudentId;
use serde::{Deserialize, Serialize};

/// What happened in one completed round, immutable once appended.
///
/// The history list these accumulate in lives alongside the session and
/// feeds only the KPI aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundEntry {
    pub round: u32,
    pub sentence: String,
    pub bloom_level: u8,
    pub teacher_asked_question: bool,
    pub student_spoke: bool,
    pub student_spoke_id: Option<StudentId>,
    pub new_hands_raised: u32,
    pub teacher_tip: Option<String>,
    pub engagement_snapshot: f64,
}
