//! Session log entries

use serde::{Deserialize, Serialize};

/// Who produced a log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeakerKind {
    Teacher,
    Student,
}

/// One utterance in the session log, immutable once appended
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub round: u32,
    #[serde(rename = "type")]
    pub kind: SpeakerKind,
    pub speaker: String,
    pub content: String,
}

impl LogEntry {
    pub fn teacher(round: u32, content: impl Into<String>) -> Self {
        Self {
            round,
            kind: SpeakerKind::Teacher,
            speaker: "Teacher".to_string(),
            content: content.into(),
        }
    }

    pub fn student(round: u32, speaker: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            round,
            kind: SpeakerKind::Student,
            speaker: speaker.into(),
            content: content.into(),
        }
    }

    /// Single-line rendering used in capability prompts
    pub fn as_transcript_line(&self) -> String {
        format!("[Round {}] {}: \"{}\"", self.round, self.speaker, self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_teacher_entry() {
        let entry = LogEntry::teacher(3, "Let's review photosynthesis.");
        assert_eq!(entry.kind, SpeakerKind::Teacher);
        assert_eq!(entry.speaker, "Teacher");
        assert_eq!(entry.round, 3);
    }

    #[test]
    fn test_transcript_line() {
        let entry = LogEntry::student(2, "Maya Chen", "What does the chloroplast do?");
        assert_eq!(
            entry.as_transcript_line(),
            "[Round 2] Maya Chen: \"What does the chloroplast do?\""
        );
    }

    #[test]
    fn test_kind_serializes_as_type() {
        let entry = LogEntry::teacher(1, "Hello");
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["type"], "teacher");
    }
}
