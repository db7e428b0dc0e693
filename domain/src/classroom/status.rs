//! Student status state machine values

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The six observable states a simulated student can be in.
///
/// `Listening` is the initial state at session creation. No state is
/// terminal; transitions happen through reaction output or through the
/// idle decay/escalation rules in the round pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StudentStatus {
    Listening,
    Confused,
    HandRaised,
    ZonedOut,
    Chatting,
    Frustrated,
}

impl StudentStatus {
    /// All statuses, in declaration order
    pub const ALL: [StudentStatus; 6] = [
        StudentStatus::Listening,
        StudentStatus::Confused,
        StudentStatus::HandRaised,
        StudentStatus::ZonedOut,
        StudentStatus::Chatting,
        StudentStatus::Frustrated,
    ];

    /// Wire identifier, matching the JSON contract with the capabilities
    pub fn as_str(&self) -> &'static str {
        match self {
            StudentStatus::Listening => "listening",
            StudentStatus::Confused => "confused",
            StudentStatus::HandRaised => "hand_raised",
            StudentStatus::ZonedOut => "zoned_out",
            StudentStatus::Chatting => "chatting",
            StudentStatus::Frustrated => "frustrated",
        }
    }

    /// Human-readable name for console output
    pub fn display_name(&self) -> &'static str {
        match self {
            StudentStatus::Listening => "Listening",
            StudentStatus::Confused => "Confused",
            StudentStatus::HandRaised => "Hand raised",
            StudentStatus::ZonedOut => "Zoned out",
            StudentStatus::Chatting => "Chatting",
            StudentStatus::Frustrated => "Frustrated",
        }
    }

    /// Parse a wire value, falling back to `Listening` for anything unknown
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or(StudentStatus::Listening)
    }

    /// Statuses counted by the confusion index
    pub fn is_disengaged(&self) -> bool {
        matches!(
            self,
            StudentStatus::Confused | StudentStatus::ZonedOut | StudentStatus::Frustrated
        )
    }

    /// Rank used by the deterministic fallback scan when a selection
    /// comes back empty; lower ranks are picked first. Hand-raised
    /// students are force-included before the fallback ever runs, so
    /// they carry no rank.
    pub fn fallback_rank(&self) -> Option<u8> {
        match self {
            StudentStatus::Confused => Some(0),
            StudentStatus::Frustrated => Some(1),
            StudentStatus::ZonedOut => Some(2),
            StudentStatus::Chatting => Some(3),
            StudentStatus::Listening => Some(4),
            StudentStatus::HandRaised => None,
        }
    }
}

impl std::fmt::Display for StudentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for StudentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "listening" => Ok(StudentStatus::Listening),
            "confused" => Ok(StudentStatus::Confused),
            "hand_raised" => Ok(StudentStatus::HandRaised),
            "zoned_out" => Ok(StudentStatus::ZonedOut),
            "chatting" => Ok(StudentStatus::Chatting),
            "frustrated" => Ok(StudentStatus::Frustrated),
            other => Err(DomainError::InvalidStatus(other.to_string())),
        }
    }
}
