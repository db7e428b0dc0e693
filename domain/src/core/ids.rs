//! Identifier value objects

use serde::{Deserialize, Serialize};

/// Identifies one student within a session roster (Value Object)
///
/// Ids are derived from the persona name at session creation and stay
/// stable for the session lifetime.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentId(String);

impl StudentId {
    /// Create a new student id
    ///
    /// # Panics
    /// Panics if the id is empty or only whitespace
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        assert!(!id.trim().is_empty(), "Student id cannot be empty");
        Self(id)
    }

    /// Try to create a new student id, returning None if invalid
    pub fn try_new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            None
        } else {
            Some(Self(id))
        }
    }

    /// Derive an id from a persona display name and roster position
    pub fn from_name(name: &str, index: usize) -> Self {
        let safe: String = name
            .trim()
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("_");
        if safe.is_empty() {
            Self(format!("student_{}", index))
        } else {
            Self(format!("{}_{}", safe, index))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StudentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for StudentId {
    fn from(s: &str) -> Self {
        StudentId::new(s)
    }
}

impl From<String> for StudentId {
    fn from(s: String) -> Self {
        StudentId::new(s)
    }
}

/// Identifies one classroom session (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Create a new session id
    ///
    /// # Panics
    /// Panics if the id is empty or only whitespace
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        assert!(!id.trim().is_empty(), "Session id cannot be empty");
        Self(id)
    }

    /// Try to create a new session id, returning None if invalid
    pub fn try_new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            None
        } else {
            Some(Self(id))
        }
    }

    /// Build the conventional timestamp-derived id for a fresh session
    pub fn from_timestamp(unix_millis: i64) -> Self {
        Self(format!("session_{}", unix_millis))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SessionId {
    fn from(s: &str) -> Self {
        SessionId::new(s)
    }
}

impl From<String> for SessionId {
    fn from(s: String) -> Self {
        SessionId::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_student_id_creation() {
        let id = StudentId::new("maya_chen_0");
        assert_eq!(id.as_str(), "maya_chen_0");
    }

    #[test]
    #[should_panic]
    fn test_empty_student_id_panics() {
        StudentId::new("   ");
    }

    #[test]
    fn test_try_new_empty() {
        assert!(StudentId::try_new("").is_none());
        assert!(SessionId::try_new("  ").is_none());
    }

    #[test]
    fn test_from_name_normalizes() {
        let id = StudentId::from_name("Maya Chen", 0);
        assert_eq!(id.as_str(), "maya_chen_0");
    }

    #[test]
    fn test_from_name_collapses_whitespace() {
        let id = StudentId::from_name("  Jordan   Q  Lee ", 3);
        assert_eq!(id.as_str(), "jordan_q_lee_3");
    }

    #[test]
    fn test_from_name_blank_falls_back_to_index() {
        let id = StudentId::from_name("  ", 2);
        assert_eq!(id.as_str(), "student_2");
    }

    #[test]
    fn test_session_id_from_timestamp() {
        let id = SessionId::from_timestamp(1_700_000_000_000);
        assert_eq!(id.as_str(), "session_1700000000000");
    }
}
