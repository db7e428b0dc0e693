//! Session repository port
//!
//! The round pipeline takes a session value in and returns a session
//! value out; persisting between rounds is this port's job. One record
//! per session id: the session snapshot plus its append-only round
//! history.

use async_trait::async_trait;
use classroom_domain::{ClassroomSession, RoundEntry, SessionId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during repository operations
#[derive(Error, Debug)]
pub enum SessionStoreError {
    #[error("Session not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Io(String),

    #[error("Corrupt session record: {0}")]
    Corrupt(String),
}

/// What the repository stores per session id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub session: ClassroomSession,
    #[serde(default)]
    pub history: Vec<RoundEntry>,
}

impl SessionRecord {
    pub fn new(session: ClassroomSession) -> Self {
        Self {
            session,
            history: Vec::new(),
        }
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session.session_id
    }
}

/// One line of `list` output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub session_id: SessionId,
    pub topic: String,
    pub rounds: u32,
}

/// Repository for session records
///
/// Implementations live in the infrastructure layer. The core never
/// deletes a session on its own; `delete` exists for the explicit
/// lifecycle command.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Load a session record by id
    async fn get(&self, id: &SessionId) -> Result<SessionRecord, SessionStoreError>;

    /// Persist a session record, replacing any previous version
    async fn put(&self, record: &SessionRecord) -> Result<(), SessionStoreError>;

    /// Remove a stored session record
    async fn delete(&self, id: &SessionId) -> Result<(), SessionStoreError>;

    /// Enumerate stored sessions
    async fn list(&self) -> Result<Vec<SessionSummary>, SessionStoreError>;
}
