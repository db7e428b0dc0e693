//! File-backed session repository
//!
//! One JSON document per session, named `{session_id}.json`. Writes go
//! through a temp file and rename so a crash mid-write never leaves a
//! half-written record behind.

use async_trait::async_trait;
use classroom_application::ports::session_store::{
    SessionRecord, SessionRepository, SessionStoreError, SessionSummary,
};
use classroom_domain::SessionId;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Session repository persisting records as JSON files in one directory
pub struct FileSessionRepository {
    dir: PathBuf,
}

impl FileSessionRepository {
    /// Open (and create if needed) the sessions directory
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, SessionStoreError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|e| {
            SessionStoreError::Io(format!("cannot create {}: {}", dir.display(), e))
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn record_path(&self, id: &SessionId) -> PathBuf {
        self.dir.join(format!("{}.json", id))
    }
}

#[async_trait]
impl SessionRepository for FileSessionRepository {
    async fn get(&self, id: &SessionId) -> Result<SessionRecord, SessionStoreError> {
        let path = self.record_path(id);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(SessionStoreError::NotFound(id.to_string()));
            }
            Err(e) => return Err(SessionStoreError::Io(e.to_string())),
        };
        serde_json::from_slice(&bytes)
            .map_err(|e| SessionStoreError::Corrupt(format!("{}: {}", path.display(), e)))
    }

    async fn put(&self, record: &SessionRecord) -> Result<(), SessionStoreError> {
        let path = self.record_path(record.session_id());
        let tmp = path.with_extension("json.tmp");

        let bytes = serde_json::to_vec_pretty(record)
            .map_err(|e| SessionStoreError::Io(e.to_string()))?;
        tokio::fs::write(&tmp, &bytes)
            .await
            .map_err(|e| SessionStoreError::Io(e.to_string()))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|e| SessionStoreError::Io(e.to_string()))
    }

    async fn delete(&self, id: &SessionId) -> Result<(), SessionStoreError> {
        let path = self.record_path(id);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(SessionStoreError::NotFound(id.to_string()))
            }
            Err(e) => Err(SessionStoreError::Io(e.to_string())),
        }
    }

    async fn list(&self) -> Result<Vec<SessionSummary>, SessionStoreError> {
        let mut entries = tokio::fs::read_dir(&self.dir)
            .await
            .map_err(|e| SessionStoreError::Io(e.to_string()))?;

        let mut summaries = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| SessionStoreError::Io(e.to_string()))?
        {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            // A corrupt record should not break the listing.
            let Ok(bytes) = tokio::fs::read(&path).await else {
                continue;
            };
            match serde_json::from_slice::<SessionRecord>(&bytes) {
                Ok(record) => summaries.push(SessionSummary {
                    session_id: record.session_id().clone(),
                    topic: record.session.topic.clone(),
                    rounds: record.session.round_num,
                }),
                Err(e) => warn!("Skipping unreadable record {}: {}", path.display(), e),
            }
        }

        summaries.sort_by(|a, b| a.session_id.cmp(&b.session_id));
        Ok(summaries)
    }
}
