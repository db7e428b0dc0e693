//! Start Session use case
//!
//! Builds a fresh session from a roster of personas, persists it and
//! hands the record back for the first round.

use crate::ports::session_store::{SessionRecord, SessionRepository, SessionStoreError};
use classroom_domain::{ClassroomSession, DomainError, Persona, RoundPolicy, SessionId};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Errors that can occur while starting a session
#[derive(Error, Debug)]
pub enum StartSessionError {
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] DomainError),

    #[error("Storage error: {0}")]
    Store(#[from] SessionStoreError),
}

/// Input for the StartSession use case
#[derive(Debug, Clone)]
pub struct StartSessionInput {
    pub topic: String,
    pub personas: Vec<Persona>,
    /// Explicit id; generated from the current time when absent.
    pub session_id: Option<SessionId>,
}

impl StartSessionInput {
    pub fn new(topic: impl Into<String>, personas: Vec<Persona>) -> Self {
        Self {
            topic: topic.into(),
            personas,
            session_id: None,
        }
    }

    pub fn with_session_id(mut self, id: SessionId) -> Self {
        self.session_id = Some(id);
        self
    }
}

/// Use case for creating and persisting a new classroom session
pub struct StartSessionUseCase {
    repository: Arc<dyn SessionRepository>,
    policy: RoundPolicy,
}

impl StartSessionUseCase {
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self {
            repository,
            policy: RoundPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: RoundPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub async fn execute(
        &self,
        input: StartSessionInput,
    ) -> Result<SessionRecord, StartSessionError> {
        let session_id = input
            .session_id
            .unwrap_or_else(|| SessionId::from_timestamp(chrono::Utc::now().timestamp_millis()));

        let session =
            ClassroomSession::from_roster(session_id, input.topic, input.personas, &self.policy)?;
        info!(
            "Starting session {} (\"{}\") with {} students",
            session.session_id,
            session.topic,
            session.roster_size()
        );

        let record = SessionRecord::new(session);
        self.repository.put(&record).await?;
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::session_store::SessionSummary;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct InMemoryRepository {
        records: Mutex<HashMap<String, SessionRecord>>,
    }

    impl InMemoryRepository {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                records: Mutex::new(HashMap::new()),
            })
        }
    }

    #[async_trait]
    impl SessionRepository for InMemoryRepository {
        async fn get(&self, id: &SessionId) -> Result<SessionRecord, SessionStoreError> {
            self.records
                .lock()
                .unwrap()
                .get(id.as_str())
                .cloned()
                .ok_or_else(|| SessionStoreError::NotFound(id.to_string()))
        }

        async fn put(&self, record: &SessionRecord) -> Result<(), SessionStoreError> {
            self.records
                .lock()
                .unwrap()
                .insert(record.session_id().to_string(), record.clone());
            Ok(())
        }

        async fn delete(&self, id: &SessionId) -> Result<(), SessionStoreError> {
            self.records
                .lock()
                .unwrap()
                .remove(id.as_str())
                .map(|_| ())
                .ok_or_else(|| SessionStoreError::NotFound(id.to_string()))
        }

        async fn list(&self) -> Result<Vec<SessionSummary>, SessionStoreError> {
            Ok(self
                .records
                .lock()
                .unwrap()
                .values()
                .map(|r| SessionSummary {
                    session_id: r.session_id().clone(),
                    topic: r.session.topic.clone(),
                    rounds: r.session.round_num,
                })
                .collect())
        }
    }

    fn personas(names: &[&str]) -> Vec<Persona> {
        names
            .iter()
            .map(|n| {
                serde_json::from_str(&format!(r#"{{ "identity": {{ "name": "{}" }} }}"#, n))
                    .unwrap()
            })
            .collect()
    }

    #[tokio::test]
    async fn test_start_creates_baseline_and_persists() {
        let repository = InMemoryRepository::new();
        let use_case = StartSessionUseCase::new(repository.clone());

        let record = use_case
            .execute(
                StartSessionInput::new("Biology", personas(&["Maya Chen", "Dev Patel"]))
                    .with_session_id(SessionId::new("session_42")),
            )
            .await
            .unwrap();

        assert_eq!(record.session.round_num, 0);
        assert_eq!(record.session.topic, "Biology");
        assert_eq!(record.session.roster_size(), 2);
        assert!(record.history.is_empty());

        let stored = repository.get(&SessionId::new("session_42")).await.unwrap();
        assert_eq!(stored, record);
    }

    #[tokio::test]
    async fn test_generated_id_has_session_prefix() {
        let repository = InMemoryRepository::new();
        let use_case = StartSessionUseCase::new(repository);

        let record = use_case
            .execute(StartSessionInput::new("Topic", personas(&["A"])))
            .await
            .unwrap();
        assert!(record.session_id().as_str().starts_with("session_"));
    }

    #[tokio::test]
    async fn test_empty_roster_rejected_and_not_persisted() {
        let repository = InMemoryRepository::new();
        let use_case = StartSessionUseCase::new(repository.clone());

        let result = use_case
            .execute(StartSessionInput::new("Topic", Vec::new()))
            .await;
        assert!(matches!(
            result,
            Err(StartSessionError::InvalidInput(DomainError::EmptyRoster))
        ));
        assert!(repository.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_policy_baselines_applied_to_roster() {
        let repository = InMemoryRepository::new();
        let policy = RoundPolicy::default();
        let use_case = StartSessionUseCase::new(repository).with_policy(policy);

        let record = use_case
            .execute(StartSessionInput::new("Topic", personas(&["A"])))
            .await
            .unwrap();
        let student = record.session.students.values().next().unwrap();
        assert_eq!(student.state.attention, 75.0);
        assert_eq!(student.state.understanding, 50.0);
    }
}
