//! Session Report use case
//!
//! Loads a stored session and derives its KPI report. Read-only: the
//! stored record is never touched.

use crate::ports::session_store::{SessionRepository, SessionStoreError};
use classroom_domain::{ClassMood, SessionId, SessionKpis, calculate_kpis};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur while building a report
#[derive(Error, Debug)]
pub enum SessionReportError {
    #[error("Storage error: {0}")]
    Store(#[from] SessionStoreError),
}

/// Everything the report command renders
#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    pub session_id: SessionId,
    pub topic: String,
    pub rounds: u32,
    pub roster_size: usize,
    pub mood: ClassMood,
    pub kpis: SessionKpis,
}

/// Use case for deriving a KPI report from a stored session
pub struct SessionReportUseCase {
    repository: Arc<dyn SessionRepository>,
}

impl SessionReportUseCase {
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, id: &SessionId) -> Result<SessionReport, SessionReportError> {
        let record = self.repository.get(id).await?;
        let kpis = calculate_kpis(&record.session, &record.history);
        let mood = ClassMood::derive(&record.session);
        Ok(SessionReport {
            session_id: record.session.session_id.clone(),
            topic: record.session.topic.clone(),
            rounds: record.session.round_num,
            roster_size: record.session.roster_size(),
            mood,
            kpis,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::session_store::{SessionRecord, SessionSummary};
    use async_trait::async_trait;
    use classroom_domain::{ClassroomSession, Persona, RoundEntry, RoundPolicy, StudentId};
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct InMemoryRepository {
        records: Mutex<HashMap<String, SessionRecord>>,
    }

    impl InMemoryRepository {
        fn with_record(record: SessionRecord) -> Arc<Self> {
            let mut records = HashMap::new();
            records.insert(record.session_id().to_string(), record);
            Arc::new(Self {
                records: Mutex::new(records),
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
            Ok(Vec::new())
        }
    }

    fn sample_session() -> ClassroomSession {
        let personas: Vec<Persona> = ["Amy", "Ben"]
            .iter()
            .map(|n| {
                serde_json::from_str(&format!(r#"{{ "identity": {{ "name": "{}" }} }}"#, n))
                    .unwrap()
            })
            .collect();
        ClassroomSession::from_roster(
            SessionId::new("session_7"),
            "Chemistry",
            personas,
            &RoundPolicy::default(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_report_over_fresh_session() {
        let record = SessionRecord::new(sample_session());
        let use_case = SessionReportUseCase::new(InMemoryRepository::with_record(record));

        let report = use_case.execute(&SessionId::new("session_7")).await.unwrap();
        assert_eq!(report.topic, "Chemistry");
        assert_eq!(report.rounds, 0);
        assert_eq!(report.roster_size, 2);
        assert_eq!(report.mood, ClassMood::Engaged);
        assert_eq!(report.kpis.engagement, 75.0);
        assert_eq!(report.kpis.talk_ratio.teacher, 100.0);
    }

    #[tokio::test]
    async fn test_report_uses_stored_history() {
        let mut session = sample_session();
        session.round_num = 2;
        let mut record = SessionRecord::new(session);
        record.history = vec![
            RoundEntry {
                round: 1,
                sentence: "Welcome.".to_string(),
                bloom_level: 2,
                teacher_asked_question: false,
                student_spoke: false,
                student_spoke_id: None,
                new_hands_raised: 0,
                teacher_tip: None,
                engagement_snapshot: 74.5,
            },
            RoundEntry {
                round: 2,
                sentence: "Amy, go ahead.".to_string(),
                bloom_level: 4,
                teacher_asked_question: true,
                student_spoke: true,
                student_spoke_id: Some(StudentId::new("amy_0")),
                new_hands_raised: 1,
                teacher_tip: Some("Let it breathe.".to_string()),
                engagement_snapshot: 76.0,
            },
        ];
        let use_case = SessionReportUseCase::new(InMemoryRepository::with_record(record));

        let report = use_case.execute(&SessionId::new("session_7")).await.unwrap();
        assert_eq!(report.kpis.talk_ratio.students, 50.0);
        assert_eq!(report.kpis.bloom_level, 3.0);
        assert_eq!(report.kpis.hand_raise_rate, 1);
        assert_eq!(report.kpis.inclusion_score, 50.0);
        assert_eq!(report.kpis.latest_tip.as_deref(), Some("Let it breathe."));
    }

    #[tokio::test]
    async fn test_unknown_session_surfaces_not_found() {
        let record = SessionRecord::new(sample_session());
        let use_case = SessionReportUseCase::new(InMemoryRepository::with_record(record));

        let result = use_case.execute(&SessionId::new("session_404")).await;
        assert!(matches!(
            result,
            Err(SessionReportError::Store(SessionStoreError::NotFound(_)))
        ));
    }
}
