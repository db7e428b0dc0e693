//! Classroom session aggregate

use crate::classroom::log::{LogEntry, SpeakerKind};
use crate::classroom::persona::Persona;
use crate::classroom::student::Student;
use crate::classroom::status::StudentStatus;
use crate::core::error::DomainError;
use crate::core::ids::{SessionId, StudentId};
use crate::policy::RoundPolicy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One classroom simulation instance: roster, log, hand queue and
/// counters. Exclusively owned by a single round invocation while it is
/// being mutated; persisted between rounds by a repository.
///
/// `students` is a `BTreeMap` so every scan over the roster (idle decay,
/// fallback selection, KPI averages) runs in a deterministic order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassroomSession {
    pub session_id: SessionId,
    pub round_num: u32,
    pub topic: String,
    pub log: Vec<LogEntry>,
    pub hand_queue: Vec<StudentId>,
    pub time_since_question: u32,
    pub students: BTreeMap<StudentId, Student>,
}

impl ClassroomSession {
    /// Build a fresh session with every student at baseline state.
    ///
    /// Student ids are derived from persona names plus roster position,
    /// so a roster may contain duplicate names.
    pub fn from_roster(
        session_id: SessionId,
        topic: impl Into<String>,
        personas: Vec<Persona>,
        policy: &RoundPolicy,
    ) -> Result<Self, DomainError> {
        if personas.is_empty() {
            return Err(DomainError::EmptyRoster);
        }

        let mut students = BTreeMap::new();
        for (index, persona) in personas.into_iter().enumerate() {
            persona.validate()?;
            let id = StudentId::from_name(persona.name(), index);
            let persona = persona.normalized();
            students.insert(id, Student::from_persona(persona, policy));
        }

        Ok(Self {
            session_id,
            round_num: 0,
            topic: topic.into(),
            log: Vec::new(),
            hand_queue: Vec::new(),
            time_since_question: 0,
            students,
        })
    }

    pub fn student(&self, id: &StudentId) -> Option<&Student> {
        self.students.get(id)
    }

    pub fn student_mut(&mut self, id: &StudentId) -> Option<&mut Student> {
        self.students.get_mut(id)
    }

    pub fn contains(&self, id: &StudentId) -> bool {
        self.students.contains_key(id)
    }

    pub fn roster_size(&self) -> usize {
        self.students.len()
    }

    /// Resolve a display name to a student id, case-insensitively.
    /// With duplicate names, the lowest id wins.
    pub fn resolve_name(&self, name: &str) -> Option<StudentId> {
        let needle = name.trim().to_lowercase();
        self.students
            .iter()
            .find(|(_, s)| s.name().to_lowercase() == needle)
            .map(|(id, _)| id.clone())
    }

    /// Mean attention across the roster; 0 for an empty roster
    pub fn average_attention(&self) -> f64 {
        if self.students.is_empty() {
            return 0.0;
        }
        let total: f64 = self.students.values().map(|s| s.state.attention).sum();
        total / self.students.len() as f64
    }

    /// Append to the hand queue, preserving FIFO order. No-op if the id
    /// is already queued or unknown.
    pub fn enqueue_hand(&mut self, id: &StudentId) {
        if self.contains(id) && !self.hand_queue.contains(id) {
            self.hand_queue.push(id.clone());
        }
    }

    /// Remove an id from the hand queue, keeping the rest in order
    pub fn dequeue_hand(&mut self, id: &StudentId) {
        self.hand_queue.retain(|queued| queued != id);
    }

    /// Most recent student utterance in the log, if any
    pub fn last_student_entry(&self) -> Option<&LogEntry> {
        self.log
            .iter()
            .rev()
            .find(|entry| entry.kind == SpeakerKind::Student)
    }

    /// Check the snapshot is well-formed before a round mutates it:
    /// non-empty roster, and the hand queue in lockstep with statuses.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.students.is_empty() {
            return Err(DomainError::EmptyRoster);
        }
        let mut seen = std::collections::BTreeSet::new();
        for id in &self.hand_queue {
            if !seen.insert(id) {
                return Err(DomainError::HandQueueDrift(format!(
                    "{} queued twice",
                    id
                )));
            }
            match self.students.get(id) {
                None => return Err(DomainError::UnknownStudent(id.to_string())),
                Some(student) if student.state.status != StudentStatus::HandRaised => {
                    return Err(DomainError::HandQueueDrift(format!(
                        "{} queued but not hand-raised",
                        id
                    )));
                }
                Some(_) => {}
            }
        }
        for (id, student) in &self.students {
            if student.state.status == StudentStatus::HandRaised
                && !self.hand_queue.contains(id)
            {
                return Err(DomainError::HandQueueDrift(format!(
                    "{} hand-raised but not queued",
                    id
                )));
            }
        }
        Ok(())
    }
}
