//! Student entity: immutable persona plus mutable simulation state

use crate::classroom::persona::Persona;
use crate::classroom::status::StudentStatus;
use crate::policy::RoundPolicy;
use serde::{Deserialize, Serialize};

/// Mutable per-student simulation state
///
/// `attention` and `understanding` are clamped to [0, 100] after every
/// update; `memory` holds at most the policy's note capacity, oldest
/// evicted first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentState {
    pub attention: f64,
    pub understanding: f64,
    pub status: StudentStatus,
    pub memory: Vec<String>,
    pub pending_question: Option<String>,
    pub last_interacted_round: u32,
    #[serde(default)]
    pub rounds_hand_raised: u32,
    pub mood: String,
    pub energy: f64,
}

impl StudentState {
    /// Append a memory note, evicting the oldest past `capacity`
    pub fn push_memory(&mut self, note: impl Into<String>, capacity: usize) {
        self.memory.push(note.into());
        while self.memory.len() > capacity {
            self.memory.remove(0);
        }
    }

    /// Clamp attention and understanding into [0, 100]
    pub fn clamp_scores(&mut self) {
        self.attention = self.attention.clamp(0.0, 100.0);
        self.understanding = self.understanding.clamp(0.0, 100.0);
    }
}

/// One simulated actor: profile plus state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub persona: Persona,
    pub state: StudentState,
}

impl Student {
    /// Create a student at baseline, carrying mood and energy over from
    /// the persona's initial state
    pub fn from_persona(persona: Persona, policy: &RoundPolicy) -> Self {
        let state = StudentState {
            attention: policy.baseline_attention,
            understanding: policy.baseline_understanding,
            status: StudentStatus::Listening,
            memory: Vec::new(),
            pending_question: None,
            last_interacted_round: 0,
            rounds_hand_raised: 0,
            mood: persona.initial_state.mood_label.clone(),
            energy: persona.initial_state.energy,
        };
        Self { persona, state }
    }

    pub fn name(&self) -> &str {
        self.persona.name()
    }
}
