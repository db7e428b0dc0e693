//! Student persona: the immutable profile a student is simulated from
//!
//! Personas are authored externally (roster files) and never mutated by
//! the round pipeline. Everything except the identity section may be
//! omitted; missing sections default to neutral mid-range values so a
//! terse roster is still usable.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

fn clamp_unit(v: f64) -> f64 {
    v.clamp(0.0, 1.0)
}

/// Who the student is
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub name: String,
    #[serde(default = "Identity::default_age")]
    pub age: u32,
    #[serde(default)]
    pub grade: String,
    #[serde(default)]
    pub current_class: String,
    #[serde(default)]
    pub background_summary: String,
}

impl Identity {
    fn default_age() -> u32 {
        16
    }
}

/// Big Five style traits, each in [0, 1]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalityTraits {
    pub openness: f64,
    pub conscientiousness: f64,
    pub extraversion: f64,
    pub agreeableness: f64,
    pub emotionality: f64,
}

impl Default for PersonalityTraits {
    fn default() -> Self {
        Self {
            openness: 0.5,
            conscientiousness: 0.5,
            extraversion: 0.5,
            agreeableness: 0.5,
            emotionality: 0.5,
        }
    }
}

/// Emotional baseline the student walks into the room with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InitialState {
    pub mood_label: String,
    pub mood_valence: f64,
    pub main_concern: String,
    pub energy: f64,
    pub motivation: f64,
    pub stress: f64,
    pub focus: f64,
    pub engagement_with_lesson: f64,
}

impl Default for InitialState {
    fn default() -> Self {
        Self {
            mood_label: "neutral".to_string(),
            mood_valence: 0.0,
            main_concern: String::new(),
            energy: 0.5,
            motivation: 0.5,
            stress: 0.3,
            focus: 0.5,
            engagement_with_lesson: 0.5,
        }
    }
}

/// How the student talks when they do speak
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommunicationStyle {
    pub sentence_length: f64,
    pub verbosity: f64,
    pub formality: f64,
    pub confidence: f64,
    pub warmth: f64,
    pub directness: f64,
    pub hedging: f64,
    pub asks_for_reassurance: f64,
    pub use_of_fillers: f64,
    pub clarity: f64,
    pub pace: f64,
    pub expressiveness: f64,
    pub willingness_to_speak_up: f64,
    pub example_phrases: Vec<String>,
    pub summary: String,
}

impl Default for CommunicationStyle {
    fn default() -> Self {
        Self {
            sentence_length: 0.5,
            verbosity: 0.5,
            formality: 0.5,
            confidence: 0.5,
            warmth: 0.5,
            directness: 0.5,
            hedging: 0.5,
            asks_for_reassurance: 0.5,
            use_of_fillers: 0.5,
            clarity: 0.5,
            pace: 0.5,
            expressiveness: 0.5,
            willingness_to_speak_up: 0.5,
            example_phrases: Vec::new(),
            summary: String::new(),
        }
    }
}

/// Immutable descriptive profile for one simulated student
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Persona {
    pub identity: Identity,
    #[serde(default)]
    pub personality: PersonalityTraits,
    #[serde(default)]
    pub skills: BTreeMap<String, f64>,
    #[serde(default)]
    pub initial_state: InitialState,
    #[serde(default)]
    pub communication_style: CommunicationStyle,
}

impl Persona {
    /// Check the profile is usable for simulation
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.identity.name.trim().is_empty() {
            return Err(DomainError::InvalidPersona(
                "identity.name is required".to_string(),
            ));
        }
        Ok(())
    }

    /// Clamp authored trait values into their documented ranges
    pub fn normalized(mut self) -> Self {
        self.personality.openness = clamp_unit(self.personality.openness);
        self.personality.conscientiousness = clamp_unit(self.personality.conscientiousness);
        self.personality.extraversion = clamp_unit(self.personality.extraversion);
        self.personality.agreeableness = clamp_unit(self.personality.agreeableness);
        self.personality.emotionality = clamp_unit(self.personality.emotionality);
        for level in self.skills.values_mut() {
            *level = clamp_unit(*level);
        }
        self.initial_state.mood_valence = self.initial_state.mood_valence.clamp(-1.0, 1.0);
        self.initial_state.energy = clamp_unit(self.initial_state.energy);
        self.initial_state.motivation = clamp_unit(self.initial_state.motivation);
        self.initial_state.stress = clamp_unit(self.initial_state.stress);
        self.initial_state.focus = clamp_unit(self.initial_state.focus);
        self.initial_state.engagement_with_lesson =
            clamp_unit(self.initial_state.engagement_with_lesson);
        self
    }

    pub fn name(&self) -> &str {
        &self.identity.name
    }
}
