//! Tunable round-processing policy
//!
//! [`RoundPolicy`] names every constant the round pipeline applies:
//! decay, escalation, caps and bounds. Defaults match the reference
//! behavior; configuration may override individual values.

use serde::{Deserialize, Serialize};

/// Named constants governing selection caps, decay, escalation and
/// value bounds during round processing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundPolicy {
    /// Maximum students simulated per round.
    pub simulate_cap: usize,
    /// Attention lost by every idle student each round.
    pub idle_attention_decay: f64,
    /// Below this attention a listening idle student zones out.
    pub zone_out_threshold: f64,
    /// Consecutive idle rounds with a raised hand before frustration.
    pub frustration_rounds: u32,
    /// Largest attention/understanding step a reaction may apply.
    pub max_delta: f64,
    /// Memory notes kept per student.
    pub memory_capacity: usize,
    /// Longest accepted memory note, in characters.
    pub max_note_chars: usize,
    /// Starting attention for a fresh student.
    pub baseline_attention: f64,
    /// Starting understanding for a fresh student.
    pub baseline_understanding: f64,
}

impl Default for RoundPolicy {
    fn default() -> Self {
        Self {
            simulate_cap: 5,
            idle_attention_decay: 0.5,
            zone_out_threshold: 20.0,
            frustration_rounds: 3,
            max_delta: 20.0,
            memory_capacity: 5,
            max_note_chars: 100,
            baseline_attention: 75.0,
            baseline_understanding: 50.0,
        }
    }
}

impl RoundPolicy {
    // ==================== Builder Methods ====================

    pub fn with_simulate_cap(mut self, cap: usize) -> Self {
        self.simulate_cap = cap;
        self
    }

    pub fn with_idle_attention_decay(mut self, decay: f64) -> Self {
        self.idle_attention_decay = decay;
        self
    }

    pub fn with_zone_out_threshold(mut self, threshold: f64) -> Self {
        self.zone_out_threshold = threshold;
        self
    }

    pub fn with_frustration_rounds(mut self, rounds: u32) -> Self {
        self.frustration_rounds = rounds;
        self
    }

    pub fn with_max_delta(mut self, max: f64) -> Self {
        self.max_delta = max;
        self
    }
}
