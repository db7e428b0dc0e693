//! Session KPI aggregation
//!
//! Pure derivation over the session snapshot plus the round history.
//! Safe to call at any point after session creation; an empty history
//! produces neutral defaults rather than errors.

use crate::classroom::session::ClassroomSession;
use crate::classroom::status::StudentStatus;
use crate::kpi::entry::RoundEntry;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Rounds on each side of the engagement trend comparison
pub const TREND_WINDOW: usize = 5;
/// Rounds averaged for the rolling Bloom level
pub const BLOOM_WINDOW: usize = 5;
/// Rounds scanned for the hand-raise rate
pub const HAND_RAISE_WINDOW: usize = 10;
/// Rounds without interaction before a zoned-out student is a cold-call risk
pub const COLD_CALL_IDLE_ROUNDS: u32 = 5;

/// Teacher/student share of rounds, as percentages summing to 100
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TalkRatio {
    pub teacher: f64,
    pub students: f64,
}

/// Derived session metrics for end-of-session reporting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionKpis {
    /// Mean attention across the roster right now.
    pub engagement: f64,
    /// Mean engagement snapshot of the last window minus the window
    /// before it; 0 until both windows are full.
    pub engagement_trend: f64,
    pub talk_ratio: TalkRatio,
    /// Rolling mean Bloom level of recent rounds; 1 with no history.
    pub bloom_level: f64,
    /// Percentage of the roster currently confused, zoned out or frustrated.
    pub confusion_index: f64,
    /// Rounds in the recent window that saw at least one new hand.
    pub hand_raise_rate: u32,
    /// Students currently frustrated.
    pub ignored_hands: u32,
    /// Zoned-out students the teacher has not reached in a while.
    pub cold_call_risk: u32,
    /// Percentage of the roster that has spoken at least once.
    pub inclusion_score: f64,
    /// Most recent coaching tip produced by a round, if any.
    pub latest_tip: Option<String>,
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn tail(history: &[RoundEntry], window: usize) -> &[RoundEntry] {
    &history[history.len().saturating_sub(window)..]
}

/// Compute all session KPIs from the current state and round history
pub fn calculate_kpis(session: &ClassroomSession, history: &[RoundEntry]) -> SessionKpis {
    let roster = session.roster_size();
    let total_rounds = session.round_num;

    let engagement = session.average_attention();

    let engagement_trend = if history.len() < 2 * TREND_WINDOW {
        0.0
    } else {
        let snapshots: Vec<f64> = tail(history, 2 * TREND_WINDOW)
            .iter()
            .map(|e| e.engagement_snapshot)
            .collect();
        mean(&snapshots[TREND_WINDOW..]) - mean(&snapshots[..TREND_WINDOW])
    };

    let spoke_rounds = history.iter().filter(|e| e.student_spoke).count() as f64;
    let talk_ratio = if total_rounds == 0 {
        TalkRatio {
            teacher: 100.0,
            students: 0.0,
        }
    } else {
        let total = total_rounds as f64;
        TalkRatio {
            teacher: ((total - spoke_rounds) / total) * 100.0,
            students: (spoke_rounds / total) * 100.0,
        }
    };

    let bloom_level = if history.is_empty() {
        1.0
    } else {
        let recent: Vec<f64> = tail(history, BLOOM_WINDOW)
            .iter()
            .map(|e| e.bloom_level as f64)
            .collect();
        mean(&recent)
    };

    let disengaged = session
        .students
        .values()
        .filter(|s| s.state.status.is_disengaged())
        .count();
    let confusion_index = if roster > 0 {
        (disengaged as f64 / roster as f64) * 100.0
    } else {
        0.0
    };

    let hand_raise_rate = tail(history, HAND_RAISE_WINDOW)
        .iter()
        .filter(|e| e.new_hands_raised > 0)
        .count() as u32;

    let ignored_hands = session
        .students
        .values()
        .filter(|s| s.state.status == StudentStatus::Frustrated)
        .count() as u32;

    let cold_call_risk = session
        .students
        .values()
        .filter(|s| {
            s.state.status == StudentStatus::ZonedOut
                && total_rounds.saturating_sub(s.state.last_interacted_round)
                    > COLD_CALL_IDLE_ROUNDS
        })
        .count() as u32;

    let speakers: BTreeSet<_> = history
        .iter()
        .filter_map(|e| e.student_spoke_id.as_ref())
        .collect();
    let inclusion_score = if roster > 0 {
        (speakers.len() as f64 / roster as f64) * 100.0
    } else {
        0.0
    };

    let latest_tip = history.iter().rev().find_map(|e| e.teacher_tip.clone());

    SessionKpis {
        engagement,
        engagement_trend,
        talk_ratio,
        bloom_level,
        confusion_index,
        hand_raise_rate,
        ignored_hands,
        cold_call_risk,
        inclusion_score,
        latest_tip,
    }
}
