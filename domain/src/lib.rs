//! Domain layer for classroom-sim
//!
//! This crate contains the classroom simulation's core business logic:
//! entities, value objects and the pure round-processing rules. It has no
//! dependencies on infrastructure or presentation concerns — no IO, no
//! async, no clocks.
//!
//! # Core Concepts
//!
//! ## Round
//!
//! One teacher utterance processed atomically: a selection of students
//! to simulate, their sanitized reactions merged into the session, idle
//! decay for everyone else, and a history entry for the KPI aggregation.
//!
//! ## Sanitizers
//!
//! Selection and reaction outputs come from generative capabilities and
//! are never trusted: the sanitizers in [`selection`] and [`reaction`]
//! turn arbitrary JSON into strict, roster-consistent domain types and
//! never fail.

pub mod classroom;
pub mod core;
pub mod kpi;
pub mod policy;
pub mod reaction;
pub mod selection;

// Re-export commonly used types
pub use classroom::{
    log::{LogEntry, SpeakerKind},
    mood::ClassMood,
    persona::{CommunicationStyle, Identity, InitialState, Persona, PersonalityTraits},
    session::ClassroomSession,
    status::StudentStatus,
    student::{Student, StudentState},
};
pub use core::{
    error::DomainError,
    ids::{SessionId, StudentId},
};
pub use kpi::{
    aggregate::{SessionKpis, TalkRatio, calculate_kpis},
    entry::RoundEntry,
};
pub use policy::RoundPolicy;
pub use reaction::{output::Reaction, sanitize::sanitize_reaction};
pub use selection::{output::Selection, sanitize::sanitize_selection};
