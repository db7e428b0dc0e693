//! Application layer for classroom-sim
//!
//! This crate contains the round-processing use cases and the port
//! definitions their collaborators implement. It depends only on the
//! domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    reactor::{ReactionRequest, Reactor, ReactorError},
    round_observer::{NoRoundObserver, RoundObserver},
    selector::{Selector, SelectorError},
    session_store::{SessionRecord, SessionRepository, SessionStoreError, SessionSummary},
    transcript_logger::{NoTranscriptLogger, TranscriptEvent, TranscriptLogger},
};
pub use use_cases::run_round::{RoundOutcome, RunRoundError, RunRoundInput, RunRoundUseCase};
pub use use_cases::session_report::{SessionReport, SessionReportError, SessionReportUseCase};
pub use use_cases::start_session::{StartSessionError, StartSessionInput, StartSessionUseCase};
