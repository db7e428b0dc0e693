//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod run_round;
pub mod session_report;
pub mod start_session;
