//! Round progress notification port
//!
//! Defines the interface for reporting progress while a round runs.
//! Implementations live in the presentation layer.

use classroom_domain::StudentId;

/// Callback for progress updates during round processing
pub trait RoundObserver: Send + Sync {
    /// Called once the simulate set is final, before the fan-out
    fn on_round_start(&self, round: u32, simulated: usize);

    /// Called as each student's reaction settles (success or degraded)
    fn on_student_reacted(&self, student_id: &StudentId, success: bool);

    /// Called after merge, decay and bookkeeping complete
    fn on_round_complete(&self, round: u32);
}

/// No-op observer for when progress reporting is not needed
pub struct NoRoundObserver;

impl RoundObserver for NoRoundObserver {
    fn on_round_start(&self, _round: u32, _simulated: usize) {}
    fn on_student_reacted(&self, _student_id: &StudentId, _success: bool) {}
    fn on_round_complete(&self, _round: u32) {}
}
