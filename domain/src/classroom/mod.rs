//! Classroom aggregate: session, students, log and derived mood
//!
//! - [`session::ClassroomSession`] — the root aggregate one round mutates
//! - [`student::Student`] — persona plus mutable simulation state
//! - [`status::StudentStatus`] — the six-way student state machine
//! - [`log::LogEntry`] — append-only session transcript
//! - [`mood::ClassMood`] — whole-class mood derived from the roster

pub mod log;
pub mod mood;
pub mod persona;
pub mod session;
pub mod status;
pub mod student;
