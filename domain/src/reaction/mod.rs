//! Reaction boundary: untrusted reactor output and its sanitizer
//!
//! - [`output::Reaction`] — one student's bounded state change
//! - [`sanitize::sanitize_reaction`] — the never-failing validation pass

pub mod output;
pub mod sanitize;
