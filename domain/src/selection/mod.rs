//! Selection boundary: untrusted selector output and its sanitizer
//!
//! - [`output::Selection`] — the strict, roster-consistent decision
//! - [`sanitize::sanitize_selection`] — the never-failing validation pass

pub mod output;
pub mod sanitize;
