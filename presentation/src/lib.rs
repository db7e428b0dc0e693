//! Presentation layer for classroom-sim
//!
//! This crate contains CLI definitions, output formatters,
//! progress reporters, and the interactive session loop.

pub mod cli;
pub mod output;
pub mod progress;
pub mod repl;

// Re-export commonly used types
pub use cli::commands::{Cli, Command, ReportFormat};
pub use output::console::ConsoleFormatter;
pub use progress::reporter::{RoundProgressReporter, SimpleRoundProgress};
pub use repl::session_loop::SessionRepl;
