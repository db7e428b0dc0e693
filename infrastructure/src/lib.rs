//! Infrastructure layer for classroom-sim
//!
//! Adapters that connect the application ports to the outside world:
//! chat-completions capabilities, file-based session storage, TOML
//! configuration and the JSONL transcript writer.

pub mod config;
pub mod llm;
pub mod logging;
pub mod persistence;
