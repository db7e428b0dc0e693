//! Structured transcript logging

mod jsonl_logger;

pub use jsonl_logger::JsonlTranscriptLogger;
