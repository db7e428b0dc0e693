//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure and presentation
//! adapters must implement.

pub mod reactor;
pub mod round_observer;
pub mod selector;
pub mod session_store;
pub mod transcript_logger;
