//! File-based persistence adapters

mod file_repository;
mod roster;

pub use file_repository::FileSessionRepository;
pub use roster::{RosterError, load_roster};
