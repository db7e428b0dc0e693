//! Roster file loading
//!
//! A roster is a JSON array of persona objects. Personas are validated
//! at session creation, not here; loading only cares about shape.

use classroom_domain::Persona;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading a roster file
#[derive(Error, Debug)]
pub enum RosterError {
    #[error("Cannot read roster file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Roster is not a JSON array of personas: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Load a roster of personas from a JSON file
pub fn load_roster(path: impl AsRef<Path>) -> Result<Vec<Persona>, RosterError> {
    let bytes = std::fs::read(path.as_ref())?;
    let personas: Vec<Persona> = serde_json::from_slice(&bytes)?;
    Ok(personas)
}
