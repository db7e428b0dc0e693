//! Core domain concepts shared across all subdomains.
//!
//! - [`ids::SessionId`] / [`ids::StudentId`] — validated identifiers
//! - [`error::DomainError`] — domain-level errors

pub mod error;
pub mod ids;
