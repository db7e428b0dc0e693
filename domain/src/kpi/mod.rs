//! Session KPIs: history records and the pure aggregation over them
//!
//! - [`entry::RoundEntry`] — what one completed round contributed
//! - [`aggregate::calculate_kpis`] — session + history to [`aggregate::SessionKpis`]

pub mod aggregate;
pub mod entry;
