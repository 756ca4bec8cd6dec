//! BWA (Betriebswirtschaftliche Auswertung) aggregation.
//!
//! The BWA is the periodic management P&L. It is derived, never persisted:
//! a pure function of the journal entries in a date range plus the chart of
//! accounts. Accounts are mapped to a closed set of category buckets via an
//! explicit number-range table; P&L accounts outside the table fail loudly.

pub mod category;
pub mod engine;
pub mod error;
pub mod types;

#[cfg(test)]
mod tests;

pub use category::BwaCategory;
pub use engine::{Posting, build_period};
pub use error::BwaError;
pub use types::{BwaLine, BwaPeriod, BwaReport, OperatingExpenses};
