//! Double-entry booking logic.
//!
//! This module implements the core ledger rules:
//! - Domain types for manual bookings (Soll an Haben)
//! - Business rule validation before persistence
//! - Storno (reversal) construction for locked entries
//! - Error types for ledger operations

pub mod error;
pub mod storno;
pub mod types;
pub mod validation;

#[cfg(test)]
mod validation_props;

pub use error::LedgerError;
pub use storno::{StornoSource, build_storno};
pub use types::{AccountType, BookingInput, SourceType};
pub use validation::validate_booking;
