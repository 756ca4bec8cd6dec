//! Ledger domain types for booking creation and validation.
//!
//! Every journal entry is a single Soll an Haben booking: one debit account,
//! one credit account, one positive amount.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account classification in the SKR04-style chart of accounts.
///
/// In double-entry bookkeeping:
/// - Debits increase asset/expense accounts
/// - Credits increase liability/revenue accounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccountType {
    /// Asset account (Bank, Forderungen, ...).
    Asset,
    /// Liability account (Verbindlichkeiten, ...).
    Liability,
    /// Revenue account (Erlöse).
    Revenue,
    /// Expense account (Aufwand).
    Expense,
}

impl AccountType {
    /// Returns true if the account type is debit-normal (balance grows with debits).
    #[must_use]
    pub const fn is_debit_normal(self) -> bool {
        matches!(self, Self::Asset | Self::Expense)
    }

    /// Returns true if the account belongs to the P&L (BWA) side of the books.
    #[must_use]
    pub const fn is_profit_and_loss(self) -> bool {
        matches!(self, Self::Revenue | Self::Expense)
    }
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Asset => write!(f, "ASSET"),
            Self::Liability => write!(f, "LIABILITY"),
            Self::Revenue => write!(f, "REVENUE"),
            Self::Expense => write!(f, "EXPENSE"),
        }
    }
}

impl std::str::FromStr for AccountType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ASSET" => Ok(Self::Asset),
            "LIABILITY" => Ok(Self::Liability),
            "REVENUE" => Ok(Self::Revenue),
            "EXPENSE" => Ok(Self::Expense),
            _ => Err(format!("Unknown account type: {s}")),
        }
    }
}

/// Origin of a journal entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SourceType {
    /// User-initiated manual booking.
    Manual,
    /// Derived from a marketplace event (commission, payout, ...).
    System,
    /// Storno entry cancelling a locked original.
    Reversal,
}

impl std::fmt::Display for SourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Manual => write!(f, "MANUAL"),
            Self::System => write!(f, "SYSTEM"),
            Self::Reversal => write!(f, "REVERSAL"),
        }
    }
}

impl std::str::FromStr for SourceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "MANUAL" => Ok(Self::Manual),
            "SYSTEM" => Ok(Self::System),
            "REVERSAL" => Ok(Self::Reversal),
            _ => Err(format!("Unknown source type: {s}")),
        }
    }
}

/// Input for creating a journal entry.
///
/// Account existence is checked by the repository against the chart of
/// accounts; the rules that need no database access live in
/// [`super::validation::validate_booking`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingInput {
    /// Booking date (Belegdatum).
    pub booking_date: NaiveDate,
    /// Debit account (Soll).
    pub debit_account_id: Uuid,
    /// Credit account (Haben).
    pub credit_account_id: Uuid,
    /// Amount, strictly positive, currency-minor-unit precision.
    pub amount: Decimal,
    /// Booking text.
    pub description: String,
    /// Origin of the entry.
    pub source_type: SourceType,
    /// Original entry when this booking is a storno.
    pub reversal_of_entry_id: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_account_type_debit_normal() {
        assert!(AccountType::Asset.is_debit_normal());
        assert!(AccountType::Expense.is_debit_normal());
        assert!(!AccountType::Liability.is_debit_normal());
        assert!(!AccountType::Revenue.is_debit_normal());
    }

    #[test]
    fn test_account_type_profit_and_loss() {
        assert!(AccountType::Revenue.is_profit_and_loss());
        assert!(AccountType::Expense.is_profit_and_loss());
        assert!(!AccountType::Asset.is_profit_and_loss());
        assert!(!AccountType::Liability.is_profit_and_loss());
    }

    #[test]
    fn test_account_type_roundtrip() {
        for s in ["ASSET", "LIABILITY", "REVENUE", "EXPENSE"] {
            let parsed = AccountType::from_str(s).unwrap();
            assert_eq!(parsed.to_string(), s);
        }
        assert!(AccountType::from_str("EQUITY").is_err());
    }

    #[test]
    fn test_source_type_roundtrip() {
        for s in ["MANUAL", "SYSTEM", "REVERSAL"] {
            let parsed = SourceType::from_str(s).unwrap();
            assert_eq!(parsed.to_string(), s);
        }
        assert!(SourceType::from_str("IMPORT").is_err());
    }
}
