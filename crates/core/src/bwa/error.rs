//! Error types for BWA aggregation.

use thiserror::Error;

use crate::ledger::AccountType;

/// Errors raised while aggregating a BWA period.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BwaError {
    /// A P&L account falls outside the category mapping table.
    #[error("Account {number:04} ({account_type}) is not covered by the BWA category table")]
    UnmappedAccount {
        /// The 4-digit account number.
        number: u16,
        /// The account's type.
        account_type: AccountType,
    },
}

impl From<BwaError> for belegwerk_shared::AppError {
    fn from(err: BwaError) -> Self {
        Self::Validation(err.to_string())
    }
}
