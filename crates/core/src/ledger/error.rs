//! Error types for ledger operations.

use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

/// Errors raised by booking validation and storno construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    /// Debit and credit account are the same.
    #[error("Debit and credit account must differ")]
    SameAccount,

    /// Amount is zero or negative.
    #[error("Amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),

    /// Booking text is empty.
    #[error("Description must not be empty")]
    EmptyDescription,

    /// A storno may only correct a locked entry; unlocked mistakes are deleted.
    #[error("Entry {0} is not locked; delete it instead of reversing")]
    ReversalRequiresLocked(Uuid),

    /// Storno of a storno is not allowed.
    #[error("Entry {0} is itself a storno and cannot be reversed")]
    CannotReverseStorno(Uuid),
}

impl From<LedgerError> for belegwerk_shared::AppError {
    fn from(err: LedgerError) -> Self {
        Self::Validation(err.to_string())
    }
}
