//! Storno (reversal) construction for locked journal entries.
//!
//! GoBD compliance forbids editing or deleting locked entries. The only way
//! to correct locked history is a storno: a new entry with debit and credit
//! swapped, the same amount, dated on the day of the reversal, referencing
//! the original.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::error::LedgerError;
use super::types::{BookingInput, SourceType};

/// The fields of the original entry a storno is derived from.
#[derive(Debug, Clone)]
pub struct StornoSource {
    /// Original entry id.
    pub entry_id: Uuid,
    /// Original reference number (`BEL-YYYY-NNNNNN`), carried into the storno text.
    pub entry_number: String,
    /// Original debit account.
    pub debit_account_id: Uuid,
    /// Original credit account.
    pub credit_account_id: Uuid,
    /// Original amount.
    pub amount: Decimal,
    /// Original booking text.
    pub description: String,
    /// Whether the original is locked.
    pub locked: bool,
    /// Whether the original is itself a storno.
    pub is_storno: bool,
}

/// Builds the booking that cancels `original`.
///
/// Debit and credit are swapped, the amount is preserved, and the entry is
/// dated `today` (not the original booking date). The original entry is not
/// touched.
///
/// # Errors
///
/// - [`LedgerError::ReversalRequiresLocked`] when the original is unlocked;
///   unlocked mistakes are corrected by deleting the entry outright.
/// - [`LedgerError::CannotReverseStorno`] when the original is itself a storno.
pub fn build_storno(original: &StornoSource, today: NaiveDate) -> Result<BookingInput, LedgerError> {
    if !original.locked {
        return Err(LedgerError::ReversalRequiresLocked(original.entry_id));
    }

    if original.is_storno {
        return Err(LedgerError::CannotReverseStorno(original.entry_id));
    }

    Ok(BookingInput {
        booking_date: today,
        debit_account_id: original.credit_account_id,
        credit_account_id: original.debit_account_id,
        amount: original.amount,
        description: format!(
            "STORNO: {} (Beleg {})",
            original.description, original.entry_number
        ),
        source_type: SourceType::Reversal,
        reversal_of_entry_id: Some(original.entry_id),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn locked_original() -> StornoSource {
        StornoSource {
            entry_id: Uuid::new_v4(),
            entry_number: "BEL-2026-000007".to_string(),
            debit_account_id: Uuid::new_v4(),
            credit_account_id: Uuid::new_v4(),
            amount: dec!(500.00),
            description: "Provisionseingang".to_string(),
            locked: true,
            is_storno: false,
        }
    }

    #[test]
    fn test_storno_swaps_accounts_and_keeps_amount() {
        let original = locked_original();
        let today = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();

        let storno = build_storno(&original, today).unwrap();

        assert_eq!(storno.debit_account_id, original.credit_account_id);
        assert_eq!(storno.credit_account_id, original.debit_account_id);
        assert_eq!(storno.amount, original.amount);
        assert_eq!(storno.booking_date, today);
        assert_eq!(storno.source_type, SourceType::Reversal);
        assert_eq!(storno.reversal_of_entry_id, Some(original.entry_id));
    }

    #[test]
    fn test_storno_description_carries_original_beleg() {
        let original = locked_original();
        let storno =
            build_storno(&original, NaiveDate::from_ymd_opt(2026, 2, 1).unwrap()).unwrap();

        assert_eq!(
            storno.description,
            "STORNO: Provisionseingang (Beleg BEL-2026-000007)"
        );
    }

    #[test]
    fn test_unlocked_original_rejected() {
        let mut original = locked_original();
        original.locked = false;

        let result = build_storno(&original, NaiveDate::from_ymd_opt(2026, 2, 1).unwrap());
        assert_eq!(
            result,
            Err(LedgerError::ReversalRequiresLocked(original.entry_id))
        );
    }

    #[test]
    fn test_storno_of_storno_rejected() {
        let mut original = locked_original();
        original.is_storno = true;

        let result = build_storno(&original, NaiveDate::from_ymd_opt(2026, 2, 1).unwrap());
        assert_eq!(
            result,
            Err(LedgerError::CannotReverseStorno(original.entry_id))
        );
    }
}
