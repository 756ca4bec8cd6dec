//! Business rule validation for bookings.

use rust_decimal::Decimal;

use super::error::LedgerError;
use super::types::BookingInput;

/// Validates a booking before it is handed to the repository.
///
/// These are the rules that need no database access: both sides must be
/// distinct accounts, the amount must be strictly positive, and the booking
/// text must not be empty. Account existence is the repository's job.
///
/// # Errors
///
/// Returns a [`LedgerError`] describing the first violated rule.
pub fn validate_booking(input: &BookingInput) -> Result<(), LedgerError> {
    if input.debit_account_id == input.credit_account_id {
        return Err(LedgerError::SameAccount);
    }

    if input.amount <= Decimal::ZERO {
        return Err(LedgerError::NonPositiveAmount(input.amount));
    }

    if input.description.trim().is_empty() {
        return Err(LedgerError::EmptyDescription);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::types::SourceType;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn make_booking(amount: Decimal) -> BookingInput {
        BookingInput {
            booking_date: NaiveDate::from_ymd_opt(2026, 1, 10).unwrap(),
            debit_account_id: Uuid::new_v4(),
            credit_account_id: Uuid::new_v4(),
            amount,
            description: "Provisionseingang".to_string(),
            source_type: SourceType::Manual,
            reversal_of_entry_id: None,
        }
    }

    #[test]
    fn test_valid_booking() {
        assert!(validate_booking(&make_booking(dec!(500.00))).is_ok());
    }

    #[test]
    fn test_same_account_rejected() {
        let mut input = make_booking(dec!(100));
        input.credit_account_id = input.debit_account_id;
        assert_eq!(validate_booking(&input), Err(LedgerError::SameAccount));
    }

    #[test]
    fn test_zero_amount_rejected() {
        let input = make_booking(dec!(0));
        assert_eq!(
            validate_booking(&input),
            Err(LedgerError::NonPositiveAmount(dec!(0)))
        );
    }

    #[test]
    fn test_negative_amount_rejected() {
        let input = make_booking(dec!(-0.01));
        assert_eq!(
            validate_booking(&input),
            Err(LedgerError::NonPositiveAmount(dec!(-0.01)))
        );
    }

    #[test]
    fn test_blank_description_rejected() {
        let mut input = make_booking(dec!(100));
        input.description = "   ".to_string();
        assert_eq!(validate_booking(&input), Err(LedgerError::EmptyDescription));
    }
}
