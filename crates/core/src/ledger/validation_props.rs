//! Property tests for booking validation and storno construction.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::error::LedgerError;
use super::storno::{StornoSource, build_storno};
use super::types::{BookingInput, SourceType};
use super::validation::validate_booking;

fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (2020i32..2030, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Any booking with distinct accounts, a positive amount, and a
    /// non-empty text passes validation.
    #[test]
    fn prop_positive_distinct_booking_is_valid(
        amount in amount_strategy(),
        date in date_strategy(),
    ) {
        let input = BookingInput {
            booking_date: date,
            debit_account_id: Uuid::new_v4(),
            credit_account_id: Uuid::new_v4(),
            amount,
            description: "Buchung".to_string(),
            source_type: SourceType::Manual,
            reversal_of_entry_id: None,
        };
        prop_assert!(validate_booking(&input).is_ok());
    }

    /// Non-positive amounts are always rejected.
    #[test]
    fn prop_non_positive_amount_rejected(
        raw in -1_000_000_000i64..=0,
        date in date_strategy(),
    ) {
        let input = BookingInput {
            booking_date: date,
            debit_account_id: Uuid::new_v4(),
            credit_account_id: Uuid::new_v4(),
            amount: Decimal::new(raw, 2),
            description: "Buchung".to_string(),
            source_type: SourceType::Manual,
            reversal_of_entry_id: None,
        };
        prop_assert!(matches!(
            validate_booking(&input),
            Err(LedgerError::NonPositiveAmount(_))
        ));
    }

    /// Reversal law: the storno of a locked entry swaps the two accounts,
    /// preserves the amount, and always yields a valid booking.
    #[test]
    fn prop_storno_swap_law(
        amount in amount_strategy(),
        today in date_strategy(),
    ) {
        let original = StornoSource {
            entry_id: Uuid::new_v4(),
            entry_number: "BEL-2026-000001".to_string(),
            debit_account_id: Uuid::new_v4(),
            credit_account_id: Uuid::new_v4(),
            amount,
            description: "Original".to_string(),
            locked: true,
            is_storno: false,
        };

        let storno = build_storno(&original, today).unwrap();

        prop_assert_eq!(storno.debit_account_id, original.credit_account_id);
        prop_assert_eq!(storno.credit_account_id, original.debit_account_id);
        prop_assert_eq!(storno.amount, original.amount);
        prop_assert_eq!(storno.booking_date, today);
        prop_assert!(validate_booking(&storno).is_ok());
    }

    /// A storno is never built from an unlocked original.
    #[test]
    fn prop_storno_requires_locked(
        amount in amount_strategy(),
        today in date_strategy(),
    ) {
        let original = StornoSource {
            entry_id: Uuid::new_v4(),
            entry_number: "BEL-2026-000001".to_string(),
            debit_account_id: Uuid::new_v4(),
            credit_account_id: Uuid::new_v4(),
            amount,
            description: "Original".to_string(),
            locked: false,
            is_storno: false,
        };

        prop_assert!(build_storno(&original, today).is_err());
    }
}
