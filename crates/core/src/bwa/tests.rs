//! Unit tests for BWA aggregation.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::engine::{Posting, build_period};
use super::error::BwaError;
use crate::ledger::AccountType;

fn jan_range() -> (NaiveDate, NaiveDate) {
    (
        NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
    )
}

/// Soll 1200 Bank an Haben 4200 Erlöse.
fn commission_received(amount: Decimal) -> Posting {
    Posting {
        amount,
        debit_number: 1200,
        debit_type: AccountType::Asset,
        credit_number: 4200,
        credit_type: AccountType::Revenue,
    }
}

#[test]
fn test_single_revenue_booking() {
    // 500.00 debit 1200 Bank / credit 4200 Erlöse
    let (start, end) = jan_range();
    let period = build_period(start, end, &[commission_received(dec!(500.00))]).unwrap();

    assert_eq!(period.revenue.amount, dec!(500.00));
    assert_eq!(period.cost_of_sales.amount, Decimal::ZERO);
    assert_eq!(period.gross_profit.amount, dec!(500.00));
    assert_eq!(period.revenue.percent_of_revenue, dec!(100.00));
}

#[test]
fn test_expense_buckets_and_derived_lines() {
    let (start, end) = jan_range();
    let postings = vec![
        commission_received(dec!(1000.00)),
        // Provisionsaufwand an Bank
        Posting {
            amount: dec!(300.00),
            debit_number: 6000,
            debit_type: AccountType::Expense,
            credit_number: 1200,
            credit_type: AccountType::Asset,
        },
        // Gehälter an Bank
        Posting {
            amount: dec!(250.00),
            debit_number: 6220,
            debit_type: AccountType::Expense,
            credit_number: 1200,
            credit_type: AccountType::Asset,
        },
        // Miete an Bank
        Posting {
            amount: dec!(150.00),
            debit_number: 6310,
            debit_type: AccountType::Expense,
            credit_number: 1200,
            credit_type: AccountType::Asset,
        },
    ];

    let period = build_period(start, end, &postings).unwrap();

    assert_eq!(period.revenue.amount, dec!(1000.00));
    assert_eq!(period.cost_of_sales.amount, dec!(300.00));
    assert_eq!(period.gross_profit.amount, dec!(700.00));
    assert_eq!(period.operating_expenses.personnel.amount, dec!(250.00));
    assert_eq!(period.operating_expenses.room_costs.amount, dec!(150.00));
    assert_eq!(period.operating_expenses.total.amount, dec!(400.00));
    assert_eq!(period.operating_result.amount, dec!(300.00));
    assert_eq!(period.net_income.amount, dec!(300.00));

    // Percent lines are relative to revenue
    assert_eq!(period.gross_profit.percent_of_revenue, dec!(70.00));
    assert_eq!(period.operating_result.percent_of_revenue, dec!(30.00));
}

#[test]
fn test_storno_cancels_original() {
    let (start, end) = jan_range();
    let original = commission_received(dec!(500.00));
    // Swapped sides: debit 4200 / credit 1200
    let storno = Posting {
        amount: dec!(500.00),
        debit_number: 4200,
        debit_type: AccountType::Revenue,
        credit_number: 1200,
        credit_type: AccountType::Asset,
    };

    let period = build_period(start, end, &[original, storno]).unwrap();

    assert_eq!(period.revenue.amount, Decimal::ZERO);
    assert_eq!(period.net_income.amount, Decimal::ZERO);
}

#[test]
fn test_no_revenue_means_zero_percent_not_division_by_zero() {
    let (start, end) = jan_range();
    let postings = vec![Posting {
        amount: dec!(100.00),
        debit_number: 6220,
        debit_type: AccountType::Expense,
        credit_number: 1200,
        credit_type: AccountType::Asset,
    }];

    let period = build_period(start, end, &postings).unwrap();

    assert_eq!(period.revenue.amount, Decimal::ZERO);
    assert_eq!(period.operating_expenses.personnel.percent_of_revenue, Decimal::ZERO);
    assert_eq!(period.net_income.amount, dec!(-100.00));
}

#[test]
fn test_financial_result_and_taxes() {
    let (start, end) = jan_range();
    let postings = vec![
        commission_received(dec!(1000.00)),
        // Zinsaufwand an Bank
        Posting {
            amount: dec!(50.00),
            debit_number: 7100,
            debit_type: AccountType::Expense,
            credit_number: 1200,
            credit_type: AccountType::Asset,
        },
        // Steuern an Bank
        Posting {
            amount: dec!(120.00),
            debit_number: 7610,
            debit_type: AccountType::Expense,
            credit_number: 1200,
            credit_type: AccountType::Asset,
        },
    ];

    let period = build_period(start, end, &postings).unwrap();

    assert_eq!(period.financial_result.amount, dec!(-50.00));
    assert_eq!(period.earnings_before_tax.amount, dec!(950.00));
    assert_eq!(period.taxes.amount, dec!(120.00));
    assert_eq!(period.net_income.amount, dec!(830.00));
}

#[test]
fn test_unmapped_pnl_account_aborts_aggregation() {
    let (start, end) = jan_range();
    let postings = vec![Posting {
        amount: dec!(10.00),
        debit_number: 9999,
        debit_type: AccountType::Expense,
        credit_number: 1200,
        credit_type: AccountType::Asset,
    }];

    let err = build_period(start, end, &postings).unwrap_err();
    assert!(matches!(err, BwaError::UnmappedAccount { number: 9999, .. }));
}

#[test]
fn test_periods_are_aggregated_independently() {
    let (start, end) = jan_range();
    let feb_start = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();
    let feb_end = NaiveDate::from_ymd_opt(2026, 2, 28).unwrap();

    let current = build_period(start, end, &[commission_received(dec!(500.00))]).unwrap();
    let comparison = build_period(feb_start, feb_end, &[]).unwrap();

    assert_eq!(current.revenue.amount, dec!(500.00));
    assert_eq!(comparison.revenue.amount, Decimal::ZERO);
}
