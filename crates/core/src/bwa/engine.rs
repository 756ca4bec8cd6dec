//! BWA aggregation over journal postings.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::category::{BwaCategory, categorize};
use super::error::BwaError;
use super::types::{BwaLine, BwaPeriod, OperatingExpenses};
use crate::ledger::AccountType;

/// A journal entry reduced to what the BWA needs: the amount and the two
/// accounts it touches.
#[derive(Debug, Clone)]
pub struct Posting {
    /// Booking amount (always positive).
    pub amount: Decimal,
    /// Debit account number.
    pub debit_number: u16,
    /// Debit account type.
    pub debit_type: AccountType,
    /// Credit account number.
    pub credit_number: u16,
    /// Credit account type.
    pub credit_type: AccountType,
}

/// Aggregates the postings of one date range into a BWA period.
///
/// Bucket sums follow the standard sign convention: credit-normal buckets
/// (revenue, financial result) accumulate credits minus debits, debit-normal
/// buckets (all expenses) debits minus credits. Both sides of every posting
/// are considered, so a storno cancels its original exactly.
///
/// # Errors
///
/// Returns [`BwaError::UnmappedAccount`] when a P&L account is outside the
/// category table.
pub fn build_period(
    start_date: NaiveDate,
    end_date: NaiveDate,
    postings: &[Posting],
) -> Result<BwaPeriod, BwaError> {
    let mut buckets: HashMap<BwaCategory, Decimal> = HashMap::new();

    for posting in postings {
        // Debit side: increases debit-normal buckets, decreases credit-normal ones.
        if let Some(category) = categorize(posting.debit_type, posting.debit_number)? {
            let delta = if category.is_credit_normal() {
                -posting.amount
            } else {
                posting.amount
            };
            *buckets.entry(category).or_default() += delta;
        }

        // Credit side: the mirror image.
        if let Some(category) = categorize(posting.credit_type, posting.credit_number)? {
            let delta = if category.is_credit_normal() {
                posting.amount
            } else {
                -posting.amount
            };
            *buckets.entry(category).or_default() += delta;
        }
    }

    let bucket = |category: BwaCategory| buckets.get(&category).copied().unwrap_or_default();

    let revenue_total = bucket(BwaCategory::Revenue);
    let cost_of_sales = bucket(BwaCategory::CostOfSales);
    let personnel = bucket(BwaCategory::Personnel);
    let room_costs = bucket(BwaCategory::RoomCosts);
    let vehicle = bucket(BwaCategory::Vehicle);
    let insurance = bucket(BwaCategory::Insurance);
    let marketing = bucket(BwaCategory::Marketing);
    let travel = bucket(BwaCategory::Travel);
    let office = bucket(BwaCategory::Office);
    let other = bucket(BwaCategory::OtherOperating);
    let financial = bucket(BwaCategory::Financial);
    let taxes = bucket(BwaCategory::Taxes);

    let operating_total =
        personnel + room_costs + vehicle + marketing + insurance + travel + office + other;
    let gross_profit = revenue_total - cost_of_sales;
    let operating_result = gross_profit - operating_total;
    let earnings_before_tax = operating_result + financial;
    let net_income = earnings_before_tax - taxes;

    let line = |amount: Decimal| BwaLine {
        amount,
        percent_of_revenue: percent_of(amount, revenue_total),
    };

    Ok(BwaPeriod {
        start_date,
        end_date,
        revenue: line(revenue_total),
        cost_of_sales: line(cost_of_sales),
        gross_profit: line(gross_profit),
        operating_expenses: OperatingExpenses {
            personnel: line(personnel),
            room_costs: line(room_costs),
            vehicle: line(vehicle),
            marketing: line(marketing),
            insurance: line(insurance),
            travel: line(travel),
            office: line(office),
            other: line(other),
            total: line(operating_total),
        },
        operating_result: line(operating_result),
        financial_result: line(financial),
        earnings_before_tax: line(earnings_before_tax),
        taxes: line(taxes),
        net_income: line(net_income),
    })
}

/// `amount / revenue` in percent, rounded to two places; zero when the
/// period has no revenue (never a division by zero).
fn percent_of(amount: Decimal, revenue: Decimal) -> Decimal {
    if revenue == Decimal::ZERO {
        Decimal::ZERO
    } else {
        (amount * Decimal::ONE_HUNDRED / revenue).round_dp(2)
    }
}
