//! Account-number-range to BWA category mapping.
//!
//! SKR04-style numbering: revenue lives in 4xxx, cost of sales in 5xxx and
//! the low 6xxx range, the remaining operating buckets in fixed 6xxx slices,
//! financial items in 70xx-75xx, taxes in 76xx. Balance-sheet accounts
//! (asset/liability) carry no BWA category.

use serde::Serialize;

use super::error::BwaError;
use crate::ledger::AccountType;

/// Closed set of BWA buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BwaCategory {
    /// Erlöse (4xxx).
    Revenue,
    /// Wareneinsatz / Provisionsaufwand (5xxx, 60xx-61xx).
    CostOfSales,
    /// Personalkosten (62xx).
    Personnel,
    /// Raumkosten (63xx).
    RoomCosts,
    /// Fahrzeugkosten (64xx).
    Vehicle,
    /// Versicherungen und Beiträge (65xx).
    Insurance,
    /// Werbekosten (66xx).
    Marketing,
    /// Reisekosten (67xx).
    Travel,
    /// Büro, Porto, Telefon (68xx).
    Office,
    /// Sonstige betriebliche Aufwendungen (69xx).
    OtherOperating,
    /// Zinsen und Finanzergebnis (70xx-75xx).
    Financial,
    /// Steuern (76xx).
    Taxes,
}

impl BwaCategory {
    /// Returns true for buckets whose balance grows with credits.
    ///
    /// Revenue and the financial result are credit-normal; every expense
    /// bucket is debit-normal. A storno therefore cancels its original in
    /// whichever bucket both touch.
    #[must_use]
    pub const fn is_credit_normal(self) -> bool {
        matches!(self, Self::Revenue | Self::Financial)
    }
}

/// Resolves the BWA bucket for an account.
///
/// Returns `Ok(None)` for balance-sheet accounts (asset/liability), which
/// never appear in the P&L. P&L accounts outside the range table fail with
/// [`BwaError::UnmappedAccount`].
pub fn categorize(
    account_type: AccountType,
    number: u16,
) -> Result<Option<BwaCategory>, BwaError> {
    if !account_type.is_profit_and_loss() {
        return Ok(None);
    }

    let category = match number {
        4000..=4999 => BwaCategory::Revenue,
        5000..=6199 => BwaCategory::CostOfSales,
        6200..=6299 => BwaCategory::Personnel,
        6300..=6399 => BwaCategory::RoomCosts,
        6400..=6499 => BwaCategory::Vehicle,
        6500..=6599 => BwaCategory::Insurance,
        6600..=6699 => BwaCategory::Marketing,
        6700..=6799 => BwaCategory::Travel,
        6800..=6899 => BwaCategory::Office,
        6900..=6999 => BwaCategory::OtherOperating,
        7000..=7599 => BwaCategory::Financial,
        7600..=7699 => BwaCategory::Taxes,
        _ => {
            return Err(BwaError::UnmappedAccount {
                number,
                account_type,
            });
        }
    };

    Ok(Some(category))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(4200, AccountType::Revenue, BwaCategory::Revenue)]
    #[case(5400, AccountType::Expense, BwaCategory::CostOfSales)]
    #[case(6100, AccountType::Expense, BwaCategory::CostOfSales)]
    #[case(6220, AccountType::Expense, BwaCategory::Personnel)]
    #[case(6310, AccountType::Expense, BwaCategory::RoomCosts)]
    #[case(6420, AccountType::Expense, BwaCategory::Vehicle)]
    #[case(6520, AccountType::Expense, BwaCategory::Insurance)]
    #[case(6600, AccountType::Expense, BwaCategory::Marketing)]
    #[case(6700, AccountType::Expense, BwaCategory::Travel)]
    #[case(6815, AccountType::Expense, BwaCategory::Office)]
    #[case(6950, AccountType::Expense, BwaCategory::OtherOperating)]
    #[case(7100, AccountType::Expense, BwaCategory::Financial)]
    #[case(7610, AccountType::Expense, BwaCategory::Taxes)]
    fn test_ranges(
        #[case] number: u16,
        #[case] account_type: AccountType,
        #[case] expected: BwaCategory,
    ) {
        assert_eq!(categorize(account_type, number).unwrap(), Some(expected));
    }

    #[test]
    fn test_balance_sheet_accounts_skipped() {
        assert_eq!(categorize(AccountType::Asset, 1200).unwrap(), None);
        assert_eq!(categorize(AccountType::Liability, 3300).unwrap(), None);
    }

    #[test]
    fn test_unmapped_pnl_account_fails_loudly() {
        let err = categorize(AccountType::Expense, 9999).unwrap_err();
        assert_eq!(
            err,
            BwaError::UnmappedAccount {
                number: 9999,
                account_type: AccountType::Expense
            }
        );
    }

    #[test]
    fn test_credit_normal_buckets() {
        assert!(BwaCategory::Revenue.is_credit_normal());
        assert!(BwaCategory::Financial.is_credit_normal());
        assert!(!BwaCategory::Personnel.is_credit_normal());
        assert!(!BwaCategory::Taxes.is_credit_normal());
    }
}
