//! Active enums mapped to PostgreSQL enum types.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// SKR04 account categories.
#[derive(Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "account_type")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountType {
    #[sea_orm(string_value = "ASSET")]
    Asset,
    #[sea_orm(string_value = "LIABILITY")]
    Liability,
    #[sea_orm(string_value = "REVENUE")]
    Revenue,
    #[sea_orm(string_value = "EXPENSE")]
    Expense,
}

/// Origin of a journal entry.
#[derive(Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "source_type")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SourceType {
    #[sea_orm(string_value = "MANUAL")]
    Manual,
    #[sea_orm(string_value = "SYSTEM")]
    System,
    #[sea_orm(string_value = "REVERSAL")]
    Reversal,
}

impl From<belegwerk_core::ledger::AccountType> for AccountType {
    fn from(value: belegwerk_core::ledger::AccountType) -> Self {
        match value {
            belegwerk_core::ledger::AccountType::Asset => Self::Asset,
            belegwerk_core::ledger::AccountType::Liability => Self::Liability,
            belegwerk_core::ledger::AccountType::Revenue => Self::Revenue,
            belegwerk_core::ledger::AccountType::Expense => Self::Expense,
        }
    }
}

impl From<AccountType> for belegwerk_core::ledger::AccountType {
    fn from(value: AccountType) -> Self {
        match value {
            AccountType::Asset => Self::Asset,
            AccountType::Liability => Self::Liability,
            AccountType::Revenue => Self::Revenue,
            AccountType::Expense => Self::Expense,
        }
    }
}

impl From<belegwerk_core::ledger::SourceType> for SourceType {
    fn from(value: belegwerk_core::ledger::SourceType) -> Self {
        match value {
            belegwerk_core::ledger::SourceType::Manual => Self::Manual,
            belegwerk_core::ledger::SourceType::System => Self::System,
            belegwerk_core::ledger::SourceType::Reversal => Self::Reversal,
        }
    }
}

impl From<SourceType> for belegwerk_core::ledger::SourceType {
    fn from(value: SourceType) -> Self {
        match value {
            SourceType::Manual => Self::Manual,
            SourceType::System => Self::System,
            SourceType::Reversal => Self::Reversal,
        }
    }
}
