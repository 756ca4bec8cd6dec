//! Report repository: range queries feeding the BWA engine and DATEV export.

use chrono::NaiveDate;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
};
use std::collections::HashMap;
use uuid::Uuid;

use belegwerk_core::bwa::Posting;
use belegwerk_core::datev::DatevEntry;
use belegwerk_core::ledger::AccountType;
use belegwerk_shared::error::AppError;

use crate::entities::{chart_of_accounts, journal_entries};

/// Error types for report queries.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// Entry references an account that no longer resolves.
    #[error("Entry {entry_number} references missing account {account_id}")]
    MissingAccount {
        entry_number: String,
        account_id: Uuid,
    },

    /// Account number outside the four-digit range.
    #[error("Account number {0} is out of range")]
    InvalidAccountNumber(i32),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::MissingAccount { .. } | ReportError::InvalidAccountNumber(_) => {
                Self::Internal(err.to_string())
            }
            ReportError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// A journal entry with both account sides resolved.
#[derive(Debug, Clone)]
pub struct EntryWithAccounts {
    pub entry: journal_entries::Model,
    pub debit_number: u16,
    pub debit_type: AccountType,
    pub debit_vat_key: Option<String>,
    pub credit_number: u16,
    pub credit_type: AccountType,
    pub credit_vat_key: Option<String>,
}

impl EntryWithAccounts {
    /// Projects the entry down to what the BWA aggregation needs.
    #[must_use]
    pub fn to_posting(&self) -> Posting {
        Posting {
            amount: self.entry.amount,
            debit_number: self.debit_number,
            debit_type: self.debit_type,
            credit_number: self.credit_number,
            credit_type: self.credit_type,
        }
    }

    /// Projects the entry into a DATEV export row.
    ///
    /// The BU-Schlüssel comes from the P&L side of the booking; the balance
    /// side never carries one.
    #[must_use]
    pub fn to_datev_entry(&self) -> DatevEntry {
        let vat_key = if self.debit_type.is_profit_and_loss() {
            self.debit_vat_key.clone()
        } else {
            self.credit_vat_key.clone()
        };

        DatevEntry {
            entry_number: self.entry.entry_number.clone(),
            booking_date: self.entry.booking_date,
            debit_account: self.debit_number.to_string(),
            credit_account: self.credit_number.to_string(),
            amount: self.entry.amount,
            vat_key,
            description: self.entry.description.clone(),
        }
    }
}

/// Report repository for period range queries.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    db: DatabaseConnection,
}

impl ReportRepository {
    /// Creates a new report repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Fetches all entries booked inside the range, oldest first, with
    /// account numbers and types resolved.
    ///
    /// With `locked_only` the result is restricted to locked entries, the
    /// mode the DATEV export uses: unlocked entries may still change and
    /// must not leave the house.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or an entry references a
    /// missing account.
    pub async fn entries_in_range(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
        locked_only: bool,
    ) -> Result<Vec<EntryWithAccounts>, ReportError> {
        let mut query = journal_entries::Entity::find()
            .filter(journal_entries::Column::BookingDate.gte(start_date))
            .filter(journal_entries::Column::BookingDate.lte(end_date));
        if locked_only {
            query = query.filter(journal_entries::Column::Locked.eq(true));
        }
        let entries = query
            .order_by_asc(journal_entries::Column::BookingDate)
            .order_by_asc(journal_entries::Column::EntryNumber)
            .all(&self.db)
            .await?;

        let account_ids: Vec<Uuid> = entries
            .iter()
            .flat_map(|e| [e.debit_account_id, e.credit_account_id])
            .collect();
        let accounts: HashMap<Uuid, chart_of_accounts::Model> = chart_of_accounts::Entity::find()
            .filter(chart_of_accounts::Column::Id.is_in(account_ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|a| (a.id, a))
            .collect();

        let mut resolved = Vec::with_capacity(entries.len());
        for entry in entries {
            let debit = lookup(&accounts, &entry, entry.debit_account_id)?;
            let credit = lookup(&accounts, &entry, entry.credit_account_id)?;

            resolved.push(EntryWithAccounts {
                debit_number: account_number(debit)?,
                debit_type: debit.account_type.clone().into(),
                debit_vat_key: debit.vat_key.clone(),
                credit_number: account_number(credit)?,
                credit_type: credit.account_type.clone().into(),
                credit_vat_key: credit.vat_key.clone(),
                entry,
            });
        }

        Ok(resolved)
    }
}

fn lookup<'a>(
    accounts: &'a HashMap<Uuid, chart_of_accounts::Model>,
    entry: &journal_entries::Model,
    account_id: Uuid,
) -> Result<&'a chart_of_accounts::Model, ReportError> {
    accounts
        .get(&account_id)
        .ok_or_else(|| ReportError::MissingAccount {
            entry_number: entry.entry_number.clone(),
            account_id,
        })
}

fn account_number(account: &chart_of_accounts::Model) -> Result<u16, ReportError> {
    u16::try_from(account.account_number)
        .map_err(|_| ReportError::InvalidAccountNumber(account.account_number))
}
