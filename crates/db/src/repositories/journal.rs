//! Journal repository for ledger entry database operations.

use chrono::{Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection,
    DatabaseTransaction, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    Set, SqlErr, TransactionTrait,
};
use uuid::Uuid;

use belegwerk_core::ledger::{
    BookingInput, LedgerError, SourceType, StornoSource, build_storno, validate_booking,
};
use belegwerk_shared::error::AppError;
use belegwerk_shared::types::PageRequest;

use crate::entities::{chart_of_accounts, journal_entries, sea_orm_active_enums};
use crate::repositories::sequence::{self, SequenceError};

/// Attempts at reserving a number before giving up.
const CREATE_RETRIES: u32 = 3;

/// Error types for journal operations.
#[derive(Debug, thiserror::Error)]
pub enum JournalError {
    /// Entry not found.
    #[error("Entry not found: {0}")]
    NotFound(Uuid),

    /// Entry number not found.
    #[error("Entry number '{0}' not found")]
    NumberNotFound(String),

    /// Entry is locked and immutable.
    #[error("Entry {0} is locked and cannot be changed")]
    Locked(String),

    /// Account referenced by the booking does not exist.
    #[error("Account not found: {0}")]
    AccountNotFound(Uuid),

    /// Account is deactivated.
    #[error("Account {0} is inactive")]
    AccountInactive(i32),

    /// Booking rule violation.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Numbering failure.
    #[error(transparent)]
    Sequence(#[from] SequenceError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<JournalError> for AppError {
    fn from(err: JournalError) -> Self {
        match err {
            JournalError::NotFound(_)
            | JournalError::NumberNotFound(_)
            | JournalError::AccountNotFound(_) => Self::NotFound(err.to_string()),
            JournalError::Locked(_) => Self::Conflict(err.to_string()),
            JournalError::AccountInactive(_) => Self::Validation(err.to_string()),
            JournalError::Ledger(e) => e.into(),
            JournalError::Sequence(e) => e.into(),
            JournalError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Input for updating an unlocked entry. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateEntryInput {
    pub booking_date: Option<NaiveDate>,
    pub debit_account_id: Option<Uuid>,
    pub credit_account_id: Option<Uuid>,
    pub amount: Option<Decimal>,
    pub description: Option<String>,
}

/// Filter options for listing journal entries.
#[derive(Debug, Clone, Default)]
pub struct EntryFilter {
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    /// Matches the debit or the credit side.
    pub account_id: Option<Uuid>,
    pub source_type: Option<sea_orm_active_enums::SourceType>,
    pub locked: Option<bool>,
}

/// Journal repository for entry CRUD and storno operations.
#[derive(Debug, Clone)]
pub struct JournalRepository {
    db: DatabaseConnection,
}

impl JournalRepository {
    /// Creates a new journal repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a journal entry with a freshly reserved entry number.
    ///
    /// The number reservation and the insert share one transaction, so a
    /// failed insert never burns a number.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The booking violates a ledger rule (same account, non-positive
    ///   amount, blank description)
    /// - A referenced account does not exist or is inactive
    /// - The database operation fails after all retries
    pub async fn create_entry(
        &self,
        input: BookingInput,
    ) -> Result<journal_entries::Model, JournalError> {
        validate_booking(&input)?;

        let year = input.booking_date.year();
        let mut attempt = 0;
        loop {
            attempt += 1;
            let txn = self.db.begin().await?;

            match Self::insert_numbered(&txn, &input, year).await {
                Ok(entry) => {
                    txn.commit().await?;
                    return Ok(entry);
                }
                Err(err) => {
                    txn.rollback().await?;
                    if attempt >= CREATE_RETRIES || !is_retryable(&err) {
                        return Err(err);
                    }
                    tracing::warn!(attempt, year, "entry insert conflicted, retrying");
                }
            }
        }
    }

    /// Validates the account references and inserts the entry, all on the
    /// caller's transaction. A conflicting insert rolls everything back,
    /// account checks included.
    async fn insert_numbered(
        txn: &DatabaseTransaction,
        input: &BookingInput,
        year: i32,
    ) -> Result<journal_entries::Model, JournalError> {
        Self::check_account(txn, input.debit_account_id).await?;
        Self::check_account(txn, input.credit_account_id).await?;

        let number = sequence::next_entry_number(txn, year).await?;
        let now = Utc::now().into();

        let entry = journal_entries::ActiveModel {
            id: Set(Uuid::new_v4()),
            entry_number: Set(number.to_string()),
            booking_date: Set(input.booking_date),
            debit_account_id: Set(input.debit_account_id),
            credit_account_id: Set(input.credit_account_id),
            amount: Set(input.amount),
            description: Set(input.description.clone()),
            source_type: Set(input.source_type.into()),
            reversal_of_entry_id: Set(input.reversal_of_entry_id),
            locked: Set(false),
            locked_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(entry.insert(txn).await?)
    }

    async fn check_account<C: ConnectionTrait>(conn: &C, id: Uuid) -> Result<(), JournalError> {
        let account = chart_of_accounts::Entity::find_by_id(id)
            .one(conn)
            .await?
            .ok_or(JournalError::AccountNotFound(id))?;
        if !account.active {
            return Err(JournalError::AccountInactive(account.account_number));
        }
        Ok(())
    }

    /// Gets an entry by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry is not found or the query fails.
    pub async fn get_entry(&self, id: Uuid) -> Result<journal_entries::Model, JournalError> {
        journal_entries::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(JournalError::NotFound(id))
    }

    /// Gets an entry by its `BEL-YYYY-NNNNNN` number.
    ///
    /// # Errors
    ///
    /// Returns an error if the number is unknown or the query fails.
    pub async fn find_by_number(
        &self,
        entry_number: &str,
    ) -> Result<journal_entries::Model, JournalError> {
        journal_entries::Entity::find()
            .filter(journal_entries::Column::EntryNumber.eq(entry_number))
            .one(&self.db)
            .await?
            .ok_or_else(|| JournalError::NumberNotFound(entry_number.to_string()))
    }

    /// Lists entries with filters, newest booking date first.
    ///
    /// Returns the page of entries and the total match count.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_entries(
        &self,
        filter: EntryFilter,
        page: PageRequest,
    ) -> Result<(Vec<journal_entries::Model>, u64), JournalError> {
        let page = page.clamped();
        let mut query = journal_entries::Entity::find();

        if let Some(date_from) = filter.date_from {
            query = query.filter(journal_entries::Column::BookingDate.gte(date_from));
        }
        if let Some(date_to) = filter.date_to {
            query = query.filter(journal_entries::Column::BookingDate.lte(date_to));
        }
        if let Some(account_id) = filter.account_id {
            query = query.filter(
                Condition::any()
                    .add(journal_entries::Column::DebitAccountId.eq(account_id))
                    .add(journal_entries::Column::CreditAccountId.eq(account_id)),
            );
        }
        if let Some(source_type) = filter.source_type {
            query = query.filter(journal_entries::Column::SourceType.eq(source_type));
        }
        if let Some(locked) = filter.locked {
            query = query.filter(journal_entries::Column::Locked.eq(locked));
        }

        let total = query.clone().count(&self.db).await?;
        let entries = query
            .order_by_desc(journal_entries::Column::BookingDate)
            .order_by_desc(journal_entries::Column::EntryNumber)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        Ok((entries, total))
    }

    /// Updates an unlocked entry.
    ///
    /// The merged booking is re-validated before writing; the entry number
    /// never changes. The write itself is a compare-and-set on
    /// `locked = false`, so a lock that lands between the read and the write
    /// still turns into a clean conflict.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry is locked, a new account reference is
    /// invalid, or the resulting booking violates a ledger rule.
    pub async fn update_entry(
        &self,
        id: Uuid,
        input: UpdateEntryInput,
    ) -> Result<journal_entries::Model, JournalError> {
        let entry = self.get_entry(id).await?;
        if entry.locked {
            return Err(JournalError::Locked(entry.entry_number));
        }

        let merged = BookingInput {
            booking_date: input.booking_date.unwrap_or(entry.booking_date),
            debit_account_id: input.debit_account_id.unwrap_or(entry.debit_account_id),
            credit_account_id: input.credit_account_id.unwrap_or(entry.credit_account_id),
            amount: input.amount.unwrap_or(entry.amount),
            description: input.description.clone().unwrap_or_else(|| entry.description.clone()),
            source_type: entry.source_type.clone().into(),
            reversal_of_entry_id: entry.reversal_of_entry_id,
        };
        validate_booking(&merged)?;

        if let Some(debit_account_id) = input.debit_account_id {
            Self::check_account(&self.db, debit_account_id).await?;
        }
        if let Some(credit_account_id) = input.credit_account_id {
            Self::check_account(&self.db, credit_account_id).await?;
        }

        let result = journal_entries::Entity::update_many()
            .col_expr(
                journal_entries::Column::BookingDate,
                Expr::value(merged.booking_date),
            )
            .col_expr(
                journal_entries::Column::DebitAccountId,
                Expr::value(merged.debit_account_id),
            )
            .col_expr(
                journal_entries::Column::CreditAccountId,
                Expr::value(merged.credit_account_id),
            )
            .col_expr(journal_entries::Column::Amount, Expr::value(merged.amount))
            .col_expr(
                journal_entries::Column::Description,
                Expr::value(merged.description),
            )
            .col_expr(
                journal_entries::Column::UpdatedAt,
                Expr::value(Utc::now()),
            )
            .filter(journal_entries::Column::Id.eq(id))
            .filter(journal_entries::Column::Locked.eq(false))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(JournalError::Locked(entry.entry_number));
        }

        self.get_entry(id).await
    }

    /// Deletes an unlocked entry.
    ///
    /// Locked entries are immutable; the only way to undo them is a storno.
    /// Like [`Self::update_entry`], the delete is conditional on
    /// `locked = false`.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry is locked, missing, or the delete fails.
    pub async fn delete_entry(&self, id: Uuid) -> Result<(), JournalError> {
        let entry = self.get_entry(id).await?;
        if entry.locked {
            return Err(JournalError::Locked(entry.entry_number));
        }

        let result = journal_entries::Entity::delete_many()
            .filter(journal_entries::Column::Id.eq(id))
            .filter(journal_entries::Column::Locked.eq(false))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(JournalError::Locked(entry.entry_number));
        }

        Ok(())
    }

    /// Creates a storno entry reversing a locked entry.
    ///
    /// The storno swaps debit and credit, keeps the amount, is dated `today`
    /// and gets its own fresh entry number.
    ///
    /// # Errors
    ///
    /// Returns an error if the original is unlocked, already a storno, or
    /// the insert fails.
    pub async fn reverse_entry(
        &self,
        id: Uuid,
        today: NaiveDate,
    ) -> Result<journal_entries::Model, JournalError> {
        let entry = self.get_entry(id).await?;

        let source = StornoSource {
            entry_id: entry.id,
            entry_number: entry.entry_number.clone(),
            debit_account_id: entry.debit_account_id,
            credit_account_id: entry.credit_account_id,
            amount: entry.amount,
            description: entry.description.clone(),
            locked: entry.locked,
            is_storno: entry.source_type == sea_orm_active_enums::SourceType::Reversal,
        };
        let storno = build_storno(&source, today)?;
        debug_assert_eq!(storno.source_type, SourceType::Reversal);

        self.create_entry(storno).await
    }
}

/// A unique-key conflict on the entry number means another writer won the
/// race for the same counter value; the retry reserves a fresh one.
fn is_retryable(err: &JournalError) -> bool {
    match err {
        JournalError::Database(db_err) => {
            matches!(db_err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
        }
        _ => false,
    }
}
