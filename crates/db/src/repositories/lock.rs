//! Lock manager for journal entries (Festschreibung).
//!
//! Locking is a one-way transition: once `locked` is set the row becomes
//! immutable, enforced both here and by the `enforce_entry_lock` database
//! trigger. Locking an already locked entry is a no-op.

use chrono::{NaiveDate, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};
use uuid::Uuid;

use belegwerk_shared::error::AppError;

use crate::entities::journal_entries;

/// Error types for lock operations.
#[derive(Debug, thiserror::Error)]
pub enum LockError {
    /// Entry not found.
    #[error("Entry not found: {0}")]
    NotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<LockError> for AppError {
    fn from(err: LockError) -> Self {
        match err {
            LockError::NotFound(_) => Self::NotFound(err.to_string()),
            LockError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Lock repository for GoBD immutability operations.
#[derive(Debug, Clone)]
pub struct LockRepository {
    db: DatabaseConnection,
}

impl LockRepository {
    /// Creates a new lock repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Locks a single entry. Idempotent: locking twice keeps the first
    /// `locked_at` and succeeds.
    ///
    /// The update is a compare-and-set on `locked = false`, so concurrent
    /// lockers race harmlessly; exactly one of them flips the flag.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry does not exist or the update fails.
    pub async fn lock_entry(&self, id: Uuid) -> Result<journal_entries::Model, LockError> {
        let result = journal_entries::Entity::update_many()
            .col_expr(
                journal_entries::Column::Locked,
                Expr::value(true),
            )
            .col_expr(
                journal_entries::Column::LockedAt,
                Expr::value(Utc::now()),
            )
            .filter(journal_entries::Column::Id.eq(id))
            .filter(journal_entries::Column::Locked.eq(false))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            tracing::debug!(entry_id = %id, "lock was a no-op, entry already locked or missing");
        }

        journal_entries::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(LockError::NotFound(id))
    }

    /// Locks every unlocked entry with a booking date inside the range.
    ///
    /// Used before a DATEV export so the exported period cannot drift
    /// afterwards. Returns the number of entries that were newly locked.
    ///
    /// # Errors
    ///
    /// Returns an error if the bulk update fails.
    pub async fn lock_period(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<u64, LockError> {
        let result = journal_entries::Entity::update_many()
            .col_expr(
                journal_entries::Column::Locked,
                Expr::value(true),
            )
            .col_expr(
                journal_entries::Column::LockedAt,
                Expr::value(Utc::now()),
            )
            .filter(journal_entries::Column::BookingDate.gte(start_date))
            .filter(journal_entries::Column::BookingDate.lte(end_date))
            .filter(journal_entries::Column::Locked.eq(false))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
