//! Gapless per-year entry numbering.
//!
//! The counter lives in `entry_sequences` and is only ever advanced inside
//! the database transaction that also inserts the journal entry. A rolled
//! back insert rolls back the counter with it, so committed entries are
//! numbered 1..N without holes.

use sea_orm::{ConnectionTrait, DatabaseTransaction, DbErr, Statement};

use belegwerk_shared::error::AppError;
use belegwerk_shared::types::ReferenceNumber;

/// Error types for sequence operations.
#[derive(Debug, thiserror::Error)]
pub enum SequenceError {
    /// The upsert returned no row, which should not happen.
    #[error("Sequence upsert for year {0} returned no counter")]
    NoCounter(i32),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<SequenceError> for AppError {
    fn from(err: SequenceError) -> Self {
        Self::Database(err.to_string())
    }
}

/// Atomic `INSERT .. ON CONFLICT .. RETURNING` counter advance.
///
/// Concurrent callers for the same year serialize on the row lock taken by
/// `DO UPDATE`; each transaction sees a distinct counter value.
const NEXT_COUNTER_SQL: &str = "\
INSERT INTO entry_sequences (year, counter) VALUES ($1, 1) \
ON CONFLICT (year) DO UPDATE SET counter = entry_sequences.counter + 1 \
RETURNING counter";

/// Reserves the next entry number for `year` within `txn`.
///
/// Must be called inside the transaction that inserts the entry; the
/// reservation only becomes durable when that transaction commits.
///
/// # Errors
///
/// Returns an error if the statement fails or returns no row.
pub async fn next_entry_number(
    txn: &DatabaseTransaction,
    year: i32,
) -> Result<ReferenceNumber, SequenceError> {
    let stmt = Statement::from_sql_and_values(
        sea_orm::DatabaseBackend::Postgres,
        NEXT_COUNTER_SQL,
        [year.into()],
    );

    let row = txn
        .query_one(stmt)
        .await?
        .ok_or(SequenceError::NoCounter(year))?;
    let counter: i64 = row.try_get("", "counter")?;

    Ok(ReferenceNumber::new(year, counter))
}
