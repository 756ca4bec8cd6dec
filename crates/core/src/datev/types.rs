use belegwerk_shared::error::AppError;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// One journal entry prepared for export, account numbers already resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatevEntry {
    /// Gapless entry number, exported as Belegfeld 1.
    pub entry_number: String,
    pub booking_date: NaiveDate,
    /// SKR04 account number of the debit side, at most 4 digits.
    pub debit_account: String,
    /// SKR04 account number of the credit side, at most 4 digits.
    pub credit_account: String,
    pub amount: Decimal,
    /// DATEV BU-Schlüssel, passed through verbatim when present.
    pub vat_key: Option<String>,
    pub description: String,
}

/// A finished export file ready to be served.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatevExport {
    /// UTF-8 file contents, BOM included.
    pub bytes: Vec<u8>,
    /// `DATEV_Export_{start}_{end}.csv`
    pub filename: String,
    pub mime_type: &'static str,
}

#[derive(Debug, Error)]
pub enum DatevError {
    #[error("no bookable entries between {start_date} and {end_date}")]
    EmptyRange {
        start_date: NaiveDate,
        end_date: NaiveDate,
    },

    #[error("failed to write export: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to finish export: {0}")]
    Io(#[from] std::io::Error),
}

impl From<DatevError> for AppError {
    fn from(err: DatevError) -> Self {
        match err {
            DatevError::EmptyRange { .. } => AppError::Validation(err.to_string()),
            DatevError::Csv(_) | DatevError::Io(_) => AppError::Internal(err.to_string()),
        }
    }
}
