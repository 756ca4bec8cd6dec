//! Account repository for chart of accounts database operations.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use belegwerk_shared::error::AppError;

use crate::entities::{chart_of_accounts, journal_entries, sea_orm_active_enums::AccountType};

/// Error types for account operations.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    /// Account number already exists in the chart.
    #[error("Account number {0} already exists")]
    DuplicateNumber(i32),

    /// Account number outside the four-digit SKR04 range.
    #[error("Account number {0} is out of range (0-9999)")]
    NumberOutOfRange(i32),

    /// Account not found.
    #[error("Account not found: {0}")]
    NotFound(Uuid),

    /// Account number not found.
    #[error("Account number {0} not found")]
    NumberNotFound(i32),

    /// Account has journal entries, so it can only be deactivated.
    #[error("Cannot delete account: {0} journal entries reference it")]
    HasEntries(u64),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<AccountError> for AppError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::DuplicateNumber(_) | AccountError::HasEntries(_) => {
                Self::Conflict(err.to_string())
            }
            AccountError::NumberOutOfRange(_) => Self::Validation(err.to_string()),
            AccountError::NotFound(_) | AccountError::NumberNotFound(_) => {
                Self::NotFound(err.to_string())
            }
            AccountError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Input for creating an account.
#[derive(Debug, Clone)]
pub struct CreateAccountInput {
    /// Four-digit SKR04 number.
    pub account_number: i32,
    pub name: String,
    pub account_type: AccountType,
    pub vat_key: Option<String>,
}

/// Input for updating an account. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateAccountInput {
    pub name: Option<String>,
    pub vat_key: Option<Option<String>>,
    pub active: Option<bool>,
}

/// Filter options for listing accounts.
#[derive(Debug, Clone, Default)]
pub struct AccountFilter {
    pub account_type: Option<AccountType>,
    /// When true, inactive accounts are excluded.
    pub active_only: bool,
}

/// Account repository for chart of accounts CRUD operations.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    db: DatabaseConnection,
}

impl AccountRepository {
    /// Creates a new account repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new account in the chart.
    ///
    /// # Errors
    ///
    /// Returns an error if the number is out of range, already taken,
    /// or the database operation fails.
    pub async fn create_account(
        &self,
        input: CreateAccountInput,
    ) -> Result<chart_of_accounts::Model, AccountError> {
        if !(0..=9999).contains(&input.account_number) {
            return Err(AccountError::NumberOutOfRange(input.account_number));
        }

        let existing = chart_of_accounts::Entity::find()
            .filter(chart_of_accounts::Column::AccountNumber.eq(input.account_number))
            .one(&self.db)
            .await?;
        if existing.is_some() {
            return Err(AccountError::DuplicateNumber(input.account_number));
        }

        let now = Utc::now().into();
        let account = chart_of_accounts::ActiveModel {
            id: Set(Uuid::new_v4()),
            account_number: Set(input.account_number),
            name: Set(input.name),
            account_type: Set(input.account_type),
            vat_key: Set(input.vat_key),
            active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(account.insert(&self.db).await?)
    }

    /// Lists accounts ordered by account number.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_accounts(
        &self,
        filter: AccountFilter,
    ) -> Result<Vec<chart_of_accounts::Model>, AccountError> {
        let mut query = chart_of_accounts::Entity::find();

        if let Some(account_type) = filter.account_type {
            query = query.filter(chart_of_accounts::Column::AccountType.eq(account_type));
        }
        if filter.active_only {
            query = query.filter(chart_of_accounts::Column::Active.eq(true));
        }

        let accounts = query
            .order_by_asc(chart_of_accounts::Column::AccountNumber)
            .all(&self.db)
            .await?;

        Ok(accounts)
    }

    /// Gets an account by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the account is not found or the query fails.
    pub async fn get_account(&self, id: Uuid) -> Result<chart_of_accounts::Model, AccountError> {
        chart_of_accounts::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AccountError::NotFound(id))
    }

    /// Gets an account by SKR04 number.
    ///
    /// # Errors
    ///
    /// Returns an error if the number is not present or the query fails.
    pub async fn get_by_number(
        &self,
        account_number: i32,
    ) -> Result<chart_of_accounts::Model, AccountError> {
        chart_of_accounts::Entity::find()
            .filter(chart_of_accounts::Column::AccountNumber.eq(account_number))
            .one(&self.db)
            .await?
            .ok_or(AccountError::NumberNotFound(account_number))
    }

    /// Updates name, VAT key or active flag of an account.
    ///
    /// The account number and type are fixed once created; entries already
    /// reference them.
    ///
    /// # Errors
    ///
    /// Returns an error if the account is not found or the update fails.
    pub async fn update_account(
        &self,
        id: Uuid,
        input: UpdateAccountInput,
    ) -> Result<chart_of_accounts::Model, AccountError> {
        let account = self.get_account(id).await?;

        let mut active: chart_of_accounts::ActiveModel = account.into();
        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(vat_key) = input.vat_key {
            active.vat_key = Set(vat_key);
        }
        if let Some(is_active) = input.active {
            active.active = Set(is_active);
        }
        active.updated_at = Set(Utc::now().into());

        Ok(active.update(&self.db).await?)
    }

    /// Deletes an account that has no journal entries.
    ///
    /// Accounts referenced by bookings can only be deactivated.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::HasEntries`] when bookings reference the
    /// account, [`AccountError::NotFound`] when it does not exist.
    pub async fn delete_account(&self, id: Uuid) -> Result<(), AccountError> {
        let account = self.get_account(id).await?;

        let entry_count = journal_entries::Entity::find()
            .filter(
                Condition::any()
                    .add(journal_entries::Column::DebitAccountId.eq(account.id))
                    .add(journal_entries::Column::CreditAccountId.eq(account.id)),
            )
            .count(&self.db)
            .await?;
        if entry_count > 0 {
            return Err(AccountError::HasEntries(entry_count));
        }

        chart_of_accounts::Entity::delete_by_id(id)
            .exec(&self.db)
            .await?;

        Ok(())
    }
}
