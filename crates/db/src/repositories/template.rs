//! Booking template repository for recurring bookings.

use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use belegwerk_shared::error::AppError;

use crate::entities::booking_templates;

/// Error types for template operations.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// Template not found.
    #[error("Template not found: {0}")]
    NotFound(Uuid),

    /// Template name already taken.
    #[error("Template name '{0}' already exists")]
    DuplicateName(String),

    /// Debit and credit account must differ.
    #[error("Template debit and credit account must differ")]
    SameAccount,

    /// Account number outside the four-digit SKR04 range.
    #[error("Account number {0} is out of range (0-9999)")]
    NumberOutOfRange(i32),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<TemplateError> for AppError {
    fn from(err: TemplateError) -> Self {
        match err {
            TemplateError::NotFound(_) => Self::NotFound(err.to_string()),
            TemplateError::DuplicateName(_) => Self::Conflict(err.to_string()),
            TemplateError::SameAccount | TemplateError::NumberOutOfRange(_) => {
                Self::Validation(err.to_string())
            }
            TemplateError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Input for creating a booking template.
///
/// Templates carry account numbers rather than ids; the numbers are
/// resolved against the chart when the template is booked from.
#[derive(Debug, Clone)]
pub struct CreateTemplateInput {
    pub name: String,
    pub debit_account_number: i32,
    pub credit_account_number: i32,
    pub default_amount: Option<rust_decimal::Decimal>,
    pub default_description: Option<String>,
}

/// Template repository for recurring booking patterns.
#[derive(Debug, Clone)]
pub struct TemplateRepository {
    db: DatabaseConnection,
}

impl TemplateRepository {
    /// Creates a new template repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a booking template.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is taken, a number is out of range, the
    /// accounts coincide, or the insert fails.
    pub async fn create_template(
        &self,
        input: CreateTemplateInput,
    ) -> Result<booking_templates::Model, TemplateError> {
        for number in [input.debit_account_number, input.credit_account_number] {
            if !(0..=9999).contains(&number) {
                return Err(TemplateError::NumberOutOfRange(number));
            }
        }
        if input.debit_account_number == input.credit_account_number {
            return Err(TemplateError::SameAccount);
        }

        let existing = booking_templates::Entity::find()
            .filter(booking_templates::Column::Name.eq(input.name.clone()))
            .one(&self.db)
            .await?;
        if existing.is_some() {
            return Err(TemplateError::DuplicateName(input.name));
        }

        let now = Utc::now().into();
        let template = booking_templates::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            debit_account_number: Set(input.debit_account_number),
            credit_account_number: Set(input.credit_account_number),
            default_amount: Set(input.default_amount),
            default_description: Set(input.default_description),
            use_count: Set(0),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(template.insert(&self.db).await?)
    }

    /// Lists templates, most used first. `search` filters by name substring.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_templates(
        &self,
        search: Option<&str>,
    ) -> Result<Vec<booking_templates::Model>, TemplateError> {
        let mut query = booking_templates::Entity::find();
        if let Some(term) = search {
            query = query.filter(booking_templates::Column::Name.contains(term));
        }

        let templates = query
            .order_by_desc(booking_templates::Column::UseCount)
            .order_by_asc(booking_templates::Column::Name)
            .all(&self.db)
            .await?;

        Ok(templates)
    }

    /// Gets a template by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the template is not found or the query fails.
    pub async fn get_template(&self, id: Uuid) -> Result<booking_templates::Model, TemplateError> {
        booking_templates::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(TemplateError::NotFound(id))
    }

    /// Records one application of a template.
    ///
    /// The `use_count = use_count + 1` increment happens in the database, so
    /// concurrent applications never lose an update.
    ///
    /// # Errors
    ///
    /// Returns an error if the template is not found or the update fails.
    pub async fn record_use(&self, id: Uuid) -> Result<booking_templates::Model, TemplateError> {
        let result = booking_templates::Entity::update_many()
            .col_expr(
                booking_templates::Column::UseCount,
                Expr::col(booking_templates::Column::UseCount).add(1),
            )
            .col_expr(
                booking_templates::Column::UpdatedAt,
                Expr::value(Utc::now()),
            )
            .filter(booking_templates::Column::Id.eq(id))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(TemplateError::NotFound(id));
        }

        self.get_template(id).await
    }

    /// Deletes a template. Journal entries created from it are unaffected.
    ///
    /// # Errors
    ///
    /// Returns an error if the template is not found or the delete fails.
    pub async fn delete_template(&self, id: Uuid) -> Result<(), TemplateError> {
        let result = booking_templates::Entity::delete_by_id(id)
            .exec(&self.db)
            .await?;
        if result.rows_affected == 0 {
            return Err(TemplateError::NotFound(id));
        }
        Ok(())
    }
}
