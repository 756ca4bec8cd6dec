//! `SeaORM` Entity for the booking_templates table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "booking_templates")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub name: String,
    /// SKR04 number of the debit side. Templates reference numbers, not
    /// account ids, so they survive an account being replaced under the
    /// same number.
    pub debit_account_number: i32,
    /// SKR04 number of the credit side.
    pub credit_account_number: i32,
    pub default_amount: Option<Decimal>,
    pub default_description: Option<String>,
    /// Number of times the template was applied; sorted on for suggestions.
    pub use_count: i64,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
