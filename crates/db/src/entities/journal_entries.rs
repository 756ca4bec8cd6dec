//! `SeaORM` Entity for the journal_entries table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::SourceType;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "journal_entries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Gapless reference number, `BEL-YYYY-NNNNNN`.
    #[sea_orm(unique)]
    pub entry_number: String,
    pub booking_date: Date,
    pub debit_account_id: Uuid,
    pub credit_account_id: Uuid,
    pub amount: Decimal,
    pub description: String,
    pub source_type: SourceType,
    /// Set on storno entries, points at the reversed entry.
    pub reversal_of_entry_id: Option<Uuid>,
    pub locked: bool,
    pub locked_at: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::chart_of_accounts::Entity",
        from = "Column::DebitAccountId",
        to = "super::chart_of_accounts::Column::Id"
    )]
    DebitAccount,
    #[sea_orm(
        belongs_to = "super::chart_of_accounts::Entity",
        from = "Column::CreditAccountId",
        to = "super::chart_of_accounts::Column::Id"
    )]
    CreditAccount,
    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::ReversalOfEntryId",
        to = "Column::Id"
    )]
    ReversedEntry,
}

impl ActiveModelBehavior for ActiveModel {}
