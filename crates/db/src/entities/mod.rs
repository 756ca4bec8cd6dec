//! `SeaORM` entity definitions.

pub mod booking_templates;
pub mod chart_of_accounts;
pub mod entry_sequences;
pub mod journal_entries;
pub mod sea_orm_active_enums;
