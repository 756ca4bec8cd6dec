//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod account;
pub mod journal;
pub mod lock;
pub mod report;
pub mod sequence;
pub mod template;

pub use account::{
    AccountError, AccountFilter, AccountRepository, CreateAccountInput, UpdateAccountInput,
};
pub use journal::{EntryFilter, JournalError, JournalRepository, UpdateEntryInput};
pub use lock::{LockError, LockRepository};
pub use report::{EntryWithAccounts, ReportError, ReportRepository};
pub use sequence::{SequenceError, next_entry_number};
pub use template::{CreateTemplateInput, TemplateError, TemplateRepository};
