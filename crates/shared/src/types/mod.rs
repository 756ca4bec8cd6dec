//! Common types used across the application.

pub mod pagination;
pub mod reference;

pub use pagination::{PageRequest, PageResponse};
pub use reference::ReferenceNumber;
