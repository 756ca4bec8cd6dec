//! Shared types, errors, and configuration for Belegwerk.
//!
//! This crate provides common types used across all other crates:
//! - Beleg reference numbers (`BEL-YYYY-NNNNNN`)
//! - Pagination types for list endpoints
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use types::{PageRequest, PageResponse, ReferenceNumber};
