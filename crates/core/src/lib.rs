//! Core accounting logic for Belegwerk.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and report calculations live here.
//!
//! # Modules
//!
//! - `ledger` - Double-entry booking validation and storno construction
//! - `bwa` - BWA (Betriebswirtschaftliche Auswertung) aggregation
//! - `datev` - DATEV EXTF export generation

pub mod bwa;
pub mod datev;
pub mod ledger;
