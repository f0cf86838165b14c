//! gastos - expense and income reporting
//!
//! This library provides the reporting core of a personal-finance tracker:
//! it loads one user's expense records ("gastos") and lookup tables,
//! resolves the records' foreign ids to descriptions, filters them and
//! aggregates them into summary, monthly and per-category reports.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (records, lookups, money, ids)
//! - `session`: The logged-in user
//! - `storage`: Record store and data sources
//! - `services`: Enrichment, filtering and the report service
//! - `reports`: Summary, monthly and category aggregation
//! - `display`: Amount/date formatting, tables and chart series
//! - `export`: CSV, JSON and YAML export
//! - `cli`: Command handlers for the `gastos` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use gastos::services::ReportService;
//! use gastos::session::Session;
//! use gastos::storage::{JsonDirSource, RecordStore};
//!
//! let mut store = RecordStore::new();
//! let snapshot = store.load(&JsonDirSource::new("dump"), &Session::establish(1.into()))?;
//! let totals = ReportService::new(snapshot).summary();
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod session;
pub mod storage;

pub use error::GastosError;
