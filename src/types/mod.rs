//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `transaction`: validated transactions, rejections and per-row outcomes
//! - `statistics`: derived views (summary statistics, pages)
//! - `error`: run-level error type for the ingestion pipeline

pub mod error;
pub mod statistics;
pub mod transaction;

pub use error::IngestError;
pub use statistics::{Page, Statistics};
pub use transaction::{
    Rejection, RejectionReason, RowIndex, RowOutcome, Transaction, DEFAULT_CATEGORY,
};
