//! Transaction Ingest Library
//! # Overview
//!
//! This library validates uploaded transaction CSV files and summarizes them,
//! with both a sync and an async strategy for handling multiple files.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Transaction, Rejection, Statistics, etc.)
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Business logic components:
//!   - [`core::normalizer`] - Row validation into transactions or rejections
//!   - [`core::aggregator`] - Totals per category with checked decimal arithmetic
//!   - [`core::paginator`] - Date-descending order and page slicing
//!   - [`core::pipeline`] - Orchestration of a single ingestion run
//! - [`io`] - Row parsing, file loading and report output
//! - [`strategy`] - Scheduling of independent runs across input files
//!
//! # Row Outcomes
//!
//! Every data row ends in exactly one of two places:
//!
//! - **Accepted**: a [`Transaction`] with a parsed date, an exact decimal amount
//!   and a category (`Miscellaneous` when the row has none)
//! - **Rejected**: a [`Rejection`] naming the row index and the first failed check
//!
//! Rejections never abort a run. Only run-level problems (unreadable input,
//! missing required columns, no data rows) produce an [`IngestError`].
//!
//! # Example
//!
//! ```
//! use transaction_ingest::{ingest, IngestConfig};
//!
//! let csv = b"date,description,amount\n2024-03-01,Lunch,12.00\n";
//! let report = ingest(csv, &IngestConfig::default()).unwrap();
//!
//! assert_eq!(report.stats().total_count(), 1);
//! assert_eq!(report.transactions()[0].category, "Miscellaneous");
//! ```

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod strategy;
pub mod types;

pub use core::{ingest, IngestConfig, IngestReport, PageRequest};
pub use io::{write_outcome_json, write_transactions_csv, OutcomeWriter};
pub use types::{
    IngestError, Page, Rejection, RejectionReason, RowIndex, RowOutcome, Statistics, Transaction,
};
