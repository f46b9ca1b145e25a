//! I/O module
//!
//! Handles input parsing and report output.
//!
//! # Components
//!
//! - `row_parser` - Delimited text to header-keyed rows (with header canonicalization)
//! - `input` - Loading uploaded files into memory (blocking and tokio variants)
//! - `report_format` - Report serialization (JSON lines, normalized CSV)

pub mod input;
pub mod report_format;
pub mod row_parser;

pub use input::{read_input, read_input_async};
pub use report_format::{write_outcome_json, write_transactions_csv, OutcomeWriter};
pub use row_parser::{canonical_column, RawRow, RawRows, RowParser};
