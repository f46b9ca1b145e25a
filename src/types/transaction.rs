//! Transaction-related types for the ingestion pipeline
//!
//! This module defines the validated `Transaction`, the `Rejection` recorded
//! for rows that fail validation, and the per-row `RowOutcome` produced by the
//! field normalizer.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Category assigned when a row has no category of its own
pub const DEFAULT_CATEGORY: &str = "Miscellaneous";

/// 0-based index of a data row (the header is not counted)
pub type RowIndex = usize;

/// A validated financial record
///
/// Every field constraint holds for every value produced by the normalizer:
/// the date is a real calendar date, the description and category are
/// non-empty and trimmed, and the amount is a finite decimal with its sign
/// preserved. The fields are public, so hand-built values carry no such
/// guarantee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Data row this transaction was read from
    pub row_index: RowIndex,

    /// Calendar date of the transaction (serialized as `YYYY-MM-DD`)
    pub date: NaiveDate,

    /// Free-text description, trimmed
    pub description: String,

    /// Signed amount, exactly as written in the source
    pub amount: Decimal,

    /// Spending category, or [`DEFAULT_CATEGORY`]
    pub category: String,
}

/// Why a row was rejected
///
/// Serialized as snake_case reason codes (`invalid_date`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    /// The row has more values than the header has columns
    FieldCountMismatch,

    /// The date is missing, unparseable, or not a real calendar date
    InvalidDate,

    /// The amount is missing, non-numeric, or not representable
    InvalidAmount,

    /// The description is missing or blank
    MissingDescription,
}

impl RejectionReason {
    /// The reason code as it appears in serialized output
    pub fn code(&self) -> &'static str {
        match self {
            RejectionReason::FieldCountMismatch => "field_count_mismatch",
            RejectionReason::InvalidDate => "invalid_date",
            RejectionReason::InvalidAmount => "invalid_amount",
            RejectionReason::MissingDescription => "missing_description",
        }
    }
}

impl std::fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// A row that failed validation, kept for reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    /// Data row that was rejected
    pub row_index: RowIndex,

    /// First constraint the row failed
    pub reason: RejectionReason,
}

/// Result of normalizing a single row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    Accepted(Transaction),
    Rejected(Rejection),
}

impl RowOutcome {
    /// Data row this outcome belongs to
    pub fn row_index(&self) -> RowIndex {
        match self {
            RowOutcome::Accepted(transaction) => transaction.row_index,
            RowOutcome::Rejected(rejection) => rejection.row_index,
        }
    }
}
