//! Derived views over a set of validated transactions
//!
//! Neither type here can be built or mutated outside the crate: `Statistics`
//! comes only from the aggregator and `Page` only from the paginator, so both
//! always agree with the transactions they were computed from.

use super::transaction::Transaction;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// Summary statistics for one ingestion run
///
/// Invariants (hold by construction):
/// - `total_count` equals the number of valid transactions
/// - the values of `category_totals` sum to `total_amount`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Statistics {
    #[serde(rename = "total_rows")]
    total_count: usize,
    total_amount: Decimal,
    category_totals: BTreeMap<String, Decimal>,
}

impl Statistics {
    pub(crate) fn new(
        total_count: usize,
        total_amount: Decimal,
        category_totals: BTreeMap<String, Decimal>,
    ) -> Self {
        Self {
            total_count,
            total_amount,
            category_totals,
        }
    }

    /// Number of valid transactions
    pub fn total_count(&self) -> usize {
        self.total_count
    }

    /// Sum of all valid amounts
    pub fn total_amount(&self) -> Decimal {
        self.total_amount
    }

    /// Sum of amounts per category, keyed by category name
    pub fn category_totals(&self) -> &BTreeMap<String, Decimal> {
        &self.category_totals
    }
}

impl Default for Statistics {
    fn default() -> Self {
        Self::new(0, Decimal::ZERO, BTreeMap::new())
    }
}

/// A bounded, ordered slice of the sorted transactions
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    items: Vec<Transaction>,
    page_number: usize,
    page_count: usize,
}

impl Page {
    pub(crate) fn new(items: Vec<Transaction>, page_number: usize, page_count: usize) -> Self {
        Self {
            items,
            page_number,
            page_count,
        }
    }

    /// Transactions on this page (at most the page size)
    pub fn items(&self) -> &[Transaction] {
        &self.items
    }

    /// 1-based number of this page
    pub fn page_number(&self) -> usize {
        self.page_number
    }

    /// Total number of non-empty pages
    pub fn page_count(&self) -> usize {
        self.page_count
    }
}
