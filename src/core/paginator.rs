//! Sorter and paginator
//!
//! Transactions are shown most recent first. The sort is stable, so rows that
//! share a date keep their original relative order. Pages are cut on demand
//! from the sorted slice and never stored on their own.

use crate::types::{IngestError, Page, Transaction};

/// Page size used when none (or zero) is configured
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Sort transactions by date, most recent first, keeping ties in input order
pub fn sort_by_date_desc(transactions: &mut [Transaction]) {
    // slice::sort_by is stable
    transactions.sort_by(|a, b| b.date.cmp(&a.date));
}

/// Fixed-size page view over sorted transactions
#[derive(Debug, Clone, Copy)]
pub struct Paginator<'a> {
    transactions: &'a [Transaction],
    page_size: usize,
}

impl<'a> Paginator<'a> {
    /// Create a paginator over already sorted transactions
    ///
    /// A zero page size falls back to [`DEFAULT_PAGE_SIZE`].
    pub fn new(transactions: &'a [Transaction], page_size: usize) -> Self {
        let page_size = if page_size == 0 {
            log::warn!(
                "Invalid page_size ({}), using default ({})",
                page_size,
                DEFAULT_PAGE_SIZE
            );
            DEFAULT_PAGE_SIZE
        } else {
            page_size
        };

        Self {
            transactions,
            page_size,
        }
    }

    /// Effective page size
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of pages, `0` when there are no transactions
    pub fn page_count(&self) -> usize {
        self.transactions.len().div_ceil(self.page_size)
    }

    /// Get a 1-based page
    ///
    /// Pages past the last one are empty rather than an error.
    ///
    /// # Errors
    ///
    /// Returns `IngestError::InvalidPage` if `page_number` is 0.
    pub fn page(&self, page_number: usize) -> Result<Page, IngestError> {
        if page_number < 1 {
            return Err(IngestError::InvalidPage { page: page_number });
        }

        let start = (page_number - 1).saturating_mul(self.page_size);
        let items = self
            .transactions
            .iter()
            .skip(start)
            .take(self.page_size)
            .cloned()
            .collect();

        Ok(Page::new(items, page_number, self.page_count()))
    }
}
