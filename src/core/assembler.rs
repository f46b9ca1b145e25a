//! Result assembler
//!
//! Combines the outputs of one run into an immutable [`IngestReport`]:
//! the sorted transactions, the rejections in row order, the statistics
//! computed from the very same transactions, and an optional page.
//!
//! A report with zero transactions is still a successful report. Run-level
//! failures never reach this module; they are returned as `IngestError`
//! before assembly.

use crate::core::aggregator::aggregate;
use crate::core::paginator::{sort_by_date_desc, Paginator};
use crate::types::{IngestError, Page, Rejection, RejectionReason, Statistics, Transaction};
use serde::Serialize;
use std::collections::BTreeMap;

/// Requested page view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number
    pub page_number: usize,
    /// Transactions per page
    pub page_size: usize,
}

/// Output envelope of one ingestion run
///
/// Serializes as:
///
/// ```text
/// {
///   "transactions": [{ "row_index", "date", "description", "amount", "category" }, ...],
///   "rejections":   [{ "row_index", "reason" }, ...],
///   "stats":        { "total_rows", "total_amount", "category_totals" },
///   "page":         { "items", "page_number", "page_count" }   // only if requested
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    transactions: Vec<Transaction>,
    rejections: Vec<Rejection>,
    stats: Statistics,
    #[serde(skip_serializing_if = "Option::is_none")]
    page: Option<Page>,
}

impl IngestReport {
    /// All valid transactions, most recent first
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Rejected rows, in row order
    pub fn rejections(&self) -> &[Rejection] {
        &self.rejections
    }

    /// Statistics over [`Self::transactions`]
    pub fn stats(&self) -> &Statistics {
        &self.stats
    }

    /// The requested page, if one was requested
    pub fn page(&self) -> Option<&Page> {
        self.page.as_ref()
    }

    /// Cut any page from this report's transactions
    pub fn paginate(&self, page_number: usize, page_size: usize) -> Result<Page, IngestError> {
        Paginator::new(&self.transactions, page_size).page(page_number)
    }

    /// Number of rejected rows per reason
    pub fn rejection_summary(&self) -> BTreeMap<RejectionReason, usize> {
        let mut summary = BTreeMap::new();
        for rejection in &self.rejections {
            *summary.entry(rejection.reason).or_insert(0) += 1;
        }
        summary
    }
}

/// Builds an [`IngestReport`] from normalized rows
pub struct ResultAssembler;

impl ResultAssembler {
    /// Assemble a report
    ///
    /// `transactions` and `rejections` must be in row order. Statistics are
    /// computed over the transactions in that order, then the transactions are
    /// sorted for display and the requested page (if any) is cut.
    ///
    /// # Errors
    ///
    /// Returns an error if the totals overflow or the page number is 0.
    pub fn assemble(
        mut transactions: Vec<Transaction>,
        rejections: Vec<Rejection>,
        page_request: Option<PageRequest>,
    ) -> Result<IngestReport, IngestError> {
        let stats = aggregate(&transactions)?;

        sort_by_date_desc(&mut transactions);

        let page = page_request
            .map(|request| {
                Paginator::new(&transactions, request.page_size).page(request.page_number)
            })
            .transpose()?;

        Ok(IngestReport {
            transactions,
            rejections,
            stats,
            page,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn transaction(row_index: usize, day: u32, amount: Decimal, category: &str) -> Transaction {
        Transaction {
            row_index,
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            description: format!("row {}", row_index),
            amount,
            category: category.to_string(),
        }
    }

    fn rejection(row_index: usize, reason: RejectionReason) -> Rejection {
        Rejection { row_index, reason }
    }

    #[test]
    fn test_assemble_sorts_and_aggregates() {
        let report = ResultAssembler::assemble(
            vec![
                transaction(0, 1, dec!(1200.00), "Housing"),
                transaction(2, 5, dec!(4.50), "Food"),
            ],
            vec![rejection(1, RejectionReason::InvalidAmount)],
            None,
        )
        .unwrap();

        let rows: Vec<usize> = report.transactions().iter().map(|t| t.row_index).collect();
        assert_eq!(rows, vec![2, 0]);
        assert_eq!(report.stats().total_count(), 2);
        assert_eq!(report.stats().total_amount(), dec!(1204.50));
        assert_eq!(report.rejections().len(), 1);
        assert!(report.page().is_none());
    }

    #[test]
    fn test_all_rows_rejected_is_still_a_report() {
        let report = ResultAssembler::assemble(
            Vec::new(),
            vec![
                rejection(0, RejectionReason::InvalidDate),
                rejection(1, RejectionReason::InvalidDate),
                rejection(2, RejectionReason::MissingDescription),
            ],
            Some(PageRequest {
                page_number: 1,
                page_size: 10,
            }),
        )
        .unwrap();

        assert!(report.transactions().is_empty());
        assert_eq!(report.stats(), &Statistics::default());
        assert_eq!(report.page().unwrap().page_count(), 0);

        let summary = report.rejection_summary();
        assert_eq!(summary[&RejectionReason::InvalidDate], 2);
        assert_eq!(summary[&RejectionReason::MissingDescription], 1);
        assert!(!summary.contains_key(&RejectionReason::InvalidAmount));
    }

    #[test]
    fn test_assemble_with_page_request() {
        let transactions = (0..25)
            .map(|i| transaction(i, 1 + (i as u32 % 28), Decimal::ONE, "X"))
            .collect();

        let report = ResultAssembler::assemble(
            transactions,
            Vec::new(),
            Some(PageRequest {
                page_number: 3,
                page_size: 10,
            }),
        )
        .unwrap();

        let page = report.page().unwrap();
        assert_eq!(page.page_number(), 3);
        assert_eq!(page.page_count(), 3);
        assert_eq!(page.items().len(), 5);
        assert_eq!(page.items(), &report.transactions()[20..]);
        assert_eq!(report.paginate(3, 10).unwrap(), *page);
    }

    #[test]
    fn test_assemble_rejects_page_zero() {
        let result = ResultAssembler::assemble(
            vec![transaction(0, 1, Decimal::ONE, "X")],
            Vec::new(),
            Some(PageRequest {
                page_number: 0,
                page_size: 10,
            }),
        );
        assert_eq!(result, Err(IngestError::InvalidPage { page: 0 }));
    }

    #[test]
    fn test_report_omits_page_when_not_requested() {
        let report = ResultAssembler::assemble(
            vec![transaction(0, 5, dec!(4.50), "Food")],
            Vec::new(),
            None,
        )
        .unwrap();

        let json = serde_json::to_string(&report).unwrap();
        assert_eq!(
            json,
            concat!(
                r#"{"transactions":[{"row_index":0,"date":"2024-01-05","description":"row 0","amount":"4.50","category":"Food"}],"#,
                r#""rejections":[],"#,
                r#""stats":{"total_rows":1,"total_amount":"4.50","category_totals":{"Food":"4.50"}}}"#
            )
        );
    }
}
