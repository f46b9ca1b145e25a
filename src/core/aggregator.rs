//! Aggregator
//!
//! Folds validated transactions into [`Statistics`] in a single pass. The
//! count, the grand total and every category bucket are updated from the same
//! transaction in the same step, so `Σ category_totals == total_amount` and
//! `total_count == number of transactions` hold without any recomputation.
//!
//! Amounts are summed as exact decimals in input order. A sum that overflows,
//! or that `Decimal` could only hold by rounding away digits, is reported as
//! an error instead.

use crate::types::{IngestError, Statistics, Transaction};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Running totals for one ingestion run
#[derive(Debug, Default)]
pub struct Aggregator {
    total_count: usize,
    total_amount: Decimal,
    category_totals: BTreeMap<String, Decimal>,
}

impl Aggregator {
    /// Create an aggregator with zeroed totals
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one transaction to the running totals
    ///
    /// # Errors
    ///
    /// Returns `IngestError::ArithmeticOverflow` if either the grand total or
    /// the category bucket would overflow or lose precision. The totals are
    /// left unchanged.
    pub fn add(&mut self, transaction: &Transaction) -> Result<(), IngestError> {
        let new_total = exact_add(self.total_amount, transaction.amount)
            .ok_or_else(|| IngestError::arithmetic_overflow("total_amount"))?;

        let bucket = self
            .category_totals
            .get(&transaction.category)
            .copied()
            .unwrap_or(Decimal::ZERO);
        let new_bucket = exact_add(bucket, transaction.amount)
            .ok_or_else(|| IngestError::arithmetic_overflow("category_totals"))?;

        self.total_count += 1;
        self.total_amount = new_total;
        self.category_totals
            .insert(transaction.category.clone(), new_bucket);

        Ok(())
    }

    /// Freeze the running totals into `Statistics`
    pub fn finish(self) -> Statistics {
        Statistics::new(self.total_count, self.total_amount, self.category_totals)
    }
}

/// Add two decimals, refusing results that were rounded
///
/// `checked_add` only fails when the integer part overflows; when the exact
/// sum needs more than 96 bits of mantissa it drops scale and rounds. An exact
/// sum keeps the larger scale of its operands, and a lower scale is accepted
/// only if both operands can be recovered from it.
fn exact_add(a: Decimal, b: Decimal) -> Option<Decimal> {
    let sum = a.checked_add(b)?;

    if sum.scale() >= a.scale().max(b.scale()) {
        return Some(sum);
    }

    let recovers_a = sum.checked_sub(b) == Some(a);
    let recovers_b = sum.checked_sub(a) == Some(b);
    (recovers_a && recovers_b).then_some(sum)
}

/// Aggregate a sequence of transactions in order
pub fn aggregate<'a, I>(transactions: I) -> Result<Statistics, IngestError>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut aggregator = Aggregator::new();
    for transaction in transactions {
        aggregator.add(transaction)?;
    }
    Ok(aggregator.finish())
}
