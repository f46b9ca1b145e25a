//! Field normalizer
//!
//! Maps one [`RawRow`] to exactly one [`RowOutcome`]: a validated
//! [`Transaction`] or a [`Rejection`] carrying the first failed constraint.
//!
//! Checks run in a fixed order and the first failure wins:
//!
//! 1. surplus values past the header → `field_count_mismatch`
//! 2. date → `invalid_date`
//! 3. amount → `invalid_amount`
//! 4. description → `missing_description`
//!
//! A blank or absent category is never a rejection; the configured
//! [`Categorizer`] supplies one instead.
//!
//! # Date Grammar
//!
//! Accepted formats, tried in order: `YYYY-MM-DD`, `YYYY/MM/DD`, `MM/DD/YYYY`,
//! and `YYYY-MM-DD HH:MM:SS` / `YYYY-MM-DDTHH:MM:SS` with the time discarded.
//!
//! # Amount Grammar
//!
//! `[$][+|-][$]digits[.digits]` with surrounding whitespace allowed, at most
//! one `$`, and optional comma thousands separators in groups of three
//! (`1,200.00`). Exponents, `NaN`, `inf` and anything else are rejected.

use crate::core::categorizer::{DefaultCategorizer, KeywordCategorizer};
use crate::core::traits::Categorizer;
use crate::io::row_parser::{
    RawRow, AMOUNT_COLUMN, CATEGORY_COLUMN, DATE_COLUMN, DESCRIPTION_COLUMN,
};
use crate::types::{Rejection, RejectionReason, RowOutcome, Transaction};
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use std::str::FromStr;

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Parse a date using the accepted grammar
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
                .map(|datetime| datetime.date())
        })
}

/// Parse an amount using the accepted grammar
///
/// Returns `None` for anything outside the grammar, outside `Decimal` range, or
/// with more digits than `Decimal` can hold without rounding.
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let mut rest = raw.trim();

    let leading_currency = rest.starts_with('$');
    if leading_currency {
        rest = &rest[1..];
    }

    let negative = rest.starts_with('-');
    if negative || rest.starts_with('+') {
        rest = &rest[1..];
    }

    if !leading_currency {
        rest = rest.strip_prefix('$').unwrap_or(rest);
    }

    let (integer, fraction) = match rest.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (rest, None),
    };

    let digits = integer_digits(integer)?;

    if let Some(fraction) = fraction {
        if fraction.is_empty() || !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
    }

    if digits.is_empty() && fraction.is_none() {
        return None;
    }

    let mut normalized = String::with_capacity(rest.len() + 2);
    if negative {
        normalized.push('-');
    }
    normalized.push_str(if digits.is_empty() { "0" } else { &digits });
    if let Some(fraction) = fraction {
        normalized.push('.');
        normalized.push_str(fraction);
    }

    let amount = Decimal::from_str(&normalized).ok()?;
    let written_scale = fraction.map_or(0, str::len);
    (amount.scale() as usize == written_scale).then_some(amount)
}

/// Strip thousands separators from the integer part, validating their placement
fn integer_digits(integer: &str) -> Option<String> {
    if !integer.contains(',') {
        return integer
            .bytes()
            .all(|b| b.is_ascii_digit())
            .then(|| integer.to_string());
    }

    let mut groups = integer.split(',');
    let first = groups.next()?;
    if first.is_empty() || first.len() > 3 || !first.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let mut digits = first.to_string();
    for group in groups {
        if group.len() != 3 || !group.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.push_str(group);
    }

    Some(digits)
}

/// Validates raw rows into transactions
///
/// Stateless apart from its category policy, so one normalizer can be shared
/// across threads and reused across runs.
pub struct FieldNormalizer {
    categorizer: Box<dyn Categorizer>,
}

impl FieldNormalizer {
    /// Create a normalizer with a custom category policy
    pub fn new(categorizer: Box<dyn Categorizer>) -> Self {
        Self { categorizer }
    }

    /// Create a normalizer that infers blank categories from keywords
    pub fn with_keyword_categories() -> Self {
        Self::new(Box::new(KeywordCategorizer::default()))
    }

    /// Normalize one row
    ///
    /// # Returns
    ///
    /// * `RowOutcome::Accepted` with a fully validated `Transaction`
    /// * `RowOutcome::Rejected` with the row index and the first failed check
    pub fn normalize(&self, row: &RawRow) -> RowOutcome {
        match self.validate(row) {
            Ok(transaction) => RowOutcome::Accepted(transaction),
            Err(reason) => {
                log::debug!(
                    "Rejected row {}{}: {}",
                    row.index,
                    row.line
                        .map(|l| format!(" (line {})", l))
                        .unwrap_or_default(),
                    reason
                );
                RowOutcome::Rejected(Rejection {
                    row_index: row.index,
                    reason,
                })
            }
        }
    }

    fn validate(&self, row: &RawRow) -> Result<Transaction, RejectionReason> {
        if row.has_extra_fields() {
            return Err(RejectionReason::FieldCountMismatch);
        }

        let date = row
            .get(DATE_COLUMN)
            .and_then(parse_date)
            .ok_or(RejectionReason::InvalidDate)?;

        let amount = row
            .get(AMOUNT_COLUMN)
            .and_then(parse_amount)
            .ok_or(RejectionReason::InvalidAmount)?;

        let description = row
            .get(DESCRIPTION_COLUMN)
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .ok_or(RejectionReason::MissingDescription)?;

        let category = match row.get(CATEGORY_COLUMN).map(str::trim) {
            Some(category) if !category.is_empty() => category.to_string(),
            _ => self.categorizer.fallback_category(description),
        };

        Ok(Transaction {
            row_index: row.index,
            date,
            description: description.to_string(),
            amount,
            category,
        })
    }
}

impl Default for FieldNormalizer {
    fn default() -> Self {
        Self::new(Box::new(DefaultCategorizer))
    }
}

impl std::fmt::Debug for FieldNormalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldNormalizer").finish_non_exhaustive()
    }
}
