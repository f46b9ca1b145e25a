//! Row parser: raw delimited text to header-keyed rows
//!
//! Turns uploaded bytes into a lazy sequence of [`RawRow`]s. The first record
//! is the header; every following record is mapped positionally onto it.
//!
//! # Header Canonicalization
//!
//! Header names are resolved once, here, to a canonical lowercase key set so
//! that no consumer has to deal with `Date` vs `date`:
//!
//! | Source header                   | Canonical key  |
//! |---------------------------------|----------------|
//! | `Date`, `Transaction Date`      | `date`         |
//! | `Description`, `Name`, `Merchant` | `description` |
//! | `Amount`, `Price`, `Transaction Amount` | `amount` |
//! | `Category`                      | `category`     |
//!
//! Any other header is trimmed and lowercased and passed through unchanged.
//!
//! # Field Count Mismatches
//!
//! Rows shorter or longer than the header are not dropped. Header columns
//! without a value are listed in [`RawRow::missing`], surplus values in
//! [`RawRow::extra`], and the field normalizer decides what to do with them.
//!
//! # Restartability
//!
//! [`RowParser::rows`] builds a fresh iterator over the same input every time
//! it is called, so a caller can walk the rows more than once.

use crate::types::{IngestError, RowIndex};
use csv::{ReaderBuilder, StringRecord, StringRecordsIntoIter, Trim};

/// Canonical column holding the transaction date
pub const DATE_COLUMN: &str = "date";
/// Canonical column holding the description
pub const DESCRIPTION_COLUMN: &str = "description";
/// Canonical column holding the amount
pub const AMOUNT_COLUMN: &str = "amount";
/// Canonical column holding the (optional) category
pub const CATEGORY_COLUMN: &str = "category";

/// Columns that must be present in the header after canonicalization
pub const REQUIRED_COLUMNS: [&str; 3] = [DATE_COLUMN, DESCRIPTION_COLUMN, AMOUNT_COLUMN];

const UTF8_BOM: &str = "\u{feff}";

/// Map a raw header name onto its canonical key
pub fn canonical_column(name: &str) -> String {
    let lowered = name.trim().to_lowercase();
    let canonical = match lowered.as_str() {
        "transaction date" => DATE_COLUMN,
        "name" | "merchant" => DESCRIPTION_COLUMN,
        "price" | "transaction amount" => AMOUNT_COLUMN,
        other => other,
    };
    canonical.to_string()
}

/// One data row, keyed by canonical header names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    /// 0-based position among the data rows
    pub index: RowIndex,

    /// 1-based line in the input where the row starts (if known)
    pub line: Option<u64>,

    /// Header name / raw value pairs, in header order
    pub fields: Vec<(String, String)>,

    /// Header columns for which the row had no value
    pub missing: Vec<String>,

    /// Values past the last header column
    pub extra: Vec<String>,
}

impl RawRow {
    /// Raw value of a column, if the row has one
    ///
    /// When several headers canonicalize to the same key, the first one wins.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    /// Whether the row had more values than the header
    pub fn has_extra_fields(&self) -> bool {
        !self.extra.is_empty()
    }

    fn from_record(index: RowIndex, headers: &[String], record: &StringRecord) -> Self {
        let line = record.position().map(|pos| pos.line());

        let fields = headers
            .iter()
            .zip(record.iter())
            .map(|(name, value)| (name.clone(), value.to_string()))
            .collect();

        let missing = headers.iter().skip(record.len()).cloned().collect();
        let extra = record
            .iter()
            .skip(headers.len())
            .map(str::to_string)
            .collect();

        Self {
            index,
            line,
            fields,
            missing,
            extra,
        }
    }
}

/// Parser over one uploaded file
///
/// # Examples
///
/// ```
/// use transaction_ingest::io::RowParser;
///
/// let input = b"Date,Description,Amount\n2024-01-05,Coffee,4.50\n";
/// let parser = RowParser::new(input, b',').unwrap();
/// assert_eq!(parser.headers(), ["date", "description", "amount"]);
///
/// let rows: Vec<_> = parser.rows().collect::<Result<_, _>>().unwrap();
/// assert_eq!(rows[0].get("amount"), Some("4.50"));
/// ```
#[derive(Debug, Clone)]
pub struct RowParser<'a> {
    text: &'a str,
    delimiter: u8,
    headers: Vec<String>,
}

impl<'a> RowParser<'a> {
    /// Create a parser over raw input bytes
    ///
    /// Reads and canonicalizes the header row.
    ///
    /// # Errors
    ///
    /// Returns `IngestError::MalformedInput` if:
    /// - the input is not valid UTF-8 (`not_utf8`)
    /// - there is no header row, or every header cell is blank (`no_header`)
    /// - the header row cannot be read as delimited text (`unparseable`)
    pub fn new(input: &'a [u8], delimiter: u8) -> Result<Self, IngestError> {
        let text = std::str::from_utf8(input).map_err(|_| IngestError::malformed("not_utf8"))?;
        let text = text.strip_prefix(UTF8_BOM).unwrap_or(text);

        let mut reader = Self::reader_builder(delimiter).from_reader(text.as_bytes());
        let header_record = reader.headers()?;

        if header_record.iter().all(|name| name.trim().is_empty()) {
            return Err(IngestError::malformed("no_header"));
        }

        let headers = header_record.iter().map(canonical_column).collect();

        Ok(Self {
            text,
            delimiter,
            headers,
        })
    }

    /// Canonical header names, in file order
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Required columns absent from the header
    pub fn missing_required_columns(&self) -> Vec<&'static str> {
        REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|required| !self.headers.iter().any(|name| name == required))
            .collect()
    }

    /// Iterate over the data rows from the start of the input
    pub fn rows(&self) -> RawRows<'_> {
        let reader = Self::reader_builder(self.delimiter).from_reader(self.text.as_bytes());

        RawRows {
            headers: &self.headers,
            records: reader.into_records(),
            next_index: 0,
        }
    }

    /// The CSV reader is configured to:
    /// - Trim whitespace from all fields
    /// - Allow rows whose length differs from the header
    /// - Skip blank lines (csv default)
    fn reader_builder(delimiter: u8) -> ReaderBuilder {
        let mut builder = ReaderBuilder::new();
        builder
            .delimiter(delimiter)
            .trim(Trim::All)
            .flexible(true)
            .has_headers(true);
        builder
    }
}

/// Lazy iterator over the data rows of a [`RowParser`]
pub struct RawRows<'p> {
    headers: &'p [String],
    records: StringRecordsIntoIter<&'p [u8]>,
    next_index: RowIndex,
}

impl Iterator for RawRows<'_> {
    type Item = Result<RawRow, IngestError>;

    /// Get the next data row
    ///
    /// # Returns
    ///
    /// * `Some(Ok(RawRow))` - The next row, mapped onto the header
    /// * `Some(Err(IngestError))` - The text could not be read as delimited text
    /// * `None` - End of input reached
    fn next(&mut self) -> Option<Self::Item> {
        let record = match self.records.next()? {
            Ok(record) => record,
            Err(e) => return Some(Err(e.into())),
        };

        let row = RawRow::from_record(self.next_index, self.headers, &record);
        self.next_index += 1;
        Some(Ok(row))
    }
}
