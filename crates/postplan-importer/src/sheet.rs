//! Tabular sheet exports.
//!
//! A sheet is a delimited text export of a workbook tab: optional title lines,
//! one header row, then data records. Cells are addressed through
//! [`ColumnSpec`] so a layout can name columns or pin them by position.

use crate::config::{ColumnSpec, SheetConfig};
use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// A parsed sheet: header names and the data records below them.
#[derive(Debug, Clone)]
pub struct Table {
    headers: Vec<String>,
    index: HashMap<String, usize>,
    records: Vec<(u64, csv::StringRecord)>,
}

impl Table {
    /// Parse sheet content with the given layout.
    pub fn parse(content: &str, config: &SheetConfig) -> Result<Self> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let delimiter = u8::try_from(config.delimiter)
            .with_context(|| format!("delimiter {:?} is not a single byte", config.delimiter))?;

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(delimiter)
            .from_reader(content.as_bytes());

        let mut rows = reader.records().skip(config.header_row);
        let header = match rows.next() {
            Some(record) => record.context("failed to read header row")?,
            None => bail!(
                "sheet has no header row (expected after {} line(s))",
                config.header_row
            ),
        };

        let headers: Vec<String> = header.iter().map(|h| h.trim().to_string()).collect();
        let mut index = HashMap::new();
        for (i, name) in headers.iter().enumerate() {
            index.entry(name.clone()).or_insert(i);
        }

        let mut records = Vec::new();
        for row in rows {
            let record = row.context("failed to read sheet record")?;
            let line = record.position().map_or(0, csv::Position::line);
            records.push((line, record));
        }

        Ok(Self {
            headers,
            index,
            records,
        })
    }

    /// Read and parse a sheet file.
    pub fn from_file(path: &Path, config: &SheetConfig) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to open file: {}", path.display()))?;
        Self::parse(&content, config).with_context(|| format!("in {}", path.display()))
    }

    /// Header names, trimmed.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Data records with their source line numbers.
    pub fn records(&self) -> impl Iterator<Item = (u64, &csv::StringRecord)> {
        self.records.iter().map(|(line, record)| (*line, record))
    }

    /// Number of data records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the sheet has no data records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Resolve a column to its position.
    ///
    /// Names match exactly first, then case-insensitively.
    pub fn column(&self, spec: &ColumnSpec) -> Result<usize> {
        match spec {
            ColumnSpec::Index(i) => Ok(*i),
            ColumnSpec::Name(name) => {
                let name = name.trim();
                if let Some(&i) = self.index.get(name) {
                    return Ok(i);
                }
                let lower = name.to_lowercase();
                self.headers
                    .iter()
                    .position(|h| h.to_lowercase() == lower)
                    .with_context(|| format!("Column '{name}' not found in header"))
            }
        }
    }
}

/// A cell of a record, trimmed. Short records read as blank.
pub fn cell(record: &csv::StringRecord, index: usize) -> &str {
    record.get(index).map_or("", str::trim)
}

/// Whether every cell of a record is blank.
pub fn is_blank_record(record: &csv::StringRecord) -> bool {
    record.iter().all(|c| c.trim().is_empty())
}

/// Parse a money string, handling currency symbols, parentheses for negatives, etc.
///
/// `decimal_separator` is `'.'` or `','`; the other one is read as the
/// thousands separator and must group exactly three digits. A cell such as
/// `"500,00"` read with a `'.'` separator is rejected rather than read as
/// `50000`.
pub fn parse_money_string(s: &str, decimal_separator: char) -> Option<Decimal> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    let (is_negative, s) = if s.starts_with('(') && s.ends_with(')') {
        (true, &s[1..s.len() - 1])
    } else {
        (false, s)
    };

    let grouping = if decimal_separator == ',' { '.' } else { ',' };

    // Remove currency symbols
    let cleaned: String = s
        .chars()
        .filter(|c| {
            c.is_ascii_digit()
                || *c == decimal_separator
                || *c == grouping
                || *c == '-'
                || *c == '+'
        })
        .collect();
    let cleaned = cleaned.trim_matches(grouping);

    let (whole, fraction) = match cleaned.split_once(decimal_separator) {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (cleaned, None),
    };
    if fraction.is_some_and(|f| f.contains([decimal_separator, grouping])) {
        return None;
    }

    let mut groups = whole.split(grouping);
    let lead = groups.next()?;
    let mut digits = lead.to_string();
    for group in groups {
        if group.len() != 3 || !group.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        digits.push_str(group);
    }
    if let Some(fraction) = fraction {
        digits.push('.');
        digits.push_str(fraction);
    }

    if digits.is_empty() {
        return None;
    }

    let value = Decimal::from_str(&digits).ok()?;

    if is_negative {
        Some(-value)
    } else {
        Some(value)
    }
}

/// Normalize an identifier cell.
///
/// Spreadsheet exports write integral codes as floats (`"12345.0"`); the
/// fractional zeros are dropped so the code reads as it does on screen.
pub fn normalize_code(s: &str) -> String {
    let s = s.trim();
    if let Some((whole, frac)) = s.split_once('.') {
        if !whole.is_empty()
            && whole.chars().all(|c| c.is_ascii_digit())
            && !frac.is_empty()
            && frac.chars().all(|c| c == '0')
        {
            return whole.to_string();
        }
    }
    s.to_string()
}

/// Parse a date cell with the first matching format.
///
/// Only the first whitespace-separated token is read, so a trailing time
/// (`"16/10/2026 00:00:00"`) is ignored. Blank cells give `None`.
pub fn parse_date(s: &str, formats: &[String]) -> Result<Option<NaiveDate>> {
    let Some(token) = s.split_whitespace().next() else {
        return Ok(None);
    };
    for format in formats {
        if let Ok(date) = NaiveDate::parse_from_str(token, format) {
            return Ok(Some(date));
        }
    }
    bail!(
        "failed to parse date '{token}' with formats {}",
        formats.join(", ")
    )
}
