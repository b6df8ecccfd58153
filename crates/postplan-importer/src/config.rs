//! Configuration for sheet readers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Layout of a sheet export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetConfig {
    /// The field delimiter.
    pub delimiter: char,
    /// Number of records above the header row. Empty lines are not counted.
    pub header_row: usize,
    /// Decimal separator of amount cells (`'.'` or `','`).
    pub decimal_separator: char,
    /// Accepted date formats (strftime-style), tried in order.
    pub date_formats: Vec<String>,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            header_row: 0,
            decimal_separator: '.',
            date_formats: vec![
                "%d/%m/%Y".to_string(),
                "%d.%m.%Y".to_string(),
                "%Y-%m-%d".to_string(),
            ],
        }
    }
}

impl SheetConfig {
    /// Start building a sheet configuration.
    pub fn builder() -> SheetConfigBuilder {
        SheetConfigBuilder::new()
    }

    /// Layout of the bank sheet: four title lines above the header.
    pub fn bank() -> Self {
        Self {
            header_row: 4,
            ..Self::default()
        }
    }
}

/// Specification for a column in the source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnSpec {
    /// Column specified by zero-based index.
    Index(usize),
    /// Column specified by name (from header).
    Name(String),
}

impl ColumnSpec {
    /// Column by name.
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }
}

impl fmt::Display for ColumnSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(i) => write!(f, "#{i}"),
            Self::Name(name) => f.write_str(name),
        }
    }
}

/// Columns of the pre-registration sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreRegistroColumns {
    /// Customer account.
    pub client: ColumnSpec,
    /// Invoice number (may be blank).
    pub invoice: ColumnSpec,
    /// Sales order number.
    pub order: ColumnSpec,
    /// Territory code.
    pub territory: ColumnSpec,
    /// Collected amount.
    pub amount: ColumnSpec,
}

impl Default for PreRegistroColumns {
    fn default() -> Self {
        Self {
            client: ColumnSpec::name("Cliente"),
            invoice: ColumnSpec::name("Factura"),
            order: ColumnSpec::name("Número Pedido"),
            territory: ColumnSpec::name("Territorio"),
            amount: ColumnSpec::name("Importe Abonado"),
        }
    }
}

/// Columns of the bank sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BankColumns {
    /// Value date.
    pub date: ColumnSpec,
    /// Bank G/L account.
    pub account: ColumnSpec,
    /// Movement amount.
    pub amount: ColumnSpec,
    /// Bank operation reference.
    pub operation: ColumnSpec,
    /// Rounding difference of the batch (first row only).
    pub rounding: ColumnSpec,
}

impl Default for BankColumns {
    fn default() -> Self {
        Self {
            date: ColumnSpec::name("FECHA"),
            account: ColumnSpec::name("CUENTA"),
            amount: ColumnSpec::name("IMPORTE"),
            operation: ColumnSpec::name("NRO.OPERACION"),
            rounding: ColumnSpec::name("REDONDEO"),
        }
    }
}

/// Builder for sheet configuration.
pub struct SheetConfigBuilder {
    config: SheetConfig,
}

impl SheetConfigBuilder {
    /// Create a new builder with default layout.
    pub fn new() -> Self {
        Self {
            config: SheetConfig::default(),
        }
    }

    /// Set the field delimiter.
    pub const fn delimiter(mut self, delimiter: char) -> Self {
        self.config.delimiter = delimiter;
        self
    }

    /// Set the number of lines above the header row.
    pub const fn header_row(mut self, lines: usize) -> Self {
        self.config.header_row = lines;
        self
    }

    /// Set the decimal separator of amount cells.
    pub const fn decimal_separator(mut self, separator: char) -> Self {
        self.config.decimal_separator = separator;
        self
    }

    /// Accept only this date format.
    pub fn date_format(mut self, format: impl Into<String>) -> Self {
        self.config.date_formats = vec![format.into()];
        self
    }

    /// Accept an additional date format.
    pub fn also_date_format(mut self, format: impl Into<String>) -> Self {
        self.config.date_formats.push(format.into());
        self
    }

    /// Build the configuration.
    pub fn build(self) -> SheetConfig {
        self.config
    }
}

impl Default for SheetConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
