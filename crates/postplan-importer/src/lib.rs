//! Sheet readers for postplan
//!
//! This crate reads the daily collections workbook exports into the row
//! types of [`postplan_core`], and writes the classified subsets back.
//!
//! Each sheet has its own reader implementing [`SheetReader`]:
//!
//! - [`PreRegistroReader`] - the pre-registration sheet, blank rows kept
//! - [`BankReader`] - the bank movements sheet, title lines skipped
//!
//! Credentials are read from fixed cells with [`read_credentials`].
//!
//! # Example
//!
//! ```rust,no_run
//! use postplan_importer::{BankReader, PreRegistroReader, SheetReader};
//! use std::path::Path;
//!
//! let rows = PreRegistroReader::default().read_file(Path::new("preregistro.csv"))?;
//! let bank = BankReader::default().read_file(Path::new("banco.csv"))?;
//! println!("{} rows, {} movements", rows.rows.len(), bank.rows.len());
//! # Ok::<(), anyhow::Error>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod bank;
pub mod config;
pub mod credentials;
pub mod preregistro;
pub mod sheet;
pub mod subset;

use anyhow::{Context, Result};
use std::path::Path;

pub use bank::BankReader;
pub use config::{BankColumns, ColumnSpec, PreRegistroColumns, SheetConfig};
pub use credentials::{read_credentials, CellRef, CredentialCells};
pub use preregistro::PreRegistroReader;
pub use sheet::Table;
pub use subset::{write_batch, write_subset_file};

/// Result of reading a sheet.
#[derive(Debug, Clone)]
pub struct SheetResult<T> {
    /// The rows read, in sheet order.
    pub rows: Vec<T>,
    /// Warnings encountered while reading.
    pub warnings: Vec<String>,
}

impl<T> SheetResult<T> {
    /// Create a new result.
    pub const fn new(rows: Vec<T>) -> Self {
        Self {
            rows,
            warnings: Vec::new(),
        }
    }

    /// Create an empty result.
    pub const fn empty() -> Self {
        Self {
            rows: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Add a warning to the result.
    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }
}

/// Trait for sheet readers.
pub trait SheetReader {
    /// Row type produced by this reader.
    type Row;

    /// Returns the name of the sheet this reader handles.
    fn name(&self) -> &'static str;

    /// Layout of the sheet.
    fn sheet_config(&self) -> &SheetConfig;

    /// Turn a parsed table into rows.
    fn read_table(&self, table: &Table) -> Result<SheetResult<Self::Row>>;

    /// Read rows from sheet content (useful for testing).
    fn read_str(&self, content: &str) -> Result<SheetResult<Self::Row>> {
        let table = Table::parse(content, self.sheet_config())?;
        self.read_table(&table)
            .with_context(|| format!("reading {} sheet", self.name()))
    }

    /// Read rows from a sheet file.
    fn read_file(&self, path: &Path) -> Result<SheetResult<Self::Row>> {
        let table = Table::from_file(path, self.sheet_config())?;
        self.read_table(&table)
            .with_context(|| format!("reading {} sheet {}", self.name(), path.display()))
    }
}
