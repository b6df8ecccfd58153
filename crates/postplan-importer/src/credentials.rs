//! Logon credentials stored in a workbook tab.
//!
//! The credentials live in two fixed cells of a sheet export, addressed in
//! A1 notation (`C2` for the user, `C3` for the password by default).

use anyhow::{bail, Context, Result};
use postplan_core::Credentials;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// A cell address in A1 notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CellRef {
    /// Zero-based row.
    pub row: usize,
    /// Zero-based column.
    pub column: usize,
}

impl CellRef {
    /// Parse an A1 reference such as `C2` or `AA10`.
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        let split = s
            .find(|c: char| c.is_ascii_digit())
            .with_context(|| format!("cell reference '{s}' has no row"))?;
        let (letters, digits) = s.split_at(split);
        if letters.is_empty() || !letters.chars().all(|c| c.is_ascii_alphabetic()) {
            bail!("cell reference '{s}' has no column");
        }

        let Some(column) = letters.chars().try_fold(0usize, |acc, c| {
            let digit = c.to_ascii_uppercase() as usize - 'A' as usize + 1;
            acc.checked_mul(26)?.checked_add(digit)
        }) else {
            bail!("cell reference '{s}' column is out of range");
        };
        let column = column - 1;
        let row: usize = digits
            .parse()
            .with_context(|| format!("cell reference '{s}' has an invalid row"))?;
        if row == 0 {
            bail!("cell reference '{s}': rows start at 1");
        }

        Ok(Self {
            row: row - 1,
            column,
        })
    }
}

impl FromStr for CellRef {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CellRef {
    type Error = anyhow::Error;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<CellRef> for String {
    fn from(cell: CellRef) -> Self {
        cell.to_string()
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut letters = Vec::new();
        let mut n = self.column + 1;
        while n > 0 {
            let rem = (n - 1) % 26;
            letters.push(char::from(b'A' + rem as u8));
            n = (n - 1) / 26;
        }
        for c in letters.iter().rev() {
            write!(f, "{c}")?;
        }
        write!(f, "{}", self.row + 1)
    }
}

/// Where the user and password cells are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialCells {
    /// Cell holding the user name.
    pub user: CellRef,
    /// Cell holding the password.
    pub secret: CellRef,
}

impl Default for CredentialCells {
    fn default() -> Self {
        Self {
            user: CellRef { row: 1, column: 2 },
            secret: CellRef { row: 2, column: 2 },
        }
    }
}

/// Read credentials from sheet content.
pub fn read_credentials_str(content: &str, cells: &CredentialCells) -> Result<Credentials> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut grid = Vec::new();
    for record in reader.records() {
        grid.push(record.context("failed to read credentials sheet")?);
    }

    let lookup = |cell: CellRef| -> String {
        grid.get(cell.row)
            .and_then(|r| r.get(cell.column))
            .map(|v| v.trim().to_string())
            .unwrap_or_default()
    };

    let credentials = Credentials::new(lookup(cells.user), lookup(cells.secret))
        .with_context(|| format!("cells {} and {}", cells.user, cells.secret))?;
    tracing::debug!(user = %credentials.user, "read credentials");
    Ok(credentials)
}

/// Read credentials from a sheet file.
pub fn read_credentials(path: &Path, cells: &CredentialCells) -> Result<Credentials> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to open file: {}", path.display()))?;
    read_credentials_str(&content, cells).with_context(|| format!("in {}", path.display()))
}
