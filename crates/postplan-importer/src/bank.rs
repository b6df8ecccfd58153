//! Bank movements sheet reader.

use crate::config::{BankColumns, SheetConfig};
use crate::sheet::{cell, is_blank_record, normalize_code, parse_date, parse_money_string, Table};
use crate::{SheetReader, SheetResult};
use anyhow::{Context, Result};
use postplan_core::BankRow;

/// Reads the bank movements sheet.
#[derive(Debug, Clone)]
pub struct BankReader {
    sheet: SheetConfig,
    columns: BankColumns,
}

impl BankReader {
    /// Create a reader for the given layout.
    pub const fn new(sheet: SheetConfig, columns: BankColumns) -> Self {
        Self { sheet, columns }
    }
}

impl Default for BankReader {
    fn default() -> Self {
        Self::new(SheetConfig::bank(), BankColumns::default())
    }
}

impl SheetReader for BankReader {
    type Row = BankRow;

    fn name(&self) -> &'static str {
        "banco"
    }

    fn sheet_config(&self) -> &SheetConfig {
        &self.sheet
    }

    fn read_table(&self, table: &Table) -> Result<SheetResult<BankRow>> {
        let date = table.column(&self.columns.date)?;
        let account = table.column(&self.columns.account)?;
        let amount = table.column(&self.columns.amount)?;
        let operation = table.column(&self.columns.operation)?;
        // Only the first row carries a rounding figure; the column may be absent.
        let rounding = table.column(&self.columns.rounding).ok();

        let mut result = SheetResult::empty();
        for (line, record) in table.records() {
            if is_blank_record(record) {
                result = result.with_warning(format!("line {line}: blank row skipped"));
                continue;
            }

            let raw_amount = cell(record, amount);
            let value = parse_money_string(raw_amount, self.sheet.decimal_separator)
                .with_context(|| {
                    format!(
                        "line {line}: cannot read amount '{raw_amount}' in column '{}'",
                        self.columns.amount
                    )
                })?;
            let value_date = parse_date(cell(record, date), &self.sheet.date_formats)
                .with_context(|| format!("line {line}: column '{}'", self.columns.date))?;

            let mut row = BankRow::new(
                normalize_code(cell(record, account)),
                value,
                normalize_code(cell(record, operation)),
            );
            row.value_date = value_date;
            if let Some(index) = rounding {
                let raw = cell(record, index);
                row.rounding = parse_money_string(raw, self.sheet.decimal_separator)
                    .map_or_else(|| raw.to_string(), |value| value.to_string());
            }
            result.rows.push(row);
        }

        for warning in &result.warnings {
            tracing::warn!("{warning}");
        }
        tracing::debug!(rows = result.rows.len(), "read bank sheet");
        Ok(result)
    }
}
