//! Pre-registration sheet reader.

use crate::config::{PreRegistroColumns, SheetConfig};
use crate::sheet::{cell, normalize_code, parse_money_string, Table};
use crate::{SheetReader, SheetResult};
use anyhow::{bail, Result};
use postplan_core::PreRegistroRow;

/// Reads the collections pre-registration sheet.
///
/// Every record is kept, blank ones included: the trailing summary block is
/// dropped later by classification, which needs to see it.
#[derive(Debug, Clone, Default)]
pub struct PreRegistroReader {
    sheet: SheetConfig,
    columns: PreRegistroColumns,
}

impl PreRegistroReader {
    /// Create a reader for the given layout.
    pub const fn new(sheet: SheetConfig, columns: PreRegistroColumns) -> Self {
        Self { sheet, columns }
    }
}

impl SheetReader for PreRegistroReader {
    type Row = PreRegistroRow;

    fn name(&self) -> &'static str {
        "preregistro"
    }

    fn sheet_config(&self) -> &SheetConfig {
        &self.sheet
    }

    fn read_table(&self, table: &Table) -> Result<SheetResult<PreRegistroRow>> {
        let client = table.column(&self.columns.client)?;
        let invoice = table.column(&self.columns.invoice)?;
        let order = table.column(&self.columns.order)?;
        let territory = table.column(&self.columns.territory)?;
        let amount = table.column(&self.columns.amount)?;

        let mut rows = Vec::with_capacity(table.len());
        for (line, record) in table.records() {
            let raw_amount = cell(record, amount);
            let parsed = if raw_amount.is_empty() {
                None
            } else {
                match parse_money_string(raw_amount, self.sheet.decimal_separator) {
                    Some(value) => Some(value),
                    None => bail!(
                        "line {line}: cannot read amount '{raw_amount}' in column '{}'",
                        self.columns.amount
                    ),
                }
            };

            rows.push(PreRegistroRow {
                client_id: normalize_code(cell(record, client)),
                invoice_id: normalize_code(cell(record, invoice)),
                order_id: normalize_code(cell(record, order)),
                territory: normalize_code(cell(record, territory)),
                amount: parsed,
            });
        }

        tracing::debug!(rows = rows.len(), "read pre-registration sheet");
        Ok(SheetResult::new(rows))
    }
}
