//! Document header extraction.

use crate::codes::PlanSettings;
use crate::error::{PlanError, Result};
use crate::fiscal::fiscal_period;
use crate::model::{BankRow, DocumentHeader, PreRegistroRow};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Derive the document header from the first bank row and the first
/// invoice-settled row.
pub fn extract_header(
    bank_rows: &[BankRow],
    invoice_rows: &[PreRegistroRow],
    today: NaiveDate,
    settings: &PlanSettings,
) -> Result<DocumentHeader> {
    let first_bank = bank_rows.first().ok_or_else(|| PlanError::missing("FECHA"))?;
    let document_date = first_bank
        .value_date
        .ok_or_else(|| PlanError::missing("FECHA"))?;

    let first_invoice = invoice_rows
        .first()
        .ok_or_else(|| PlanError::missing("territory"))?;
    let territory = parse_territory(&first_invoice.territory)?;

    let rounding_amount = parse_rounding(&first_bank.rounding)?;

    Ok(DocumentHeader {
        document_date,
        posting_date: today,
        fiscal_period: fiscal_period(today),
        company_code: settings.company_code.clone(),
        currency: settings.currency.clone(),
        document_text: format!("{}{territory}", settings.codes.text_prefix),
        territory,
        rounding_amount,
    })
}

/// Integer form of a territory cell (`"12.0"` becomes `"12"`).
pub fn parse_territory(raw: &str) -> Result<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(PlanError::missing("territory"));
    }
    let value = Decimal::from_str(raw)
        .map_err(|_| PlanError::invalid("territory", raw, "not a number"))?;
    Ok(value.trunc().normalize().to_string())
}

/// Rounding cell value; a blank cell means no rounding.
pub fn parse_rounding(raw: &str) -> Result<Decimal> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(Decimal::ZERO);
    }
    Decimal::from_str(raw).map_err(|_| PlanError::invalid("REDONDEO", raw, "not a number"))
}
