//! Row classification.
//!
//! Splits the pre-registration sheet into invoice-settled and order-settled
//! collections.

use crate::error::{PlanError, Result};
use crate::model::PreRegistroRow;
use std::collections::HashSet;

/// Size of the footer block some sheet exports append after the data.
pub const FOOTER_ROWS: usize = 2;

/// Pre-registration rows split by settlement kind, input order preserved.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Batch {
    /// Rows with a non-blank invoice id.
    pub invoices: Vec<PreRegistroRow>,
    /// Rows without an invoice id.
    pub orders: Vec<PreRegistroRow>,
}

impl Batch {
    /// Total number of classified rows.
    pub fn len(&self) -> usize {
        self.invoices.len() + self.orders.len()
    }

    /// True if no row was classified.
    pub fn is_empty(&self) -> bool {
        self.invoices.is_empty() && self.orders.is_empty()
    }

    /// Invoice ids that appear on more than one invoice-settled row, in
    /// first-seen order.
    pub fn duplicate_invoices(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        let mut duplicates = Vec::new();
        for row in &self.invoices {
            let id = row.invoice_id.trim();
            if !seen.insert(id) && reported.insert(id) {
                duplicates.push(id.to_string());
            }
        }
        duplicates
    }
}

/// Number of leading rows that are data, after discarding a trailing footer
/// block made entirely of blank rows.
pub fn data_row_count(rows: &[PreRegistroRow]) -> usize {
    if rows.len() < FOOTER_ROWS {
        return rows.len();
    }
    let footer_start = rows.len() - FOOTER_ROWS;
    if rows[footer_start..].iter().all(PreRegistroRow::is_blank) {
        footer_start
    } else {
        rows.len()
    }
}

/// Classify rows into invoice-settled and order-settled collections.
pub fn classify(rows: &[PreRegistroRow]) -> Result<Batch> {
    if rows.is_empty() {
        return Err(PlanError::DataShape(
            "pre-registration sheet has no rows".to_string(),
        ));
    }

    let data = &rows[..data_row_count(rows)];
    if data.is_empty() {
        return Err(PlanError::DataShape(
            "pre-registration sheet has no data rows".to_string(),
        ));
    }

    let (invoices, orders): (Vec<_>, Vec<_>) = data
        .iter()
        .cloned()
        .partition(PreRegistroRow::is_invoice_settled);

    tracing::debug!(
        rows = rows.len(),
        dropped = rows.len() - data.len(),
        invoices = invoices.len(),
        orders = orders.len(),
        "classified pre-registration rows"
    );

    Ok(Batch { invoices, orders })
}
