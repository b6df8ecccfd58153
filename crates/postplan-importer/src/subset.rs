//! Persisted invoice and order subsets.
//!
//! After classification the two collections are written back as sheets with
//! the pre-registration header, so an operator can check the split before
//! the document is posted. The files read back with
//! [`PreRegistroReader`](crate::PreRegistroReader).

use anyhow::{Context, Result};
use postplan_core::{Batch, PreRegistroRow};
use std::fs::File;
use std::io;
use std::path::Path;

/// Header written to subset sheets.
pub const SUBSET_HEADER: [&str; 5] = [
    "Cliente",
    "Factura",
    "Número Pedido",
    "Territorio",
    "Importe Abonado",
];

/// Write rows as a subset sheet.
pub fn write_subset<W: io::Write>(writer: W, rows: &[PreRegistroRow]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(SUBSET_HEADER)?;
    for row in rows {
        let amount = row.amount.map(|a| a.to_string()).unwrap_or_default();
        writer.write_record([
            row.client_id.as_str(),
            row.invoice_id.as_str(),
            row.order_id.as_str(),
            row.territory.as_str(),
            amount.as_str(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Write rows to a subset sheet file, replacing it.
pub fn write_subset_file(path: &Path, rows: &[PreRegistroRow]) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create file: {}", path.display()))?;
    write_subset(file, rows).with_context(|| format!("writing {}", path.display()))
}

/// Write both collections of a batch.
pub fn write_batch(invoice_path: &Path, order_path: &Path, batch: &Batch) -> Result<()> {
    write_subset_file(invoice_path, &batch.invoices)?;
    write_subset_file(order_path, &batch.orders)?;
    tracing::info!(
        invoices = batch.invoices.len(),
        orders = batch.orders.len(),
        "wrote subsets to {} and {}",
        invoice_path.display(),
        order_path.display()
    );
    Ok(())
}
