//! Shared steps of the commands: read the day's sheets and compile.

use crate::config::RunConfig;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use postplan_core::{build_plan, BankRow, CompiledDocument, PreRegistroRow};
use postplan_importer::{read_credentials, BankReader, PreRegistroReader, SheetReader};

/// Read the pre-registration sheet.
pub fn read_preregistro(config: &RunConfig) -> Result<Vec<PreRegistroRow>> {
    let reader = PreRegistroReader::new(
        config.preregistro_sheet.clone(),
        config.preregistro_columns.clone(),
    );
    Ok(reader.read_file(&config.preregistro_file())?.rows)
}

/// Read the bank movements sheet. Skipped rows are logged by the reader.
pub fn read_bank(config: &RunConfig) -> Result<Vec<BankRow>> {
    let reader = BankReader::new(config.banco_sheet.clone(), config.banco_columns.clone());
    Ok(reader.read_file(&config.banco_file())?.rows)
}

/// Read every input of the run and compile the document.
pub fn compile_document(config: &RunConfig, today: NaiveDate) -> Result<CompiledDocument> {
    let _span = tracing::info_span!("compile", %today).entered();

    let preregistro = read_preregistro(config)?;
    let bank = read_bank(config)?;
    let credentials = read_credentials(&config.credentials_file(), &config.credential_cells)?;

    build_plan(&preregistro, &bank, &credentials, today, &config.settings).with_context(|| {
        format!(
            "compiling {} and {}",
            config.preregistro_file().display(),
            config.banco_file().display()
        )
    })
}
