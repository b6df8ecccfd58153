//! postplan-split - Write the invoice and order subsets of the day.
//!
//! Classifies the pre-registration sheet and writes the two collections to
//! the configured `factura_path` and `pedido_path` sheets for review.
//!
//! # Usage
//!
//! ```bash
//! postplan-split --config run.json
//! ```

use crate::cmd::completions::ShellType;
use crate::cmd::RunArgs;
use crate::pipeline;
use anyhow::Result;
use clap::Parser;
use postplan_core::classify;
use postplan_importer::write_batch;
use std::process::ExitCode;

/// Split the pre-registration sheet into invoice and order subsets.
#[derive(Parser, Debug)]
#[command(name = "postplan-split")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Generate shell completions and exit
    #[arg(long, value_name = "SHELL", hide = true)]
    pub generate_completions: Option<ShellType>,

    #[command(flatten)]
    pub run: RunArgs,
}

/// Main entry point for the split command.
pub fn main() -> ExitCode {
    main_with_name("postplan-split")
}

/// Main entry point with custom binary name.
pub fn main_with_name(bin_name: &str) -> ExitCode {
    let args = Args::parse();

    if let Some(shell) = args.generate_completions {
        crate::cmd::completions::generate_completions::<Args>(shell, bin_name);
        return ExitCode::SUCCESS;
    }

    crate::logging::init(args.run.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let config = args.run.load_config()?;
    let rows = pipeline::read_preregistro(&config)?;
    let batch = classify(&rows)?;

    for id in batch.duplicate_invoices() {
        eprintln!("warning: invoice {id} appears more than once");
    }

    let factura = config.factura_file();
    let pedido = config.pedido_file();
    write_batch(&factura, &pedido, &batch)?;

    eprintln!(
        "Wrote {} invoice rows to {} and {} order rows to {}",
        batch.invoices.len(),
        factura.display(),
        batch.orders.len(),
        pedido.display()
    );
    Ok(())
}
