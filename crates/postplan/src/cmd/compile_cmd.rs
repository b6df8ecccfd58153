//! postplan-compile - Compile the day's sheets into a posting plan.
//!
//! Reads the pre-registration sheet, the bank movements and the
//! credentials, and prints the plan without touching the entry screen.
//!
//! # Usage
//!
//! ```bash
//! postplan-compile --config run.json
//! postplan-compile --base-dir /srv/cobranzas/2026-10-16 --format json
//! ```

use crate::cmd::completions::ShellType;
use crate::cmd::RunArgs;
use crate::pipeline;
use anyhow::Result;
use clap::{Parser, ValueEnum};
use postplan_core::format::format_header;
use postplan_core::{format_plan, CompiledDocument, DocumentHeader, FormatConfig, PostingPlan};
use serde::Serialize;
use std::io::{self, Write};
use std::process::ExitCode;

/// Output format for the plan.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Listing grouped by phase (default)
    #[default]
    Text,
    /// JSON document for tooling
    Json,
}

/// Compile the collections document and print its posting plan.
#[derive(Parser, Debug)]
#[command(name = "postplan-compile")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Generate shell completions and exit
    #[arg(long, value_name = "SHELL", hide = true)]
    pub generate_completions: Option<ShellType>,

    #[command(flatten)]
    pub run: RunArgs,

    /// Output format (text or json)
    #[arg(long, short = 'f', value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Also list phases that emitted no action
    #[arg(long)]
    pub show_empty: bool,

    /// Print the document header before the plan
    #[arg(long)]
    pub header: bool,
}

/// JSON output structure.
#[derive(Debug, Serialize)]
pub struct JsonOutput<'a> {
    /// Extracted document header
    pub header: &'a DocumentHeader,
    /// Number of invoice-settled rows
    pub invoice_count: usize,
    /// Number of order-settled rows
    pub order_count: usize,
    /// The plan
    pub plan: &'a PostingPlan,
}

impl<'a> JsonOutput<'a> {
    /// Build the JSON view of a compiled document.
    pub fn new(doc: &'a CompiledDocument) -> Self {
        Self {
            header: &doc.header,
            invoice_count: doc.batch.invoices.len(),
            order_count: doc.batch.orders.len(),
            plan: &doc.plan,
        }
    }
}

/// Main entry point for the compile command.
pub fn main() -> ExitCode {
    main_with_name("postplan-compile")
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
    let doc = pipeline::compile_document(&config, args.run.today())?;

    let mut stdout = io::stdout().lock();
    match args.format {
        OutputFormat::Text => {
            if args.header {
                write!(stdout, "{}", format_header(&doc.header))?;
                writeln!(stdout)?;
            }
            let fmt_config = FormatConfig {
                show_empty_phases: args.show_empty,
                ..FormatConfig::default()
            };
            write!(stdout, "{}", format_plan(&doc.plan, &fmt_config))?;
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut stdout, &JsonOutput::new(&doc))?;
            writeln!(stdout)?;
        }
    }

    eprintln!(
        "Compiled {} actions for {} invoice and {} order rows",
        doc.plan.len(),
        doc.batch.invoices.len(),
        doc.batch.orders.len()
    );
    Ok(())
}
