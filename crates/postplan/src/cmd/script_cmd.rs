//! postplan-script - Replay the posting plan into a GUI scripting file.
//!
//! # Usage
//!
//! ```bash
//! postplan-script --config run.json -o cobranzas.vbs
//! postplan-script --config run.json > cobranzas.vbs
//! ```

use crate::cmd::completions::ShellType;
use crate::cmd::RunArgs;
use crate::pipeline;
use crate::script::ScriptActuator;
use anyhow::{Context, Result};
use clap::Parser;
use postplan_core::replay;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

/// Compile the collections document and write it as a GUI script.
#[derive(Parser, Debug)]
#[command(name = "postplan-script")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Generate shell completions and exit
    #[arg(long, value_name = "SHELL", hide = true)]
    pub generate_completions: Option<ShellType>,

    #[command(flatten)]
    pub run: RunArgs,

    /// Write the script to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Write the logon password into the script instead of prompting for it
    #[arg(long)]
    pub embed_secret: bool,
}

/// Main entry point for the script command.
pub fn main() -> ExitCode {
    main_with_name("postplan-script")
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

    let out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path)
                .with_context(|| format!("Failed to create file: {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };

    let mut actuator =
        ScriptActuator::new(out, config.connection, config.session, args.embed_secret)?;
    let report = replay(&doc.plan, &mut actuator)?;
    let statements = actuator.statements();
    actuator.finish()?;

    let target = args
        .output
        .as_ref()
        .map_or_else(|| "stdout".to_string(), |p| p.display().to_string());
    eprintln!(
        "Wrote {} steps ({statements} statements) to {target}",
        report.steps
    );
    Ok(())
}
