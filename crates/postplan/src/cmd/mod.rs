//! Command implementations for CLI tools.
//!
//! Each module contains the full implementation for a command,
//! which can be invoked by thin wrapper binaries.

pub mod compile_cmd;
pub mod completions;
pub mod script_cmd;
pub mod split_cmd;

use crate::config::RunConfig;
use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use std::path::PathBuf;

/// Options shared by every command: where the run is described.
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Run configuration file (JSON)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory holding the day's sheets (overrides config and environment)
    #[arg(short = 'd', long, value_name = "DIR")]
    pub base_dir: Option<PathBuf>,

    /// Date the posting is made on (default: today), as YYYY-MM-DD
    #[arg(long, value_name = "DATE")]
    pub today: Option<NaiveDate>,

    /// Show verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl RunArgs {
    /// Load the run configuration, applying `--base-dir` last.
    pub fn load_config(&self) -> Result<RunConfig> {
        let mut config = RunConfig::load(self.config.as_deref())?;
        if let Some(dir) = &self.base_dir {
            config.base_dir = Some(dir.clone());
        }
        Ok(config)
    }

    /// The posting date.
    pub fn today(&self) -> NaiveDate {
        self.today
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}
