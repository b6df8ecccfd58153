//! Run configuration.
//!
//! A run is described by a JSON file naming the day's sheets and the
//! document settings. Every field has a default, so `{}` is a valid
//! configuration. Relative paths are resolved against `base_dir`, which the
//! `POSTPLAN_BASE_DIR` environment variable overrides.

use anyhow::{Context, Result};
use postplan_core::PlanSettings;
use postplan_importer::{BankColumns, CredentialCells, PreRegistroColumns, SheetConfig};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding [`RunConfig::base_dir`].
pub const BASE_DIR_ENV: &str = "POSTPLAN_BASE_DIR";

/// Everything one run needs besides the sheets themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Directory that relative paths are resolved against.
    pub base_dir: Option<PathBuf>,
    /// Pre-registration sheet.
    pub preregistro_path: PathBuf,
    /// Bank movements sheet.
    pub banco_path: PathBuf,
    /// Invoice-settled subset written by `postplan-split`.
    pub factura_path: PathBuf,
    /// Order-settled subset written by `postplan-split`.
    pub pedido_path: PathBuf,
    /// Credentials tab of the bank workbook.
    pub credentials_path: PathBuf,
    /// Index of the GUI connection the script binds to.
    pub connection: usize,
    /// Index of the session within the connection.
    pub session: usize,
    /// Company, currency and posting codes.
    #[serde(flatten)]
    pub settings: PlanSettings,
    /// Cells holding the user and password.
    pub credential_cells: CredentialCells,
    /// Layout of the pre-registration sheet.
    pub preregistro_sheet: SheetConfig,
    /// Columns of the pre-registration sheet.
    pub preregistro_columns: PreRegistroColumns,
    /// Layout of the bank sheet.
    pub banco_sheet: SheetConfig,
    /// Columns of the bank sheet.
    pub banco_columns: BankColumns,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            base_dir: None,
            preregistro_path: PathBuf::from("preregistro.csv"),
            banco_path: PathBuf::from("banco.csv"),
            factura_path: PathBuf::from("factura.csv"),
            pedido_path: PathBuf::from("pedido.csv"),
            credentials_path: PathBuf::from("credenciales.csv"),
            connection: 0,
            session: 0,
            settings: PlanSettings::default(),
            credential_cells: CredentialCells::default(),
            preregistro_sheet: SheetConfig::default(),
            preregistro_columns: PreRegistroColumns::default(),
            banco_sheet: SheetConfig::bank(),
            banco_columns: BankColumns::default(),
        }
    }
}

impl RunConfig {
    /// Parse a configuration from JSON.
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("invalid run configuration")
    }

    /// Load the configuration file, or the defaults when none is given, then
    /// apply the environment override.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => {
                let content = fs::read_to_string(path)
                    .with_context(|| format!("Failed to open file: {}", path.display()))?;
                Self::from_json(&content).with_context(|| format!("in {}", path.display()))?
            }
            None => Self::default(),
        };
        Ok(config.with_base_dir_override(std::env::var_os(BASE_DIR_ENV)))
    }

    /// Replace `base_dir` when an override is set and non-empty.
    pub fn with_base_dir_override(mut self, dir: Option<OsString>) -> Self {
        if let Some(dir) = dir.filter(|d| !d.is_empty()) {
            tracing::debug!(base_dir = ?dir, "base directory overridden");
            self.base_dir = Some(PathBuf::from(dir));
        }
        self
    }

    /// Resolve a configured path against `base_dir`.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }

    /// Resolved pre-registration sheet path.
    pub fn preregistro_file(&self) -> PathBuf {
        self.resolve(&self.preregistro_path)
    }

    /// Resolved bank sheet path.
    pub fn banco_file(&self) -> PathBuf {
        self.resolve(&self.banco_path)
    }

    /// Resolved invoice subset path.
    pub fn factura_file(&self) -> PathBuf {
        self.resolve(&self.factura_path)
    }

    /// Resolved order subset path.
    pub fn pedido_file(&self) -> PathBuf {
        self.resolve(&self.pedido_path)
    }

    /// Resolved credentials sheet path.
    pub fn credentials_file(&self) -> PathBuf {
        self.resolve(&self.credentials_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use postplan_importer::{CellRef, ColumnSpec};

    #[test]
    fn test_empty_config_is_default() {
        let config = RunConfig::from_json("{}").unwrap();
        assert_eq!(config, RunConfig::default());
        assert_eq!(config.settings.company_code, "246");
        assert_eq!(config.banco_sheet.header_row, 4);
        assert_eq!(config.preregistro_sheet.header_row, 0);
    }

    #[test]
    fn test_partial_config() {
        let config = RunConfig::from_json(
            r#"{
                "base_dir": "/srv/cobranzas",
                "banco_path": "extracto.csv",
                "company_code": "300",
                "currency": "USD",
                "codes": {"adjustment_account": "659310100"},
                "credential_cells": {"user": "B2", "secret": "B3"},
                "banco_columns": {"operation": "Nro. Operacion"},
                "connection": 1
            }"#,
        )
        .unwrap();

        assert_eq!(config.banco_file(), PathBuf::from("/srv/cobranzas/extracto.csv"));
        assert_eq!(
            config.preregistro_file(),
            PathBuf::from("/srv/cobranzas/preregistro.csv")
        );
        assert_eq!(config.settings.company_code, "300");
        assert_eq!(config.settings.currency, "USD");
        assert_eq!(config.settings.codes.adjustment_account, "659310100");
        assert_eq!(config.settings.codes.credit_key, "50");
        assert_eq!(config.credential_cells.user, CellRef::parse("B2").unwrap());
        assert_eq!(
            config.banco_columns.operation,
            ColumnSpec::name("Nro. Operacion")
        );
        assert_eq!(config.banco_columns.amount, ColumnSpec::name("IMPORTE"));
        assert_eq!(config.connection, 1);
    }

    #[test]
    fn test_invalid_config() {
        assert!(RunConfig::from_json(r#"{"connection": "first"}"#).is_err());
        assert!(RunConfig::from_json(r#"{"credential_cells": {"user": "2B"}}"#).is_err());
    }

    #[test]
    fn test_base_dir_override() {
        let config = RunConfig::default();
        assert_eq!(config.banco_file(), PathBuf::from("banco.csv"));

        let config = config.with_base_dir_override(Some(OsString::from("/data/day")));
        assert_eq!(config.banco_file(), PathBuf::from("/data/day/banco.csv"));

        let config = config.with_base_dir_override(Some(OsString::new()));
        assert_eq!(config.base_dir, Some(PathBuf::from("/data/day")));
    }

    #[test]
    fn test_absolute_paths_are_kept() {
        let mut config = RunConfig::default();
        config.base_dir = Some(PathBuf::from("/data/day"));
        config.credentials_path = PathBuf::from("/secure/credenciales.csv");
        assert_eq!(
            config.credentials_file(),
            PathBuf::from("/secure/credenciales.csv")
        );
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.json");
        std::fs::write(&path, r#"{"currency": "USD"}"#).unwrap();
        let config = RunConfig::load(Some(&path)).unwrap();
        assert_eq!(config.settings.currency, "USD");

        let missing = dir.path().join("missing.json");
        assert!(RunConfig::load(Some(&missing)).is_err());
    }
}
