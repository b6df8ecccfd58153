//! Integration tests running the built binaries against sheets on disk.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const PREREGISTRO: &str = "\
Cliente,Factura,Número Pedido,Territorio,Importe Abonado
900.0,INV-1,,12.0,400.00
777,,3100001,12,100.00
,,,,
,,,,
";

const BANCO: &str = "\
BANCO DE PRUEBA
Extracto de movimientos
Cuenta,100200
,,,,
FECHA,CUENTA,IMPORTE,NRO.OPERACION,REDONDEO
16/10/2026,100200,500.00,778812,0.03
";

const CREDENCIALES: &str = "\
Acceso,,
Usuario,,jdoe
Clave,,s3cret
";

fn fixture() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("preregistro.csv"), PREREGISTRO).unwrap();
    fs::write(dir.path().join("banco.csv"), BANCO).unwrap();
    fs::write(dir.path().join("credenciales.csv"), CREDENCIALES).unwrap();
    dir
}

fn run(bin: &str, dir: &Path, extra: &[&str]) -> Output {
    Command::new(bin)
        .arg("--base-dir")
        .arg(dir)
        .args(["--today", "2026-10-18"])
        .args(extra)
        .env_remove("POSTPLAN_BASE_DIR")
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn compile(dir: &Path, extra: &[&str]) -> Output {
    run(env!("CARGO_BIN_EXE_postplan-compile"), dir, extra)
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

// ============================================================================
// postplan-compile
// ============================================================================

#[test]
fn test_compile_text_listing() {
    let dir = fixture();
    let output = compile(dir.path(), &[]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let text = stdout(&output);
    assert!(text.starts_with("SESSION logon jdoe / *** then transaction FB05\n"));
    assert!(text.contains("HEADER (7)\n"));
    assert!(text.contains("BANK_LINES (6)\n"));
    assert!(text.contains("ORDER_LINES (12)\n"));
    assert!(text.contains("INVOICE_LINES (10)\n"));
    assert!(text.contains("SAVE (2)\n"));
    assert!(text.contains("ROUNDING (6)\n"));
    assert!(text.contains("CLOSE (2)\n"));
    assert!(text.contains("\"COBRANZAS DUAL-12\""));
    assert!(!text.contains("s3cret"));
    assert!(stderr(&output).contains("Compiled 45 actions for 1 invoice and 1 order rows"));
}

#[test]
fn test_compile_json() {
    let dir = fixture();
    let output = compile(dir.path(), &["--format", "json"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["invoice_count"], 1);
    assert_eq!(value["order_count"], 1);
    assert_eq!(value["header"]["territory"], "12");
    assert_eq!(value["header"]["fiscal_period"], 7);
    assert_eq!(value["plan"]["session"]["secret"], "***");
    assert_eq!(value["plan"]["actions"].as_array().map(Vec::len), Some(45));
    assert!(!stdout(&output).contains("s3cret"));
}

#[test]
fn test_compile_with_config_file() {
    let dir = fixture();
    let config = dir.path().join("run.json");
    fs::write(
        &config,
        r#"{"company_code": "300", "codes": {"text_prefix": "COBROS-"}}"#,
    )
    .unwrap();

    let output = compile(dir.path(), &["--config", config.to_str().unwrap(), "--header"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("company:       300\n"));
    assert!(text.contains("\"COBROS-12\""));
}

#[test]
fn test_compile_empty_bank_sheet_fails() {
    let dir = fixture();
    fs::write(
        dir.path().join("banco.csv"),
        "BANCO\n,,\n,,\n,,\nFECHA,CUENTA,IMPORTE,NRO.OPERACION,REDONDEO\n",
    )
    .unwrap();

    let output = compile(dir.path(), &[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("empty batch"));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_compile_blank_password_fails() {
    let dir = fixture();
    fs::write(dir.path().join("credenciales.csv"), "Acceso,,\nUsuario,,jdoe\n").unwrap();

    let output = compile(dir.path(), &[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("credential error: password is empty"));
}

#[test]
fn test_compile_missing_sheet_fails() {
    let dir = fixture();
    fs::remove_file(dir.path().join("preregistro.csv")).unwrap();

    let output = compile(dir.path(), &[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("preregistro.csv"));
}

#[test]
fn test_usage_error_exit_code() {
    let output = Command::new(env!("CARGO_BIN_EXE_postplan-compile"))
        .arg("--no-such-flag")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}

// ============================================================================
// postplan-script
// ============================================================================

#[test]
fn test_script_to_file() {
    let dir = fixture();
    let out = dir.path().join("cobranzas.vbs");
    let output = run(
        env!("CARGO_BIN_EXE_postplan-script"),
        dir.path(),
        &["-o", out.to_str().unwrap()],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stderr(&output).contains("Wrote 50 steps"));

    let script = fs::read_to_string(&out).unwrap();
    assert!(script.contains("Set connection = application.Children(0)"));
    assert!(script.contains("InputBox(\"Password\")"));
    assert!(script.contains(".text = \"jdoe\""));
    assert!(script.contains(".text = \"FB05\""));
    assert!(script.trim_end().ends_with("session.findById(\"wnd[0]\").sendVKey 0"));
    assert!(!script.contains("s3cret"));
}

#[test]
fn test_script_failure_writes_nothing() {
    let dir = fixture();
    fs::write(dir.path().join("credenciales.csv"), "Acceso\n").unwrap();
    let out = dir.path().join("cobranzas.vbs");

    let output = run(
        env!("CARGO_BIN_EXE_postplan-script"),
        dir.path(),
        &["-o", out.to_str().unwrap()],
    );
    assert_eq!(output.status.code(), Some(1));
    assert!(!out.exists());
}

// ============================================================================
// postplan-split
// ============================================================================

#[test]
fn test_split_writes_subsets() {
    let dir = fixture();
    let output = run(env!("CARGO_BIN_EXE_postplan-split"), dir.path(), &[]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let factura = fs::read_to_string(dir.path().join("factura.csv")).unwrap();
    let pedido = fs::read_to_string(dir.path().join("pedido.csv")).unwrap();
    assert_eq!(
        factura,
        "Cliente,Factura,Número Pedido,Territorio,Importe Abonado\n900,INV-1,,12,400.00\n"
    );
    assert_eq!(
        pedido,
        "Cliente,Factura,Número Pedido,Territorio,Importe Abonado\n777,,3100001,12,100.00\n"
    );
}
