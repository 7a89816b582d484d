//! End-to-end tests driving the `hours` binary.
//!
//! Tests the full flow: select → log → overview → export → import.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

fn hours_binary() -> String {
    env!("CARGO_BIN_EXE_hours").to_string()
}

/// Runs `hours` isolated in `home`, storing data at `data_path`.
fn hours(home: &Path, data_path: &Path, args: &[&str]) -> Output {
    Command::new(hours_binary())
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env("XDG_DATA_HOME", home.join(".local/share"))
        .env("HOURS_DATA_PATH", data_path)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("failed to run hours")
}

fn stdout(output: &Output) -> String {
    assert!(
        output.status.success(),
        "hours should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn data_path(temp: &TempDir) -> PathBuf {
    temp.path().join("data/predigtdienst_data_v1.json")
}

#[test]
fn test_log_and_overview() {
    let temp = TempDir::new().unwrap();
    let data = data_path(&temp);

    let out = stdout(&hours(temp.path(), &data, &["select", "trolley"]));
    assert_eq!(out, "Selected Trolley.\n");

    let out = stdout(&hours(
        temp.path(),
        &data,
        &["log", "--hours", "1", "--quarters", "1", "--year", "2024", "--month", "9"],
    ));
    assert_eq!(out, "Saved 1.25 h (1 h 15 m) to Trolley for 2024-09-01.\n");

    let out = stdout(&hours(
        temp.path(),
        &data,
        &["log", "--ldc", "--quarters", "2", "--year", "2025", "--month", "8"],
    ));
    assert_eq!(out, "Saved 0.50 h (0 h 30 m) to LDC for 2025-08-01.\n");

    let out = stdout(&hours(
        temp.path(),
        &data,
        &["overview", "--year", "2024", "--month", "11", "--json"],
    ));
    let overview: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(overview["by_category"]["Trolley"], 1.25);
    assert_eq!(overview["in_service_year"]["general"], 1.25);
    assert_eq!(overview["in_service_year"]["ldc"], 0.5);
    assert_eq!(overview["in_service_year"]["total"], 1.75);
}

#[test]
fn test_zero_and_invalid_logs_write_nothing() {
    let temp = TempDir::new().unwrap();
    let data = data_path(&temp);

    let out = stdout(&hours(temp.path(), &data, &["log", "--year", "2024", "--month", "9"]));
    assert_eq!(out, "Nothing to save (0 h 0 m).\n");
    assert!(!data.exists());

    let output = hours(
        temp.path(),
        &data,
        &["log", "--hours", "2", "--year", "2024", "--month", "13"],
    );
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("month must be 1-12, got 13"));
    assert!(!data.exists());
}

#[test]
fn test_export_import_roundtrip() {
    let temp = TempDir::new().unwrap();
    let data = data_path(&temp);
    let export_path = temp.path().join("export.json");
    let export_arg = export_path.to_str().unwrap();

    stdout(&hours(
        temp.path(),
        &data,
        &["log", "--hours", "3", "--category", "port", "--year", "2023", "--month", "12"],
    ));
    stdout(&hours(
        temp.path(),
        &data,
        &["log", "--ldc", "--hours", "1", "--year", "2024", "--month", "1"],
    ));
    stdout(&hours(temp.path(), &data, &["export", "--output", export_arg]));

    let other = temp.path().join("other/data.json");
    let out = stdout(&hours(temp.path(), &other, &["import", export_arg]));
    assert_eq!(
        out,
        "Import successful: 1 entries, 1 LDC entries, selected Hafen.\n"
    );

    let original = std::fs::read_to_string(&data).unwrap();
    let imported = std::fs::read_to_string(&other).unwrap();
    assert_eq!(original, imported);
}

#[test]
fn test_corrupt_import_fails_and_keeps_data() {
    let temp = TempDir::new().unwrap();
    let data = data_path(&temp);
    stdout(&hours(
        temp.path(),
        &data,
        &["log", "--hours", "1", "--year", "2024", "--month", "10"],
    ));
    let before = std::fs::read_to_string(&data).unwrap();

    let bad = temp.path().join("bad.json");
    std::fs::write(&bad, "this is not json").unwrap();
    let output = hours(temp.path(), &data, &["import", bad.to_str().unwrap()]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("import failed"));
    assert_eq!(std::fs::read_to_string(&data).unwrap(), before);
}

#[test]
fn test_corrupt_store_falls_back_to_empty() {
    let temp = TempDir::new().unwrap();
    let data = data_path(&temp);
    std::fs::create_dir_all(data.parent().unwrap()).unwrap();
    std::fs::write(&data, r#"{"entries": "not-an-array"}"#).unwrap();

    let out = stdout(&hours(temp.path(), &data, &["status"]));
    assert!(out.contains("Stored data: ok\nEntries: 0\n"));

    std::fs::write(&data, "{{{").unwrap();
    let out = stdout(&hours(temp.path(), &data, &["overview", "--year", "2024", "--month", "9"]));
    assert!(out.contains("- Total: 0.00 h"));
}
