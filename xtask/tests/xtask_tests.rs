// SPDX-License-Identifier: MIT OR Apache-2.0
//! Integration tests for xtask subcommands.

use assert_cmd::Command;
use predicates::prelude::*;

#[allow(deprecated)] // cargo_bin works fine; the replacement macro is unstable
fn xtask() -> Command {
    Command::cargo_bin("xtask").unwrap()
}

#[test]
fn help_lists_subcommands() {
    xtask()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("schema"))
        .stdout(predicate::str::contains("catalog"));
}

#[test]
fn schema_writes_both_files() {
    let dir = tempfile::tempdir().unwrap();
    xtask()
        .arg("schema")
        .arg("--out-dir")
        .arg(dir.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("wrote schemas"));

    for name in ["presenter_config.schema.json", "catalog_entry.schema.json"] {
        let content = std::fs::read_to_string(dir.path().join(name)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert!(value.get("properties").is_some(), "{name} has no properties");
    }
}

#[test]
fn catalog_writes_every_code() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("nested").join("codes.json");
    xtask()
        .arg("catalog")
        .arg("--out")
        .arg(&out)
        .assert()
        .success()
        .stderr(predicate::str::contains("wrote 15 codes"));

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    let entries = value.as_array().unwrap();
    assert_eq!(entries.len(), 15);
    assert_eq!(entries[10]["code"], 20);
    assert_eq!(entries[10]["category"], "store");
    assert_eq!(
        entries[10]["expected_params"],
        serde_json::json!(["action", "storeId"])
    );
}
