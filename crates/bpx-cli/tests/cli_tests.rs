// SPDX-License-Identifier: MIT OR Apache-2.0
//! Integration tests for the `bpx` CLI binary.

use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::io::Write;

fn bpx() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("bpx").expect("binary `bpx` should be built");
    for var in [
        "RUST_LOG",
        "BPX_LOG_LEVEL",
        "BPX_LOG_FORMAT",
        "BPX_OUTPUT",
        "BPX_SHOW_RAW_RESPONSE",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

const STORE_ID_ERROR: &str =
    r#"{"status":"error","version":3000001,"code":20,"params":{"action":"list","storeId":"x"}}"#;
const UNKNOWN_CODE_ERROR: &str = r#"{"status":"error","code":999,"params":{"foo":"bar"}}"#;

fn write_temp(contents: &str) -> tempfile::NamedTempFile {
    let mut f = tempfile::NamedTempFile::new().expect("temp file");
    f.write_all(contents.as_bytes()).expect("write temp file");
    f
}

// ── Help & version ──────────────────────────────────────────────────

#[test]
fn help_flag_prints_usage() {
    bpx()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("Browser extension error classifier"))
        .stdout(contains("classify"))
        .stdout(contains("codes"));
}

#[test]
fn version_flag_prints_version() {
    bpx()
        .arg("--version")
        .assert()
        .success()
        .stdout(contains(env!("CARGO_PKG_VERSION")));
}

// ── classify ────────────────────────────────────────────────────────

#[test]
fn classify_from_stdin() {
    bpx()
        .arg("classify")
        .write_stdin(STORE_ID_ERROR)
        .assert()
        .success()
        .stdout(contains("HostError: Invalid password store ID"))
        .stdout(contains("Host version : 3.0.1"))
        .stdout(contains("storeId    x"));
}

#[test]
fn classify_from_file_as_json() {
    let f = write_temp(UNKNOWN_CODE_ERROR);
    let out = bpx()
        .args(["classify", "--format", "json"])
        .arg(f.path())
        .output()
        .expect("run bpx");
    assert!(out.status.success());
    let report: serde_json::Value = serde_json::from_slice(&out.stdout).expect("json report");
    assert_eq!(report["kind"], "HostError");
    assert_eq!(report["summary"], "Unknown error code");
    assert_eq!(report["detail"]["generic_description"], "Unknown error code");
    assert_eq!(report["unexpected_params"][0]["name"], "foo");
    assert_eq!(report["raw_response"]["code"], 999);
}

#[test]
fn classify_no_raw_hides_payload() {
    bpx()
        .args(["classify", "--no-raw"])
        .write_stdin(UNKNOWN_CODE_ERROR)
        .assert()
        .success()
        .stdout(contains("There were unexpected parameters:"))
        .stdout(contains("Raw response").not());
}

#[test]
fn classify_html() {
    bpx()
        .args(["classify", "--format", "html"])
        .write_stdin(STORE_ID_ERROR)
        .assert()
        .success()
        .stdout(contains(r#"<p class="message">Invalid password store ID</p>"#));
}

#[test]
fn classify_malformed_response_still_succeeds() {
    bpx()
        .args(["classify", "--format", "compact"])
        .write_stdin(r#"{"status":"ok","code":20}"#)
        .assert()
        .success()
        .stdout(contains("[HostError] Invalid error response"));
}

#[test]
fn classify_rejects_non_object() {
    bpx()
        .arg("classify")
        .write_stdin("[]")
        .assert()
        .failure()
        .stderr(contains("must be a JSON object"));
}

#[test]
fn classify_rejects_unknown_format() {
    bpx()
        .args(["classify", "--format", "yaml"])
        .write_stdin(STORE_ID_ERROR)
        .assert()
        .failure()
        .stderr(contains("invalid output 'yaml'"));
}

#[test]
fn classify_with_log_writes_stderr() {
    bpx()
        .args(["classify", "--format", "compact", "--log"])
        .write_stdin(STORE_ID_ERROR)
        .assert()
        .success()
        .stdout(contains("[HostError] Invalid password store ID (code=20 version=3.0.1)"))
        .stderr(contains("bpx.host_error"));
}

#[test]
fn config_file_sets_output() {
    let cfg = write_temp("output = \"compact\"\n");
    bpx()
        .arg("--config")
        .arg(cfg.path())
        .arg("classify")
        .write_stdin(STORE_ID_ERROR)
        .assert()
        .success()
        .stdout(contains("[HostError]"));
}

#[test]
fn env_overrides_output() {
    bpx()
        .env("BPX_OUTPUT", "compact")
        .arg("classify")
        .write_stdin(STORE_ID_ERROR)
        .assert()
        .success()
        .stdout(contains("[HostError]"));
}

// ── reply ───────────────────────────────────────────────────────────

#[test]
fn reply_with_settings_succeeds() {
    bpx()
        .arg("reply")
        .write_stdin(r#"{"status":"ok","settings":{"host":"example.com"}}"#)
        .assert()
        .success()
        .stdout(contains("\"host\": \"example.com\""));
}

#[test]
fn reply_with_failure_exits_two() {
    bpx()
        .arg("reply")
        .write_stdin(r#"{"status":"error","message":"native host disconnected"}"#)
        .assert()
        .code(2)
        .stdout(contains("ExtensionError: native host disconnected"));
}

#[test]
fn reply_without_tab() {
    bpx()
        .arg("reply")
        .write_stdin(r#"{"status":"ok","settings":{}}"#)
        .assert()
        .code(2)
        .stdout(contains("Unable to retrieve current tab information"));
}

// ── codes, version, notice ──────────────────────────────────────────

#[test]
fn codes_lists_table() {
    bpx()
        .arg("codes")
        .assert()
        .success()
        .stdout(contains("CODE"))
        .stdout(contains("Unable to decrypt the password file"))
        .stdout(contains("gpgPath"));
}

#[test]
fn codes_json_has_fifteen_entries() {
    let out = bpx().args(["codes", "--json"]).output().expect("run bpx");
    assert!(out.status.success());
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v.as_array().unwrap().len(), 15);
}

#[test]
fn version_decodes_and_packs() {
    bpx()
        .args(["version", "1002003"])
        .assert()
        .success()
        .stdout("1.2.3\n");
    bpx()
        .args(["version", "bogus"])
        .assert()
        .success()
        .stdout("\"bogus\" (invalid)\n");
    bpx()
        .args(["version", "--pack", "3.0.1"])
        .assert()
        .success()
        .stdout("3000001\n");
}

#[test]
fn notice_for_action() {
    bpx()
        .args(["notice", "copyPassword"])
        .assert()
        .success()
        .stdout("Copying password to clipboard...\n");
}

// ── config ──────────────────────────────────────────────────────────

#[test]
fn check_config_ok() {
    let cfg = write_temp("log_level = \"debug\"\n");
    bpx()
        .arg("--config")
        .arg(cfg.path())
        .arg("check-config")
        .assert()
        .success()
        .stdout("ok\n");
}

#[test]
fn check_config_reports_errors() {
    let cfg = write_temp("log_level = \"loud\"\nmax_param_width = 2\n");
    bpx()
        .arg("--config")
        .arg(cfg.path())
        .arg("check-config")
        .assert()
        .failure()
        .stdout(contains("error: invalid log_level 'loud'"))
        .stdout(contains("error: max_param_width 2 out of range"));
}

#[test]
fn schema_prints_json() {
    let out = bpx().arg("schema").output().expect("run bpx");
    assert!(out.status.success());
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert!(v["properties"]["output"].is_object());
}
