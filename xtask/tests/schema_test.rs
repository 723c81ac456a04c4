// SPDX-License-Identifier: MIT OR Apache-2.0
//! The committed code catalog must match the compiled-in table.

use std::path::Path;

#[test]
fn committed_catalog_is_current() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("xtask should be in repo root")
        .join("contracts/error_codes.json");
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("read {}: {e}", path.display()));
    let committed: serde_json::Value = serde_json::from_str(&content).unwrap();
    let current = serde_json::to_value(bpx_error_schema::catalog()).unwrap();
    assert_eq!(
        committed, current,
        "contracts/error_codes.json is stale; run `cargo run -p xtask -- catalog`"
    );
}
