// SPDX-License-Identifier: MIT OR Apache-2.0
//! Fuzz HostErrorCode resolution and the version decoder.
//!
//! Verifies:
//! 1. Resolving arbitrary JSON values as codes never panics.
//! 2. Resolved codes agree with their Display and numeric forms.
//! 3. Version decoding never panics and valid versions re-pack exactly.
#![no_main]
use bpx_classify::HostVersion;
use bpx_error_schema::HostErrorCode;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let s = match std::str::from_utf8(data) {
        Ok(s) => s,
        Err(_) => return,
    };
    let value: serde_json::Value = match serde_json::from_str(s) {
        Ok(v) => v,
        Err(_) => serde_json::Value::String(s.to_string()),
    };

    // --- Property 1 & 2: code resolution ---
    if let Some(code) = HostErrorCode::from_value(&value) {
        assert_eq!(code.to_string(), code.as_u16().to_string());
        assert_eq!(HostErrorCode::from_u64(u64::from(code.as_u16())), Ok(code));
        let json = serde_json::to_string(&code).expect("HostErrorCode must serialize");
        let rt: HostErrorCode = serde_json::from_str(&json).expect("round-trip must succeed");
        assert_eq!(code, rt);
    }
    if let Ok(code) = s.parse::<HostErrorCode>() {
        assert_eq!(code.to_string(), s);
    }

    // --- Property 3: version decoding ---
    let version = HostVersion::from_raw(Some(&value));
    let text = version.to_string();
    match version.components() {
        Some((major, minor, patch)) => {
            assert_eq!(text, format!("{major}.{minor}.{patch}"));
            assert_eq!(HostVersion::from_components(major, minor, patch), Ok(version));
        }
        None => assert!(text.ends_with(" (invalid)")),
    }
});
