// SPDX-License-Identifier: MIT OR Apache-2.0
//! Fuzz host response classification and rendering.
//!
//! Verifies:
//! 1. Classifying arbitrary text never panics; only non-objects are rejected.
//! 2. Every classified error has a non-empty summary.
//! 3. Unknown codes copy all params; known codes partition them.
//! 4. Every renderer accepts every classified error.
#![no_main]
use bpx_classify::{PopupError, Reportable, classify_str};
use bpx_present::{ErrorReport, OutputFormat, ReportOptions, render};
use libfuzzer_sys::fuzz_target;

const FORMATS: &[OutputFormat] = &[
    OutputFormat::Text,
    OutputFormat::Compact,
    OutputFormat::Json,
    OutputFormat::JsonPretty,
    OutputFormat::Html,
];

fuzz_target!(|data: &[u8]| {
    let s = match std::str::from_utf8(data) {
        Ok(s) => s,
        Err(_) => return,
    };

    // --- Property 1: totality over JSON objects ---
    let is_object = matches!(
        serde_json::from_str::<serde_json::Value>(s),
        Ok(serde_json::Value::Object(_))
    );
    let host = match classify_str(s) {
        Ok(h) => h,
        Err(_) => {
            assert!(!is_object, "objects must always classify");
            return;
        }
    };

    // --- Property 2: summary always present ---
    assert!(!host.summary().is_empty());

    // --- Property 3: params partition ---
    match host.known_code() {
        Some(code) => {
            assert_eq!(host.params().len(), code.expected_params().len());
            for name in host.unexpected_params().keys() {
                assert!(!code.schema().expects(name));
            }
            if !host.unexpected_params().is_empty() {
                assert!(host.raw_response().is_some());
            }
        }
        None => {
            assert!(host.params().is_empty());
            assert!(host.raw_response().is_some());
        }
    }
    if host.is_response_invalid() {
        assert!(host.raw_response().is_some());
    }

    // --- Property 4: rendering never panics ---
    let err = PopupError::from(host);
    let report = ErrorReport::new(&err, &ReportOptions::default());
    for format in FORMATS {
        let _ = render(&report, *format);
    }
    assert!(err.mark_logged());
    assert!(!err.mark_logged());
});
