// SPDX-License-Identifier: MIT OR Apache-2.0
//! End-to-end flows across classification, configuration and presentation.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use bpx::classify::{ReplyError, settings_from_reply};
use bpx::config::{VALID_OUTPUTS, parse_toml};
use bpx::present::{ErrorSink, RenderSink, Status, present, render, render_status_html};
use bpx::{
    ErrorReport, OutputFormat, PopupError, ReportOptions, Reportable, classify_host_error,
    report_options,
};
use serde_json::json;

fn settings_reply_with(host_error: serde_json::Value) -> serde_json::Value {
    json!({"status": "ok", "settings": {"host": "example.com", "hostError": host_error}})
}

#[test]
fn settings_reply_to_html_status() {
    let reply = settings_reply_with(json!({
        "status": "error",
        "version": 3000000,
        "code": 24,
        "params": {
            "message": "Unable to decrypt github.com/alice.gpg",
            "action": "fetch",
            "error": "gpg: decryption failed: No secret key",
            "storeId": "default",
            "storePath": "~/.password-store",
            "storeName": "My passwords",
            "file": "github.com/alice.gpg"
        }
    }));
    let err = match settings_from_reply(&reply) {
        Err(ReplyError::Failed(err)) => err,
        other => panic!("expected a failure, got {other:?}"),
    };
    let html = render_status_html(Status::Error(&err), &ReportOptions::default());
    assert!(html.starts_with(r#"<div class="part error"><p class="message">Unable to decrypt github.com/alice.gpg</p>"#));
    assert!(html.contains("<dd>3.0.0</dd>"));
    assert!(html.contains("<tr><td>storeName</td><td>My passwords</td></tr>"));
    // `message` is not a documented parameter.
    assert!(html.contains(r#"<table class="unexpected-params">"#));
    assert!(html.contains(r#"<pre class="raw-response">"#));
    assert!(html.ends_with("</pre></div>"));
    // Rendering does not count as reporting.
    assert!(!err.already_logged());
}

#[test]
fn config_controls_report_options() {
    let cfg = parse_toml("show_raw_response = false\nmax_param_width = 12").unwrap();
    let options = report_options(&cfg);
    let err: PopupError = classify_host_error(json!({
        "status": "error",
        "code": 999,
        "params": {"path": "/a/very/long/path/to/something"}
    }))
    .unwrap()
    .into();
    let report = ErrorReport::new(&err, &options);
    assert!(report.raw_response.is_none());
    assert_eq!(report.unexpected_params[0].value, "/a/very/l...");
}

#[test]
fn config_output_names_parse_as_formats() {
    for name in VALID_OUTPUTS {
        let format: OutputFormat = name.parse().unwrap();
        assert_eq!(format.to_string(), *name);
    }
    assert_eq!(VALID_OUTPUTS, OutputFormat::NAMES);
}

#[test]
fn json_report_snapshot() {
    let err: PopupError = classify_host_error(json!({
        "status": "error",
        "version": 2001000,
        "code": 12,
        "params": {"action": "dance"}
    }))
    .unwrap()
    .into();
    let report = ErrorReport::new(&err, &ReportOptions::default());
    insta::assert_snapshot!(render(&report, OutputFormat::JsonPretty), @r#"
    {
      "kind": "HostError",
      "summary": "Invalid request action",
      "detail": {
        "generic_description": "Invalid request action",
        "code": "12",
        "version": "2.1.0"
      },
      "params": [
        {
          "name": "action",
          "value": "dance"
        }
      ],
      "unexpected_params": []
    }
    "#);
}

#[derive(Default)]
struct CountingSink(usize);

impl ErrorSink for CountingSink {
    fn emit(&mut self, _report: &ErrorReport) {
        self.0 += 1;
    }
}

#[test]
fn custom_sink_sees_each_error_once() {
    let errors: Vec<PopupError> = vec![
        classify_host_error(json!({"status": "error", "code": 10, "params": {}}))
            .unwrap()
            .into(),
        bpx::ExtensionError::new("Unable to retrieve current tab information").into(),
    ];
    let mut sink = CountingSink::default();
    for _ in 0..3 {
        for e in &errors {
            present(e, &ReportOptions::default(), &mut sink);
        }
    }
    assert_eq!(sink.0, 2);
}

#[test]
fn concurrent_reporting_emits_once() {
    let err = Arc::new(PopupError::from(
        classify_host_error(json!({"status": "error", "code": 18, "params": {}})).unwrap(),
    ));
    let emitted = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let err = Arc::clone(&err);
            let emitted = Arc::clone(&emitted);
            thread::spawn(move || {
                let mut sink = RenderSink::new(OutputFormat::Compact);
                if present(&err, &ReportOptions::default(), &mut sink) {
                    emitted.fetch_add(1, Ordering::SeqCst);
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }
    assert_eq!(emitted.load(Ordering::SeqCst), 1);
}

#[test]
fn cloned_error_keeps_logged_state() {
    let err = PopupError::from(bpx::ExtensionError::new("offline"));
    assert!(err.mark_logged());
    let copy = err.clone();
    assert!(copy.already_logged());
    assert!(!copy.mark_logged());
}
