// SPDX-License-Identifier: MIT OR Apache-2.0
//! Reporting through `tracing`, at most once per error instance.

use bpx_classify::{PopupError, Reportable};
use tracing::error;

use crate::format::{OutputFormat, render};
use crate::report::{ErrorReport, ReportOptions};
use crate::text::{render_detail, render_param_table};

/// Destination for rendered reports.
pub trait ErrorSink {
    /// Receive one report. Called at most once per error instance.
    fn emit(&mut self, report: &ErrorReport);
}

/// Report `error` to `sink` unless it was already reported.
///
/// Returns `true` if the sink received the report.
pub fn present(error: &PopupError, options: &ReportOptions, sink: &mut dyn ErrorSink) -> bool {
    if !error.mark_logged() {
        return false;
    }
    sink.emit(&ErrorReport::new(error, options));
    true
}

/// Emits each report as `tracing` error events.
///
/// Host errors go to target `bpx.host_error`, local errors to
/// `bpx.extension_error`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl ErrorSink for TracingSink {
    fn emit(&mut self, report: &ErrorReport) {
        if report.detail.is_none() {
            error!(target: "bpx.extension_error", kind = report.kind, "{}", report.summary);
            return;
        }

        error!(target: "bpx.host_error", kind = report.kind, "{}", report.summary);
        if let (Some(detail), Some(d)) = (render_detail(report), report.detail.as_ref()) {
            error!(
                target: "bpx.host_error",
                code = %d.code,
                version = %d.version,
                "{detail}"
            );
        }
        if !report.params.is_empty() {
            error!(target: "bpx.host_error", "{}", render_param_table(&report.params));
        }
        if !report.unexpected_params.is_empty() {
            error!(
                target: "bpx.host_error",
                "There were unexpected parameters:\n{}",
                render_param_table(&report.unexpected_params)
            );
        }
        if let Some(ref raw) = report.raw_response {
            error!(target: "bpx.host_error", raw_response = %raw, "Raw response");
        }
    }
}

/// Collects rendered reports in memory.
#[derive(Debug, Clone, Default)]
pub struct RenderSink {
    format: OutputFormat,
    rendered: Vec<String>,
}

impl RenderSink {
    /// A sink rendering in `format`.
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            rendered: Vec::new(),
        }
    }

    /// Everything rendered so far.
    pub fn rendered(&self) -> &[String] {
        &self.rendered
    }

    /// Take the rendered reports.
    pub fn into_rendered(self) -> Vec<String> {
        self.rendered
    }
}

impl ErrorSink for RenderSink {
    fn emit(&mut self, report: &ErrorReport) {
        self.rendered.push(render(report, self.format));
    }
}

/// Log a popup error through `tracing`, once per instance.
pub fn log_error(error: &PopupError, options: &ReportOptions) -> bool {
    present(error, options, &mut TracingSink)
}

/// Log an error that was never classified. No at-most-once guard applies.
pub fn log_foreign(error: &(dyn std::error::Error + 'static)) {
    error!(target: "bpx.foreign_error", error = %error, "unclassified error");
}
