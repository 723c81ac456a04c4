// SPDX-License-Identifier: MIT OR Apache-2.0
//! Plain-text rendering for terminals and log files.

use crate::report::{ErrorReport, ParamRow};

const PARAM_HEADER: &str = "Parameter";
const VALUE_HEADER: &str = "Value";

/// Render a `Parameter  Value` table with aligned columns.
///
/// Returns an empty string for an empty table.
pub fn render_param_table(rows: &[ParamRow]) -> String {
    if rows.is_empty() {
        return String::new();
    }
    let name_w = rows
        .iter()
        .map(|r| r.name.chars().count())
        .chain(std::iter::once(PARAM_HEADER.len()))
        .max()
        .unwrap_or(PARAM_HEADER.len());
    let value_w = rows
        .iter()
        .map(|r| r.value.chars().count())
        .chain(std::iter::once(VALUE_HEADER.len()))
        .max()
        .unwrap_or(VALUE_HEADER.len());

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(format!("{PARAM_HEADER:<name_w$}  {VALUE_HEADER}"));
    lines.push(format!("{}  {}", "-".repeat(name_w), "-".repeat(value_w)));
    for r in rows {
        lines.push(format!("{:<name_w$}  {}", r.name, r.value));
    }
    lines.join("\n")
}

/// Detail lines: host version and generic description with code.
pub fn render_detail(report: &ErrorReport) -> Option<String> {
    report.detail.as_ref().map(|d| {
        format!(
            "Host version : {}\nGeneric error: {} ({})",
            d.version, d.generic_description, d.code
        )
    })
}

/// Full multi-line report. Sections are omitted when empty.
pub fn render_text(report: &ErrorReport) -> String {
    let mut sections = vec![format!("{}: {}", report.kind, report.summary)];
    if let Some(detail) = render_detail(report) {
        sections.push(detail);
    }
    if !report.params.is_empty() {
        sections.push(render_param_table(&report.params));
    }
    if !report.unexpected_params.is_empty() {
        sections.push(format!(
            "There were unexpected parameters:\n{}",
            render_param_table(&report.unexpected_params)
        ));
    }
    if let Some(ref raw) = report.raw_response {
        sections.push(format!("Raw response: {raw}"));
    }
    sections.join("\n")
}

/// Single-line summary.
pub fn render_compact(report: &ErrorReport) -> String {
    match report.detail {
        Some(ref d) => format!(
            "[{}] {} (code={} version={})",
            report.kind, report.summary, d.code, d.version
        ),
        None => format!("[{}] {}", report.kind, report.summary),
    }
}
