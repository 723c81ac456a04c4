// SPDX-License-Identifier: MIT OR Apache-2.0
//! HTML fragments for the popup.
//!
//! Output is a fragment to append into an existing container; all text is
//! escaped. Layout and styling belong to the page.

use std::fmt::Write;

use crate::report::{ErrorReport, ParamRow};

/// Escape text for use in element content and quoted attributes.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn push_table(out: &mut String, class: &str, rows: &[ParamRow]) {
    let _ = write!(
        out,
        r#"<table class="{class}"><tr><th>Parameter</th><th>Value</th></tr>"#
    );
    for r in rows {
        let _ = write!(
            out,
            "<tr><td>{}</td><td>{}</td></tr>",
            escape_html(&r.name),
            escape_html(&r.value)
        );
    }
    out.push_str("</table>");
}

/// Render `report` as an HTML fragment. Sections are omitted when empty.
pub fn render_html(report: &ErrorReport) -> String {
    let mut out = String::new();
    let _ = write!(out, r#"<p class="message">{}</p>"#, escape_html(&report.summary));

    if let Some(ref d) = report.detail {
        let _ = write!(
            out,
            r#"<dl class="detail"><dt>Host version</dt><dd>{}</dd><dt>Generic error</dt><dd>{} ({})</dd></dl>"#,
            escape_html(&d.version),
            escape_html(&d.generic_description),
            escape_html(&d.code)
        );
    }
    if !report.params.is_empty() {
        push_table(&mut out, "params", &report.params);
    }
    if !report.unexpected_params.is_empty() {
        out.push_str("<p>There were unexpected parameters:</p>");
        push_table(&mut out, "unexpected-params", &report.unexpected_params);
    }
    if let Some(ref raw) = report.raw_response {
        let pretty = serde_json::to_string_pretty(raw).unwrap_or_else(|_| raw.to_string());
        let _ = write!(out, r#"<pre class="raw-response">{}</pre>"#, escape_html(&pretty));
    }
    out
}
