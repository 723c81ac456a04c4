// SPDX-License-Identifier: MIT OR Apache-2.0
//! Status line shown while the popup waits on, or fails, an action.

use bpx_classify::{PopupError, Reportable};

use crate::html::{escape_html, render_html};
use crate::report::{ErrorReport, ReportOptions};

/// What the popup shows in place of its list.
#[derive(Debug, Clone, Copy)]
pub enum Status<'a> {
    /// Progress notice.
    Notice(&'a str),
    /// A failure.
    Error(&'a PopupError),
}

/// Notice shown while the background script performs `action`.
pub fn notice_for_action(action: &str) -> &'static str {
    match action {
        "fill" => "Filling login details...",
        "launch" => "Launching URL...",
        "launchInNewTab" => "Launching URL in a new tab...",
        "copyPassword" => "Copying password to clipboard...",
        "copyUsername" => "Copying username to clipboard...",
        _ => "Please wait...",
    }
}

/// Render a status as the popup's single `part` element.
///
/// Host errors use their full HTML fragment; local errors show
/// `ExtensionError: <message>`.
pub fn render_status_html(status: Status<'_>, options: &ReportOptions) -> String {
    match status {
        Status::Notice(text) => {
            format!(r#"<div class="part notice">{}</div>"#, escape_html(text))
        }
        Status::Error(err @ PopupError::Host(_)) => {
            let report = ErrorReport::new(err, options);
            format!(r#"<div class="part error">{}</div>"#, render_html(&report))
        }
        Status::Error(err) => format!(
            r#"<div class="part error">{}</div>"#,
            escape_html(&format!("{}: {}", err.kind(), err.summary()))
        ),
    }
}
