// SPDX-License-Identifier: MIT OR Apache-2.0
//! Rendering of classified popup errors.
//!
//! [`ErrorReport`] is the renderer-neutral view of a
//! [`PopupError`](bpx_classify::PopupError): a summary that is always
//! present, plus a detail block, parameter tables and the raw payload, each
//! only when non-empty. Renderers turn it into text, JSON or an HTML
//! fragment; [`present`] and [`log_error`] deliver it to a sink at most once
//! per error instance.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod console;
pub mod format;
pub mod html;
pub mod report;
pub mod status;
pub mod text;

pub use console::{ErrorSink, RenderSink, TracingSink, log_error, log_foreign, present};
pub use format::{OutputFormat, render};
pub use html::{escape_html, render_html};
pub use report::{ErrorReport, ParamRow, ReportDetail, ReportOptions};
pub use status::{Status, notice_for_action, render_status_html};
pub use text::{render_compact, render_param_table, render_text};
