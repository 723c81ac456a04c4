// SPDX-License-Identifier: MIT OR Apache-2.0
//! Host-error classification and presentation for a password-store browser
//! extension popup.
//!
//! This facade re-exports the workspace crates:
//!
//! - [`schema`]: the compiled-in table of host error codes.
//! - [`classify`]: turning untrusted host responses and background replies
//!   into [`PopupError`]s.
//! - [`present`]: rendering and at-most-once logging.
//! - [`config`]: presenter settings.
//!
//! ```
//! use bpx::{PopupError, ReportOptions, classify_host_error, log_error};
//! use serde_json::json;
//!
//! let err: PopupError = classify_host_error(json!({
//!     "status": "error",
//!     "code": 999,
//!     "params": {"foo": "bar"}
//! }))
//! .unwrap()
//! .into();
//! assert!(log_error(&err, &ReportOptions::default()));
//! assert!(!log_error(&err, &ReportOptions::default()));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub use bpx_classify as classify;
pub use bpx_config as config;
pub use bpx_error_schema as schema;
pub use bpx_present as present;

pub use bpx_classify::{
    ExtensionError, HostError, HostVersion, PopupError, Reportable, ShapeError,
    classify as classify_host_error,
};
pub use bpx_error_schema::HostErrorCode;
pub use bpx_present::{ErrorReport, OutputFormat, ReportOptions, log_error, log_foreign};

/// Renderer options taken from a presenter config.
pub fn report_options(config: &bpx_config::PresenterConfig) -> ReportOptions {
    ReportOptions {
        show_raw_response: config.effective_show_raw_response(),
        max_param_width: config.max_param_width,
    }
}
