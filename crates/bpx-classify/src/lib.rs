// SPDX-License-Identifier: MIT OR Apache-2.0
//! Classification of native-host responses into structured popup errors.
//!
//! A host response is untrusted: its status may be wrong, its parameters
//! missing, its code unknown and its version malformed. [`classify`] accepts
//! any JSON object and always yields a [`HostError`]; anomalies are recorded
//! as fields (the invalid-response flag, the unexpected-parameter table, the
//! retained raw payload) instead of failing. Only input that is not an object
//! at all is rejected with a [`ShapeError`].
//!
//! ```
//! use bpx_classify::{classify, ParamValue};
//! use serde_json::json;
//!
//! let err = classify(json!({
//!     "status": "error",
//!     "code": 20,
//!     "params": {"action": "list", "storeId": "x"}
//! }))
//! .unwrap();
//! assert_eq!(err.generic_description(), "Invalid password store ID");
//! assert_eq!(err.param("storeId"), Some(&ParamValue::from("x")));
//! assert!(err.unexpected_params().is_empty());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod extension;
pub mod guard;
pub mod host;
pub mod params;
pub mod reply;
pub mod response;
pub mod version;

pub use bpx_error_schema::{HostErrorCode, UNKNOWN_CODE_DESCRIPTION};
pub use error::{PopupError, Reportable};
pub use extension::ExtensionError;
pub use guard::LogOnce;
pub use host::{HostError, INVALID_RESPONSE_MESSAGE, classify, classify_str};
pub use params::{ExpectedParams, NOT_AVAILABLE, ParamValue, display_value};
pub use reply::{ReplyError, expect_ok, settings_from_reply};
pub use response::{RawResponse, ShapeError, json_kind};
pub use version::{HostVersion, VersionError};
