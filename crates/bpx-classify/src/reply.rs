// SPDX-License-Identifier: MIT OR Apache-2.0
//! Interpretation of replies from the background script.
//!
//! Replies look like `{status: "ok" | ..., message?, settings?, files?}`. A
//! non-`"ok"` status is a local failure; host errors reach the popup embedded
//! in the settings reply under `hostError`.

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

use crate::error::PopupError;
use crate::extension::ExtensionError;
use crate::host::classify;
use crate::response::{ShapeError, expect_object};

/// Status of a successful reply.
pub const OK_STATUS: &str = "ok";

/// Message used when a failed reply carries no usable message.
pub const UNKNOWN_FAILURE_MESSAGE: &str = "Unknown error";

/// Message used when the settings reply lacks tab information.
pub const MISSING_TAB_MESSAGE: &str = "Unable to retrieve current tab information";

/// Why a reply could not be used.
#[derive(Debug, Error)]
pub enum ReplyError {
    /// The reply violates its basic shape.
    #[error(transparent)]
    Shape(#[from] ShapeError),

    /// The reply reports a failure.
    #[error(transparent)]
    Failed(#[from] PopupError),
}

impl From<ExtensionError> for ReplyError {
    fn from(e: ExtensionError) -> Self {
        Self::Failed(PopupError::Extension(e))
    }
}

/// Check that a reply succeeded and return its fields.
///
/// # Errors
///
/// [`ReplyError::Shape`] if `reply` is not an object;
/// [`ReplyError::Failed`] with an [`ExtensionError`] if `status` is not `"ok"`.
pub fn expect_ok(reply: &Value) -> Result<&Map<String, Value>, ReplyError> {
    let fields = expect_object(reply, "reply")?;
    if fields.get("status").and_then(Value::as_str) == Some(OK_STATUS) {
        return Ok(fields);
    }
    let message = fields
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or(UNKNOWN_FAILURE_MESSAGE);
    debug!(target: "bpx.reply", status = ?fields.get("status"), "background reply failed");
    Err(ExtensionError::new(message).into())
}

/// Extract the settings object from a `getSettings` reply.
///
/// # Errors
///
/// - [`ReplyError::Shape`] if the reply, its `settings`, or an embedded
///   `hostError` is not an object.
/// - [`ReplyError::Failed`] with the classified host error when settings carry
///   `hostError`, or an [`ExtensionError`] when the status is not `"ok"` or
///   the current tab (`host`) is unknown.
pub fn settings_from_reply(reply: &Value) -> Result<&Map<String, Value>, ReplyError> {
    let fields = expect_ok(reply)?;
    let settings = fields.get("settings").unwrap_or(&Value::Null);
    let settings = expect_object(settings, "reply.settings")?;

    if let Some(raw) = settings.get("hostError") {
        let host = classify(raw.clone())?;
        return Err(PopupError::Host(host).into());
    }
    if !settings.contains_key("host") {
        return Err(ExtensionError::new(MISSING_TAB_MESSAGE).into());
    }
    Ok(settings)
}
