// SPDX-License-Identifier: MIT OR Apache-2.0
//! Untrusted responses from the host or background script.

use serde_json::{Map, Value};
use thiserror::Error;

/// Status a host error response must carry.
pub const ERROR_STATUS: &str = "error";

/// The input itself violates the basic shape contract.
///
/// This is the only failure classification propagates; every other anomaly
/// is recorded on the classified error.
#[derive(Debug, Error)]
pub enum ShapeError {
    /// The text is not JSON at all.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A value that must be an object is something else.
    #[error("{context} must be a JSON object, got {found}")]
    NotAnObject {
        /// Which value was inspected.
        context: &'static str,
        /// JSON kind that was found instead.
        found: &'static str,
    },
}

/// JSON kind name used in diagnostics.
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

pub(crate) fn expect_object<'a>(
    value: &'a Value,
    context: &'static str,
) -> Result<&'a Map<String, Value>, ShapeError> {
    value.as_object().ok_or(ShapeError::NotAnObject {
        context,
        found: json_kind(value),
    })
}

/// Raw host response: `{status, version?, code?, params?}`.
///
/// Holds the object verbatim; fields are read lazily and nothing is
/// validated beyond the value being an object.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    value: Value,
}

impl RawResponse {
    /// Wrap a JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::NotAnObject`] if `value` is not an object.
    pub fn from_value(value: Value) -> Result<Self, ShapeError> {
        expect_object(&value, "response")?;
        Ok(Self { value })
    }

    /// Parse JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError`] if the text is not JSON or not an object.
    pub fn parse(text: &str) -> Result<Self, ShapeError> {
        Self::from_value(serde_json::from_str(text)?)
    }

    fn field(&self, name: &str) -> Option<&Value> {
        self.value.get(name)
    }

    /// Raw `status` field.
    pub fn status(&self) -> Option<&Value> {
        self.field("status")
    }

    /// Whether `status` is exactly the string `"error"`.
    pub fn is_error_status(&self) -> bool {
        self.status().and_then(Value::as_str) == Some(ERROR_STATUS)
    }

    /// Raw `version` field.
    pub fn version(&self) -> Option<&Value> {
        self.field("version")
    }

    /// Raw `code` field.
    pub fn code(&self) -> Option<&Value> {
        self.field("code")
    }

    /// Raw `params` field, whatever its type.
    pub fn raw_params(&self) -> Option<&Value> {
        self.field("params")
    }

    /// `params` when it is an object. Absent, `null` and non-object values
    /// all count as missing.
    pub fn params(&self) -> Option<&Map<String, Value>> {
        self.raw_params().and_then(Value::as_object)
    }

    /// The whole response as received.
    pub fn as_value(&self) -> &Value {
        &self.value
    }

    /// Unwrap into the original value.
    pub fn into_value(self) -> Value {
        self.value
    }
}

impl TryFrom<Value> for RawResponse {
    type Error = ShapeError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}
