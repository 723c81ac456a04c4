// SPDX-License-Identifier: MIT OR Apache-2.0
//! Classified host errors.

use bpx_error_schema::{HostErrorCode, UNKNOWN_CODE_DESCRIPTION, param};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::guard::LogOnce;
use crate::params::{ExpectedParams, ParamValue, display_value};
use crate::response::{RawResponse, ShapeError};
use crate::version::HostVersion;

/// Summary used when the response is not a well-formed error response.
pub const INVALID_RESPONSE_MESSAGE: &str = "Invalid error response";

/// An error reported by the native host, classified against the code table.
///
/// Built once from a [`RawResponse`] and immutable afterwards, apart from the
/// one-shot logged flag.
#[derive(Debug, Clone, Serialize, thiserror::Error)]
#[error("{message}")]
#[serde(rename_all = "camelCase")]
pub struct HostError {
    message: String,
    response_invalid: bool,
    version: HostVersion,
    code: Option<Value>,
    known_code: Option<HostErrorCode>,
    generic_description: &'static str,
    params: ExpectedParams,
    unexpected_params: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    raw_response: Option<Value>,
    #[serde(skip)]
    pub(crate) logged: LogOnce,
}

impl HostError {
    /// Classify a response. Never fails: every anomaly becomes data on the
    /// returned error.
    pub fn from_response(response: RawResponse) -> Self {
        let well_formed = response.is_error_status() && response.params().is_some();
        let version = HostVersion::from_raw(response.version());
        let code = response.code().cloned();
        let known_code = code.as_ref().and_then(HostErrorCode::from_value);

        let empty = Map::new();
        let raw_params = response.params().unwrap_or(&empty);

        let mut retain = !well_formed;
        let (generic_description, params, unexpected_params) = match known_code {
            Some(known) => {
                let schema = known.schema();
                let mut params = ExpectedParams::seeded(&schema);
                let mut unexpected = Map::new();
                for (name, value) in raw_params {
                    if !params.fill(name, value.clone()) {
                        unexpected.insert(name.clone(), value.clone());
                    }
                }
                if !unexpected.is_empty() {
                    let names: Vec<&String> = unexpected.keys().collect();
                    debug!(
                        target: "bpx.classify",
                        code = known.as_u16(),
                        unexpected = ?names,
                        "host error carries undocumented parameters"
                    );
                    retain = true;
                }
                (schema.description, params, unexpected)
            }
            None => {
                debug!(target: "bpx.classify", code = ?code, "unknown host error code");
                retain = true;
                (UNKNOWN_CODE_DESCRIPTION, ExpectedParams::default(), raw_params.clone())
            }
        };

        let message = if well_formed {
            match raw_params.get(param::MESSAGE) {
                Some(Value::Null) | None => generic_description.to_string(),
                Some(Value::String(s)) if s.is_empty() => generic_description.to_string(),
                Some(v) => display_value(v),
            }
        } else {
            debug!(
                target: "bpx.classify",
                status = ?response.status(),
                has_params = response.params().is_some(),
                "malformed host error response"
            );
            INVALID_RESPONSE_MESSAGE.to_string()
        };

        Self {
            message,
            response_invalid: !well_formed,
            version,
            code,
            known_code,
            generic_description,
            params,
            unexpected_params,
            raw_response: retain.then(|| response.into_value()),
            logged: LogOnce::new(),
        }
    }

    /// One-line summary.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether the response had the wrong status or no usable `params`.
    pub fn is_response_invalid(&self) -> bool {
        self.response_invalid
    }

    /// Decoded host version.
    pub fn version(&self) -> &HostVersion {
        &self.version
    }

    /// `"major.minor.patch"`, or the raw value marked `(invalid)`.
    pub fn version_string(&self) -> String {
        self.version.version_string()
    }

    /// Raw `code` field as sent.
    pub fn code(&self) -> Option<&Value> {
        self.code.as_ref()
    }

    /// Raw code rendered for display; `<missing>` when absent.
    pub fn code_string(&self) -> String {
        self.code
            .as_ref()
            .map(display_value)
            .unwrap_or_else(|| "<missing>".to_string())
    }

    /// The code resolved against the table, if known.
    pub fn known_code(&self) -> Option<HostErrorCode> {
        self.known_code
    }

    /// Schema description, or [`UNKNOWN_CODE_DESCRIPTION`].
    pub fn generic_description(&self) -> &'static str {
        self.generic_description
    }

    /// Documented parameters with resolved values.
    pub fn params(&self) -> &ExpectedParams {
        &self.params
    }

    /// Shorthand for `self.params().get(name)`.
    pub fn param(&self, name: &str) -> Option<&ParamValue> {
        self.params.get(name)
    }

    /// Parameters outside the schema; the whole raw mapping for unknown codes.
    pub fn unexpected_params(&self) -> &Map<String, Value> {
        &self.unexpected_params
    }

    /// The response as received, kept only for diagnostics.
    pub fn raw_response(&self) -> Option<&Value> {
        self.raw_response.as_ref()
    }
}

/// Classify a JSON value as a host error.
///
/// # Errors
///
/// Returns [`ShapeError::NotAnObject`] if `raw` is not a JSON object.
pub fn classify(raw: Value) -> Result<HostError, ShapeError> {
    Ok(HostError::from_response(RawResponse::from_value(raw)?))
}

/// Classify JSON text as a host error.
///
/// # Errors
///
/// Returns [`ShapeError`] if the text is not a JSON object.
pub fn classify_str(text: &str) -> Result<HostError, ShapeError> {
    Ok(HostError::from_response(RawResponse::parse(text)?))
}
