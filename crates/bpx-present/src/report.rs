// SPDX-License-Identifier: MIT OR Apache-2.0
//! Renderer-neutral view of a classified error.

use bpx_classify::{HostError, PopupError, Reportable, display_value};
use serde::Serialize;
use serde_json::Value;

/// Knobs shared by every renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    /// Include the retained raw payload.
    pub show_raw_response: bool,
    /// Clamp rendered parameter values to this many characters.
    pub max_param_width: Option<usize>,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            show_raw_response: true,
            max_param_width: None,
        }
    }
}

/// Code-level detail block of a host error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportDetail {
    /// Generic description from the code table.
    pub generic_description: String,
    /// Raw code as displayed.
    pub code: String,
    /// Host version text.
    pub version: String,
}

/// One `Parameter | Value` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParamRow {
    /// Parameter name.
    pub name: String,
    /// Rendered value.
    pub value: String,
}

/// Everything a renderer needs, with optional sections already decided.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorReport {
    /// `"HostError"` or `"ExtensionError"`.
    pub kind: &'static str,
    /// One-line summary; always present.
    pub summary: String,
    /// Detail block; host errors only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<ReportDetail>,
    /// Documented parameters in schema order.
    pub params: Vec<ParamRow>,
    /// Undocumented parameters.
    pub unexpected_params: Vec<ParamRow>,
    /// Raw payload, when retained and enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<Value>,
}

impl ErrorReport {
    /// Build the view of `error`.
    pub fn new(error: &PopupError, options: &ReportOptions) -> Self {
        match error {
            PopupError::Host(host) => Self::for_host(host, options),
            PopupError::Extension(ext) => Self {
                kind: error.kind(),
                summary: ext.summary().to_string(),
                detail: None,
                params: Vec::new(),
                unexpected_params: Vec::new(),
                raw_response: None,
            },
        }
    }

    fn for_host(host: &HostError, options: &ReportOptions) -> Self {
        let clamp = |s: String| clamp_width(s, options.max_param_width);
        Self {
            kind: "HostError",
            summary: host.message().to_string(),
            detail: Some(ReportDetail {
                generic_description: host.generic_description().to_string(),
                code: host.code_string(),
                version: host.version_string(),
            }),
            params: host
                .params()
                .iter()
                .map(|(name, value)| ParamRow {
                    name: name.to_string(),
                    value: clamp(value.to_string()),
                })
                .collect(),
            unexpected_params: host
                .unexpected_params()
                .iter()
                .map(|(name, value)| ParamRow {
                    name: name.clone(),
                    value: clamp(display_value(value)),
                })
                .collect(),
            raw_response: if options.show_raw_response {
                host.raw_response().cloned()
            } else {
                None
            },
        }
    }
}

/// Truncate to `max` characters, marking the cut with `...`.
pub fn clamp_width(s: String, max: Option<usize>) -> String {
    match max {
        Some(max) if s.chars().count() > max => {
            let keep = max.saturating_sub(3);
            let mut out: String = s.chars().take(keep).collect();
            out.push_str("...");
            out
        }
        _ => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bpx_classify::{ExtensionError, classify};
    use serde_json::json;

    fn host_report(raw: Value, options: ReportOptions) -> ErrorReport {
        let err: PopupError = classify(raw).unwrap().into();
        ErrorReport::new(&err, &options)
    }

    #[test]
    fn host_report_sections() {
        let report = host_report(
            json!({"status": "error", "version": 3000001, "code": 20, "params": {"action": "list", "storeId": "x"}}),
            ReportOptions::default(),
        );
        assert_eq!(report.kind, "HostError");
        assert_eq!(report.summary, "Invalid password store ID");
        let detail = report.detail.unwrap();
        assert_eq!(detail.code, "20");
        assert_eq!(detail.version, "3.0.1");
        assert_eq!(report.params.len(), 2);
        assert!(report.unexpected_params.is_empty());
        assert!(report.raw_response.is_none());
    }

    #[test]
    fn raw_response_can_be_hidden() {
        let raw = json!({"status": "error", "code": 999, "params": {"foo": "bar"}});
        let shown = host_report(raw.clone(), ReportOptions::default());
        assert_eq!(shown.raw_response, Some(raw.clone()));
        let hidden = host_report(
            raw,
            ReportOptions {
                show_raw_response: false,
                ..ReportOptions::default()
            },
        );
        assert!(hidden.raw_response.is_none());
        assert_eq!(hidden.unexpected_params[0].value, "bar");
    }

    #[test]
    fn extension_report_has_only_summary() {
        let err: PopupError = ExtensionError::new("offline").into();
        let report = ErrorReport::new(&err, &ReportOptions::default());
        assert_eq!(report.kind, "ExtensionError");
        assert_eq!(report.summary, "offline");
        assert!(report.detail.is_none());
        assert!(report.params.is_empty());
    }

    #[test]
    fn clamp_width_truncates() {
        assert_eq!(clamp_width("abcdefghij".into(), Some(8)), "abcde...");
        assert_eq!(clamp_width("short".into(), Some(8)), "short");
        assert_eq!(clamp_width("anything".into(), None), "anything");
    }

    #[test]
    fn building_a_report_does_not_mark_logged() {
        let err: PopupError = ExtensionError::new("x").into();
        let _ = ErrorReport::new(&err, &ReportOptions::default());
        assert!(!err.already_logged());
    }
}
