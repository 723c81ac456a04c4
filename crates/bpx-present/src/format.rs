// SPDX-License-Identifier: MIT OR Apache-2.0
//! Output format selection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::html::render_html;
use crate::report::ErrorReport;
use crate::text::{render_compact, render_text};

/// Supported renderings of an [`ErrorReport`].
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// Human-readable multi-line text.
    #[default]
    Text,
    /// Single-line summary.
    Compact,
    /// Compact JSON (single line).
    Json,
    /// Pretty-printed JSON.
    JsonPretty,
    /// HTML fragment.
    Html,
}

impl OutputFormat {
    /// Every accepted name, in documentation order.
    pub const NAMES: &'static [&'static str] = &["text", "compact", "json", "json-pretty", "html"];
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Text => "text",
            Self::Compact => "compact",
            Self::Json => "json",
            Self::JsonPretty => "json-pretty",
            Self::Html => "html",
        };
        f.write_str(s)
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "compact" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            "json-pretty" | "json_pretty" | "jsonpretty" => Ok(Self::JsonPretty),
            "html" => Ok(Self::Html),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}

/// Render `report` in the given format.
pub fn render(report: &ErrorReport, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => render_text(report),
        OutputFormat::Compact => render_compact(report),
        OutputFormat::Json => serde_json::to_string(report).unwrap_or_default(),
        OutputFormat::JsonPretty => serde_json::to_string_pretty(report).unwrap_or_default(),
        OutputFormat::Html => render_html(report),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::ReportOptions;
    use bpx_classify::{ExtensionError, PopupError};

    #[test]
    fn names_roundtrip_through_from_str() {
        for name in OutputFormat::NAMES {
            let f: OutputFormat = name.parse().unwrap();
            assert_eq!(f.to_string(), *name);
        }
    }

    #[test]
    fn from_str_is_case_insensitive_and_accepts_aliases() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("json_pretty".parse::<OutputFormat>(), Ok(OutputFormat::JsonPretty));
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn json_render_is_parseable() {
        let err: PopupError = ExtensionError::new("offline").into();
        let report = ErrorReport::new(&err, &ReportOptions::default());
        let v: serde_json::Value = serde_json::from_str(&render(&report, OutputFormat::Json)).unwrap();
        assert_eq!(v["kind"], "ExtensionError");
        assert_eq!(v["summary"], "offline");
        assert!(v.get("detail").is_none());
    }
}
