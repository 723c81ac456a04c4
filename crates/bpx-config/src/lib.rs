// SPDX-License-Identifier: MIT OR Apache-2.0
//! Configuration loading, validation, and merging for error presentation.
//!
//! [`PresenterConfig`] controls how classified errors are logged and
//! rendered: the log filter and format, the default output format, whether the
//! retained raw response is shown, and how wide parameter values may get.
#![deny(unsafe_code)]
#![warn(missing_docs)]

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur during configuration loading or validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The requested configuration file was not found.
    #[error("config file not found: {path}")]
    FileNotFound {
        /// Path that was requested.
        path: String,
    },

    /// The file could not be parsed as valid TOML.
    #[error("failed to parse config: {reason}")]
    ParseError {
        /// Human-readable parse error detail.
        reason: String,
    },

    /// An environment override holds a value of the wrong type.
    #[error("invalid value '{value}' for {var}")]
    InvalidOverride {
        /// Variable name.
        var: String,
        /// Offending value.
        value: String,
    },

    /// Semantic validation failed (one or more problems).
    #[error("config validation failed: {reasons:?}")]
    ValidationError {
        /// Individual validation failure messages.
        reasons: Vec<String>,
    },
}

// ---------------------------------------------------------------------------
// Warnings
// ---------------------------------------------------------------------------

/// Advisory-level issues that do not prevent operation but deserve attention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// Raw responses are hidden, so unknown codes lose their payload.
    RawResponseHidden,
    /// Parameter values are clamped tightly enough to hide typical paths.
    NarrowParamWidth {
        /// Configured width.
        width: usize,
    },
    /// JSON logs combined with the HTML output format.
    MixedMarkup {
        /// Configured output format.
        output: String,
    },
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigWarning::RawResponseHidden => {
                write!(f, "raw responses are hidden; unknown error codes show no payload")
            }
            ConfigWarning::NarrowParamWidth { width } => {
                write!(f, "max_param_width {width} is narrow; paths will be truncated")
            }
            ConfigWarning::MixedMarkup { output } => {
                write!(f, "log_format 'json' with output '{output}' mixes markup on stdout")
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Config types
// ---------------------------------------------------------------------------

/// Runtime settings for presenting errors.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PresenterConfig {
    /// Log level filter (`"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,

    /// Log line format: `"text"` or `"json"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_format: Option<String>,

    /// Default output format for rendered reports.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,

    /// Include the retained raw response in reports.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_raw_response: Option<bool>,

    /// Clamp rendered parameter values to this many characters (8–4096).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_param_width: Option<usize>,
}

impl Default for PresenterConfig {
    fn default() -> Self {
        Self {
            log_level: Some(DEFAULT_LOG_LEVEL.into()),
            log_format: None,
            output: None,
            show_raw_response: None,
            max_param_width: None,
        }
    }
}

impl PresenterConfig {
    /// Log level, falling back to `"info"`.
    pub fn effective_log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    /// Log format, falling back to `"text"`.
    pub fn effective_log_format(&self) -> &str {
        self.log_format.as_deref().unwrap_or(DEFAULT_LOG_FORMAT)
    }

    /// Output format, falling back to `"text"`.
    pub fn effective_output(&self) -> &str {
        self.output.as_deref().unwrap_or(DEFAULT_OUTPUT)
    }

    /// Whether raw responses are shown; `true` unless disabled.
    pub fn effective_show_raw_response(&self) -> bool {
        self.show_raw_response.unwrap_or(true)
    }
}

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_LOG_FORMAT: &str = "text";
const DEFAULT_OUTPUT: &str = "text";

/// Recognised log levels.
pub const VALID_LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

/// Recognised log formats.
pub const VALID_LOG_FORMATS: &[&str] = &["text", "json"];

/// Recognised output formats.
pub const VALID_OUTPUTS: &[&str] = &["text", "compact", "json", "json-pretty", "html"];

/// Smallest accepted `max_param_width`.
pub const MIN_PARAM_WIDTH: usize = 8;

/// Largest accepted `max_param_width`.
pub const MAX_PARAM_WIDTH: usize = 4096;

/// Widths below this produce a [`ConfigWarning::NarrowParamWidth`].
const NARROW_WIDTH_THRESHOLD: usize = 24;

/// Environment variable overriding `log_level`.
pub const ENV_LOG_LEVEL: &str = "BPX_LOG_LEVEL";
/// Environment variable overriding `log_format`.
pub const ENV_LOG_FORMAT: &str = "BPX_LOG_FORMAT";
/// Environment variable overriding `output`.
pub const ENV_OUTPUT: &str = "BPX_OUTPUT";
/// Environment variable overriding `show_raw_response`.
pub const ENV_SHOW_RAW_RESPONSE: &str = "BPX_SHOW_RAW_RESPONSE";

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Load a [`PresenterConfig`] from an optional TOML file path.
///
/// * If `path` is `Some`, reads and parses the file.
/// * If `path` is `None`, returns [`PresenterConfig::default()`].
///
/// Environment variable overrides are applied on top in both cases.
pub fn load_config(path: Option<&Path>) -> Result<PresenterConfig, ConfigError> {
    let mut config = match path {
        Some(p) => {
            let content = std::fs::read_to_string(p).map_err(|_| ConfigError::FileNotFound {
                path: p.display().to_string(),
            })?;
            parse_toml(&content)?
        }
        None => PresenterConfig::default(),
    };
    apply_env_overrides(&mut config)?;
    Ok(config)
}

/// Parse a TOML string into a [`PresenterConfig`].
pub fn parse_toml(content: &str) -> Result<PresenterConfig, ConfigError> {
    toml::from_str::<PresenterConfig>(content).map_err(|e| ConfigError::ParseError {
        reason: e.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Env overrides
// ---------------------------------------------------------------------------

/// Apply environment variable overrides.
///
/// Recognised variables:
/// - `BPX_LOG_LEVEL`
/// - `BPX_LOG_FORMAT`
/// - `BPX_OUTPUT`
/// - `BPX_SHOW_RAW_RESPONSE`
pub fn apply_env_overrides(config: &mut PresenterConfig) -> Result<(), ConfigError> {
    apply_overrides_with(config, |var| std::env::var(var).ok())
}

/// Apply overrides looked up through `lookup` instead of the process
/// environment.
pub fn apply_overrides_with<F>(config: &mut PresenterConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(val) = lookup(ENV_LOG_LEVEL) {
        config.log_level = Some(val);
    }
    if let Some(val) = lookup(ENV_LOG_FORMAT) {
        config.log_format = Some(val);
    }
    if let Some(val) = lookup(ENV_OUTPUT) {
        config.output = Some(val);
    }
    if let Some(val) = lookup(ENV_SHOW_RAW_RESPONSE) {
        let flag = parse_flag(&val).ok_or_else(|| ConfigError::InvalidOverride {
            var: ENV_SHOW_RAW_RESPONSE.into(),
            value: val.clone(),
        })?;
        config.show_raw_response = Some(flag);
    }
    Ok(())
}

fn parse_flag(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a parsed configuration, returning advisory warnings.
///
/// Unknown level, format, or output names and out-of-range widths are
/// returned as a [`ConfigError::ValidationError`]; soft issues come back as
/// warnings.
pub fn validate_config(config: &PresenterConfig) -> Result<Vec<ConfigWarning>, ConfigError> {
    let mut errors: Vec<String> = Vec::new();
    let mut warnings: Vec<ConfigWarning> = Vec::new();

    if let Some(ref level) = config.log_level {
        if !VALID_LOG_LEVELS.contains(&level.as_str()) {
            errors.push(format!("invalid log_level '{level}'"));
        }
    }
    if let Some(ref format) = config.log_format {
        if !VALID_LOG_FORMATS.contains(&format.as_str()) {
            errors.push(format!("invalid log_format '{format}'"));
        }
    }
    if let Some(ref output) = config.output {
        if !VALID_OUTPUTS.contains(&output.as_str()) {
            errors.push(format!(
                "invalid output '{output}' (expected one of {})",
                VALID_OUTPUTS.join(", ")
            ));
        }
    }
    if let Some(width) = config.max_param_width {
        if !(MIN_PARAM_WIDTH..=MAX_PARAM_WIDTH).contains(&width) {
            errors.push(format!(
                "max_param_width {width} out of range ({MIN_PARAM_WIDTH}..={MAX_PARAM_WIDTH})"
            ));
        } else if width < NARROW_WIDTH_THRESHOLD {
            warnings.push(ConfigWarning::NarrowParamWidth { width });
        }
    }

    if config.show_raw_response == Some(false) {
        warnings.push(ConfigWarning::RawResponseHidden);
    }
    if config.effective_log_format() == "json" && config.effective_output() == "html" {
        warnings.push(ConfigWarning::MixedMarkup {
            output: config.effective_output().to_string(),
        });
    }

    if errors.is_empty() {
        Ok(warnings)
    } else {
        Err(ConfigError::ValidationError { reasons: errors })
    }
}

// ---------------------------------------------------------------------------
// Merging
// ---------------------------------------------------------------------------

/// Merge two configurations. Values in `overlay` take precedence over `base`.
pub fn merge_configs(base: PresenterConfig, overlay: PresenterConfig) -> PresenterConfig {
    PresenterConfig {
        log_level: overlay.log_level.or(base.log_level),
        log_format: overlay.log_format.or(base.log_format),
        output: overlay.output.or(base.output),
        show_raw_response: overlay.show_raw_response.or(base.show_raw_response),
        max_param_width: overlay.max_param_width.or(base.max_param_width),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
