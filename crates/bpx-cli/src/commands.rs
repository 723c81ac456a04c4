// SPDX-License-Identifier: MIT OR Apache-2.0
//! Command implementations for the `bpx` CLI.
//!
//! Each command takes already-read input and returns the text to print, so
//! they can be tested without spawning the binary.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use bpx_classify::{HostVersion, PopupError, ReplyError, classify_str, settings_from_reply};
use bpx_config::{PresenterConfig, load_config, validate_config};
use bpx_error_schema::catalog;
use bpx_present::{
    ErrorReport, OutputFormat, ReportOptions, Status, log_error, notice_for_action, render,
    render_status_html,
};
use schemars::schema_for;
use tracing::debug;

/// Read a whole input; `None` or `-` means stdin.
pub fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) if p != Path::new("-") => {
            std::fs::read_to_string(p).with_context(|| format!("read input '{}'", p.display()))
        }
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("read input from stdin")?;
            Ok(buf)
        }
    }
}

/// Rendering choices resolved from config and flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Presentation {
    /// Output format for stdout.
    pub format: OutputFormat,
    /// Renderer options.
    pub options: ReportOptions,
}

impl Presentation {
    /// Resolve from a validated config.
    pub fn from_config(config: &PresenterConfig) -> Result<Self> {
        let format = config
            .effective_output()
            .parse::<OutputFormat>()
            .map_err(anyhow::Error::msg)?;
        Ok(Self {
            format,
            options: ReportOptions {
                show_raw_response: config.effective_show_raw_response(),
                max_param_width: config.max_param_width,
            },
        })
    }

    fn render(&self, error: &PopupError) -> String {
        render(&ErrorReport::new(error, &self.options), self.format)
    }
}

/// Classify a host error response and render it.
///
/// With `log`, the error is also reported once through `tracing`.
pub fn classify_command(input: &str, presentation: &Presentation, log: bool) -> Result<String> {
    let host = classify_str(input.trim()).context("classify host response")?;
    debug!(
        target: "bpx.cli",
        code = %host.code_string(),
        invalid = host.is_response_invalid(),
        "classified host response"
    );
    let error = PopupError::Host(host);
    let rendered = presentation.render(&error);
    if log {
        log_error(&error, &presentation.options);
    }
    Ok(rendered)
}

/// Outcome of interpreting a background reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyOutcome {
    /// The reply succeeded; pretty-printed settings.
    Settings(String),
    /// The reply reported a failure; rendered error.
    Failed(String),
}

/// Interpret a `getSettings` reply from the background script.
pub fn reply_command(input: &str, presentation: &Presentation, log: bool) -> Result<ReplyOutcome> {
    let reply: serde_json::Value =
        serde_json::from_str(input.trim()).context("parse reply as JSON")?;
    match settings_from_reply(&reply) {
        Ok(settings) => Ok(ReplyOutcome::Settings(
            serde_json::to_string_pretty(settings).context("serialize settings")?,
        )),
        Err(ReplyError::Failed(error)) => {
            let rendered = presentation.render(&error);
            if log {
                log_error(&error, &presentation.options);
            }
            Ok(ReplyOutcome::Failed(rendered))
        }
        Err(ReplyError::Shape(e)) => Err(e).context("interpret reply"),
    }
}

/// The code table as aligned text.
pub fn codes_table() -> String {
    let rows: Vec<[String; 4]> = catalog()
        .into_iter()
        .map(|e| {
            [
                e.code.to_string(),
                e.category.to_string(),
                e.description,
                e.expected_params.join(", "),
            ]
        })
        .collect();
    let header = ["CODE", "CATEGORY", "DESCRIPTION", "PARAMS"];

    let mut widths = header.map(str::len);
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.len());
        }
    }
    let line = |cells: [&str; 4]| {
        format!(
            "{:<w0$}  {:<w1$}  {:<w2$}  {}",
            cells[0],
            cells[1],
            cells[2],
            cells[3],
            w0 = widths[0],
            w1 = widths[1],
            w2 = widths[2],
        )
        .trim_end()
        .to_string()
    };

    let mut out = vec![line(header)];
    for row in &rows {
        out.push(line([&row[0], &row[1], &row[2], &row[3]]));
    }
    out.join("\n")
}

/// The code table as pretty JSON.
pub fn codes_json() -> Result<String> {
    serde_json::to_string_pretty(&catalog()).context("serialize code catalog")
}

/// Decode a raw version value. Input is read as JSON, falling back to a
/// plain string.
pub fn version_command(raw: &str) -> String {
    let value = serde_json::from_str(raw)
        .unwrap_or_else(|_| serde_json::Value::String(raw.to_string()));
    HostVersion::from_raw(Some(&value)).version_string()
}

/// Pack `major.minor.patch` into the host's integer form.
pub fn pack_version(text: &str) -> Result<u64> {
    let parts: Vec<&str> = text.trim().split('.').collect();
    let [major, minor, patch] = parts.as_slice() else {
        bail!("expected major.minor.patch, got '{text}'");
    };
    let parse = |s: &str, name: &str| -> Result<u64> {
        s.parse::<u64>()
            .with_context(|| format!("invalid {name} component '{s}'"))
    };
    let version = HostVersion::from_components(
        parse(*major, "major")?,
        parse(*minor, "minor")?,
        parse(*patch, "patch")?,
    )?;
    match version {
        HostVersion::Packed(v) => Ok(v),
        HostVersion::Invalid(_) => bail!("could not pack '{text}'"),
    }
}

/// Status notice for an action, as text or HTML.
pub fn notice_command(action: &str, html: bool, options: &ReportOptions) -> String {
    let notice = notice_for_action(action);
    if html {
        render_status_html(Status::Notice(notice), options)
    } else {
        notice.to_string()
    }
}

/// Load and validate a configuration file.
///
/// Returns human-readable diagnostics (errors and warnings).
pub fn config_check(path: Option<&Path>) -> Result<Vec<String>> {
    let mut diagnostics = Vec::new();

    let config = match load_config(path) {
        Ok(c) => c,
        Err(e) => {
            diagnostics.push(format!("error: {e}"));
            return Ok(diagnostics);
        }
    };

    match validate_config(&config) {
        Ok(warnings) => {
            for w in warnings {
                diagnostics.push(format!("warning: {w}"));
            }
        }
        Err(bpx_config::ConfigError::ValidationError { reasons }) => {
            for r in reasons {
                diagnostics.push(format!("error: {r}"));
            }
        }
        Err(e) => diagnostics.push(format!("error: {e}")),
    }

    Ok(diagnostics)
}

/// JSON schema of the configuration file.
pub fn schema_json() -> Result<String> {
    let value = serde_json::to_value(schema_for!(PresenterConfig))?;
    serde_json::to_string_pretty(&value).context("serialize schema")
}
