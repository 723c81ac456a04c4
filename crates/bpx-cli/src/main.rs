// SPDX-License-Identifier: MIT OR Apache-2.0
#![deny(unsafe_code)]

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use bpx_config::{PresenterConfig, load_config, merge_configs, validate_config};
use clap::{Parser, Subcommand};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use commands::{Presentation, ReplyOutcome};

#[derive(Parser, Debug)]
#[command(name = "bpx", version, about = "Browser extension error classifier")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging.
    #[arg(long, global = true)]
    debug: bool,

    /// Presenter config file (TOML).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Classify a native host error response.
    Classify {
        /// JSON file to read; stdin when omitted or `-`.
        input: Option<PathBuf>,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Interpret a settings reply from the background script.
    Reply {
        /// JSON file to read; stdin when omitted or `-`.
        input: Option<PathBuf>,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// List every known host error code.
    Codes {
        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Decode a packed host version, or pack one with `--pack`.
    Version {
        /// Raw version value (JSON or plain text), or `major.minor.patch` with `--pack`.
        value: String,

        /// Pack `major.minor.patch` into its integer form.
        #[arg(long)]
        pack: bool,
    },

    /// Print the status notice shown while an action runs.
    Notice {
        /// Action name (`fill`, `launch`, `copyPassword`, ...).
        action: String,

        /// Emit the popup HTML element.
        #[arg(long)]
        html: bool,
    },

    /// Load and validate the config file.
    CheckConfig,

    /// Print the config JSON schema.
    Schema,
}

/// Flags shared by rendering commands. Each overrides the config file.
#[derive(clap::Args, Debug, Default)]
struct RenderArgs {
    /// Output format: text | compact | json | json-pretty | html.
    #[arg(long)]
    format: Option<String>,

    /// Hide the retained raw response.
    #[arg(long)]
    no_raw: bool,

    /// Clamp parameter values to this many characters.
    #[arg(long)]
    max_width: Option<usize>,

    /// Also report the error through the log (stderr).
    #[arg(long)]
    log: bool,
}

impl RenderArgs {
    fn overlay(&self) -> PresenterConfig {
        PresenterConfig {
            log_level: None,
            log_format: None,
            output: self.format.clone(),
            show_raw_response: self.no_raw.then_some(false),
            max_param_width: self.max_width,
        }
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    // check-config reports problems itself instead of failing on them.
    if matches!(cli.command, Commands::CheckConfig) {
        return cmd_check_config(cli.config.as_deref());
    }

    let base = load_config(cli.config.as_deref()).context("load config")?;
    init_tracing(&base, cli.debug)?;

    match cli.command {
        Commands::Classify { input, render } => {
            let presentation = presentation(base, &render)?;
            let text = commands::read_input(input.as_deref())?;
            println!("{}", commands::classify_command(&text, &presentation, render.log)?);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Reply { input, render } => {
            let presentation = presentation(base, &render)?;
            let text = commands::read_input(input.as_deref())?;
            match commands::reply_command(&text, &presentation, render.log)? {
                ReplyOutcome::Settings(s) => {
                    println!("{s}");
                    Ok(ExitCode::SUCCESS)
                }
                ReplyOutcome::Failed(s) => {
                    println!("{s}");
                    Ok(ExitCode::from(2))
                }
            }
        }
        Commands::Codes { json } => {
            if json {
                println!("{}", commands::codes_json()?);
            } else {
                println!("{}", commands::codes_table());
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Version { value, pack } => {
            if pack {
                println!("{}", commands::pack_version(&value)?);
            } else {
                println!("{}", commands::version_command(&value));
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Notice { action, html } => {
            let presentation = presentation(base, &RenderArgs::default())?;
            println!(
                "{}",
                commands::notice_command(&action, html, &presentation.options)
            );
            Ok(ExitCode::SUCCESS)
        }
        Commands::Schema => {
            println!("{}", commands::schema_json()?);
            Ok(ExitCode::SUCCESS)
        }
        Commands::CheckConfig => cmd_check_config(cli.config.as_deref()),
    }
}

fn init_tracing(config: &PresenterConfig, debug: bool) -> Result<()> {
    let filter = if debug {
        EnvFilter::new("bpx=debug")
    } else {
        match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => EnvFilter::try_new(format!("bpx={}", config.effective_log_level()))
                .with_context(|| format!("invalid log_level '{}'", config.effective_log_level()))?,
        }
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match config.effective_log_format() {
        "json" => builder.json().init(),
        _ => builder.init(),
    }
    Ok(())
}

fn presentation(base: PresenterConfig, args: &RenderArgs) -> Result<Presentation> {
    let config = merge_configs(base, args.overlay());
    match validate_config(&config) {
        Ok(warnings) => {
            for w in warnings {
                warn!(target: "bpx.config", "{w}");
            }
        }
        Err(e) => return Err(e).context("invalid configuration"),
    }
    Presentation::from_config(&config)
}

fn cmd_check_config(path: Option<&std::path::Path>) -> Result<ExitCode> {
    let diagnostics = commands::config_check(path)?;
    let failed = diagnostics.iter().any(|d| d.starts_with("error:"));
    if diagnostics.is_empty() {
        println!("ok");
    }
    for d in &diagnostics {
        println!("{d}");
    }
    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
