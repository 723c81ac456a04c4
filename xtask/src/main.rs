// SPDX-License-Identifier: MIT OR Apache-2.0
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use schemars::schema_for;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "xtask", version, about = "Repo maintenance tasks")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate JSON Schemas for contract types.
    Schema {
        /// Output directory.
        #[arg(long, default_value = "contracts/schemas")]
        out_dir: PathBuf,
    },
    /// Export the host error code catalog as JSON.
    Catalog {
        /// Output file.
        #[arg(long, default_value = "contracts/error_codes.json")]
        out: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Schema { out_dir } => schema(&out_dir),
        Command::Catalog { out } => catalog(&out),
    }
}

fn schema(out_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(out_dir).context("create schema output dir")?;

    let config = schema_for!(bpx_config::PresenterConfig);
    let entry = schema_for!(bpx_error_schema::CatalogEntry);

    write_json(&out_dir.join("presenter_config.schema.json"), &config)?;
    write_json(&out_dir.join("catalog_entry.schema.json"), &entry)?;

    eprintln!("wrote schemas to {}", out_dir.display());
    Ok(())
}

fn catalog(out: &Path) -> Result<()> {
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).context("create catalog output dir")?;
    }
    let entries = bpx_error_schema::catalog();
    write_json(out, &entries)?;
    eprintln!("wrote {} codes to {}", entries.len(), out.display());
    Ok(())
}

fn write_json<T: serde::Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let mut s = serde_json::to_string_pretty(value)?;
    s.push('\n');
    std::fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}
