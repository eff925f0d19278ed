//! Validate JSON documents against the catalog or portfolio schemas.
//!
//! Usage:
//!   schema-validate --mode catalog --file catalog/devicon.json
//!   schema-validate --mode document --file content/portfolio.json
//!   schema-validate --mode document < portfolio.json

use anyhow::{Context, Result};
use clap::Parser;
use devfolio::{SchemaKind, TechnologyIndex, init_tracing, validate_against_schema};
use serde_json::Value;
use std::fs::File;
use std::io::{Read, stdin};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "schema-validate")]
#[command(about = "Validate JSON against the catalog or portfolio schemas")]
struct Cli {
    /// Validation mode: catalog or document.
    #[arg(long, value_parser = ["catalog", "document"])]
    mode: String,
    /// Optional input file; reads stdin when omitted.
    #[arg(long)]
    file: Option<PathBuf>,
    /// Schema file to use instead of the bundled one.
    #[arg(long)]
    schema: Option<PathBuf>,
}

fn read_input(file: Option<&PathBuf>) -> Result<Value> {
    let mut buf = String::new();
    if let Some(path) = file {
        File::open(path)
            .with_context(|| format!("opening input file {}", path.display()))?
            .read_to_string(&mut buf)
            .with_context(|| format!("reading input file {}", path.display()))?;
    } else {
        stdin()
            .read_to_string(&mut buf)
            .context("reading stdin for input JSON")?;
    }
    let value: Value = serde_json::from_str(&buf).context("parsing input JSON")?;
    Ok(value)
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let kind = SchemaKind::parse(&cli.mode)?;
    let input = read_input(cli.file.as_ref())?;

    validate_against_schema(kind, &input, cli.schema.as_deref())?;

    // The schema cannot see duplicate ids or alt-name collisions; indexing can.
    if kind == SchemaKind::Catalog {
        let raw = serde_json::from_value(input).context("decoding catalog records")?;
        let index = TechnologyIndex::from_raw(raw, &Default::default())?;
        info!(entries = index.len(), "catalog indexed");
    }
    Ok(())
}
