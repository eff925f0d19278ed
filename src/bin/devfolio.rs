//! Builds the portfolio site and answers catalog queries.
//!
//! Usage:
//!   devfolio build [--root DIR] [--out DIR] [--production]
//!   devfolio lookup "Next.js" python
//!   devfolio search type
//!   devfolio tags [--popular 10]
//!
//! Query subcommands print JSON on stdout; logs go to stderr.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use devfolio::{BuildMode, SiteConfig, export_site, find_site_root, init_tracing};
use serde_json::{Value, json};
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "devfolio")]
#[command(about = "Static developer portfolio generator")]
struct Cli {
    /// Site root; defaults to DEVFOLIO_ROOT or the nearest directory holding site.toml.
    #[arg(long, global = true)]
    root: Option<PathBuf>,
    /// Apply the configured base path (same as DEVFOLIO_ENV=production).
    #[arg(long, global = true)]
    production: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the portfolio into the output directory.
    Build {
        /// Output directory; defaults to paths.output from site.toml.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Resolve technology names against the catalog.
    Lookup {
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// List catalog entries whose label, id or alt-name starts with a prefix.
    Search { prefix: String },
    /// List catalog tags, or the most used ones.
    Tags {
        #[arg(long)]
        popular: Option<usize>,
    },
}

impl Command {
    fn requires_site_root(&self) -> bool {
        matches!(self, Command::Build { .. })
    }
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
    let mode = BuildMode::detect(cli.production);
    let root = resolve_root(cli.root.as_deref(), cli.command.requires_site_root())?;
    let config = match &root {
        Some(root) => SiteConfig::load(root)?,
        None => SiteConfig::default(),
    };
    // Catalog-only queries fall back to the bundled data outside a site.
    let root = root.unwrap_or_default();

    match cli.command {
        Command::Build { out } => {
            let summary = export_site(&root, &config, mode, out.as_deref())?;
            print_json(&serde_json::to_value(&summary)?)
        }
        Command::Lookup { names } => {
            let index = config.technology_index(&root)?;
            let logos = config.logo_urls(mode);
            let results: Vec<Value> = names
                .iter()
                .map(|name| match index.lookup(Some(name.as_str())) {
                    Some(resolved) => json!({
                        "query": name,
                        "found": true,
                        "canonical_id": resolved.entry.canonical_id,
                        "label": resolved.entry.label,
                        "matched_by": resolved.matched_by,
                        "logo_url": logos.generate(resolved.entry),
                        "svg_variants": logos.svg_variants(resolved.entry),
                    }),
                    None => json!({
                        "query": name,
                        "found": false,
                        "logo": logos.tech_logo(&index, name, None, None),
                    }),
                })
                .collect();
            print_json(&Value::Array(results))
        }
        Command::Search { prefix } => {
            let index = config.technology_index(&root)?;
            let hits: Vec<Value> = index
                .search(&prefix)
                .into_iter()
                .map(|entry| json!({"canonical_id": entry.canonical_id, "label": entry.label}))
                .collect();
            print_json(&Value::Array(hits))
        }
        Command::Tags { popular } => {
            let index = config.technology_index(&root)?;
            let tags = match popular {
                Some(limit) => index.popular_tags(limit),
                None => index.all_tags(),
            };
            print_json(&json!(tags))
        }
    }
}

fn resolve_root(explicit: Option<&Path>, required: bool) -> Result<Option<PathBuf>> {
    if let Some(root) = explicit {
        return Ok(Some(root.to_path_buf()));
    }
    let cwd = env::current_dir().context("reading current directory")?;
    match find_site_root(&cwd) {
        Ok(root) => Ok(Some(root)),
        Err(err) if !required => {
            debug!("{err:#}; using bundled catalog");
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
