//! JSON Schema validation for the catalog and portfolio document.
//!
//! Both schemas are compiled into the binary; a schema path on disk may be
//! supplied instead when iterating on a schema.

use anyhow::{Context, Result, anyhow, bail};
use jsonschema::JSONSchema;
use serde_json::Value;
use std::fs::File;
use std::path::Path;

const CATALOG_SCHEMA: &str = include_str!("../schema/technology_catalog.schema.json");
const DOCUMENT_SCHEMA: &str = include_str!("../schema/portfolio.schema.json");

/// Which bundled schema to validate against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchemaKind {
    Catalog,
    Document,
}

impl SchemaKind {
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "catalog" => Ok(SchemaKind::Catalog),
            "document" => Ok(SchemaKind::Document),
            other => bail!("unknown schema kind '{other}' (expected catalog or document)"),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SchemaKind::Catalog => "catalog",
            SchemaKind::Document => "document",
        }
    }

    fn bundled(self) -> &'static str {
        match self {
            SchemaKind::Catalog => CATALOG_SCHEMA,
            SchemaKind::Document => DOCUMENT_SCHEMA,
        }
    }
}

fn load_schema(kind: SchemaKind, schema_path: Option<&Path>) -> Result<Value> {
    match schema_path {
        Some(path) => serde_json::from_reader(
            File::open(path).with_context(|| format!("opening schema {}", path.display()))?,
        )
        .with_context(|| format!("parsing schema {}", path.display())),
        None => serde_json::from_str(kind.bundled())
            .with_context(|| format!("parsing bundled {} schema", kind.as_str())),
    }
}

/// Validate `input` against the schema for `kind`, reporting every violation.
pub fn validate_against_schema(
    kind: SchemaKind,
    input: &Value,
    schema_path: Option<&Path>,
) -> Result<()> {
    let schema = load_schema(kind, schema_path)?;
    let compiled = JSONSchema::compile(&schema)
        .map_err(|err| anyhow!("compiling {} schema: {err}", kind.as_str()))?;
    if let Err(errors) = compiled.validate(input) {
        let details = errors
            .map(|err| {
                let path = err.instance_path.to_string();
                if path.is_empty() {
                    err.to_string()
                } else {
                    format!("{path}: {err}")
                }
            })
            .collect::<Vec<_>>()
            .join("\n");
        bail!("{} failed schema validation:\n{}", kind.as_str(), details);
    }
    Ok(())
}
