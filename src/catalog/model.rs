use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// Icon variant lists as they appear in the catalog file.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct IconVersions {
    #[serde(default)]
    pub svg: Vec<String>,
    #[serde(default)]
    pub font: Vec<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct IconAlias {
    pub base: String,
    pub alias: String,
}

/// One catalog record exactly as stored on disk.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct RawTechnology {
    pub name: String,
    #[serde(default)]
    pub altnames: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub versions: IconVersions,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub aliases: Vec<IconAlias>,
}

/// A catalog record with its display label resolved.
///
/// Built once when the index loads and never mutated afterwards.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct TechnologyEntry {
    pub canonical_id: String,
    pub label: String,
    pub alt_names: Vec<String>,
    pub tags: BTreeSet<String>,
    pub icon_variants: Vec<String>,
    pub font_variants: Vec<String>,
    pub color: String,
    pub aliases: Vec<IconAlias>,
}

impl TechnologyEntry {
    pub(crate) fn from_raw(raw: RawTechnology, label: String) -> Self {
        Self {
            canonical_id: raw.name,
            label,
            alt_names: raw.altnames,
            tags: raw.tags.into_iter().collect(),
            icon_variants: raw.versions.svg,
            font_variants: raw.versions.font,
            color: raw.color.unwrap_or_else(|| "#000000".to_string()),
            aliases: raw.aliases,
        }
    }

    /// Whether any icon variant is declared.
    pub fn has_icon(&self) -> bool {
        !self.icon_variants.is_empty()
    }
}

pub fn parse_raw_catalog(data: &str) -> Result<Vec<RawTechnology>> {
    serde_json::from_str(data).context("parsing technology catalog")
}

pub fn load_raw_catalog(path: &Path) -> Result<Vec<RawTechnology>> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("reading technology catalog {}", path.display()))?;
    serde_json::from_str(&data)
        .with_context(|| format!("parsing technology catalog {}", path.display()))
}
