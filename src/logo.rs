//! Icon asset URLs for catalog entries.
//!
//! Assets live at `<asset-root>/<id>/<id>-<variant>.svg`. The asset root
//! carries the deployment base path, so every URL pointing into the icon
//! directory is re-derived here instead of being trusted verbatim.

use crate::catalog::{TechnologyEntry, TechnologyIndex};
use serde::Serialize;
use tracing::debug;

const PREFERRED_VARIANT: &str = "original";
const SVG_EXTENSION: &str = ".svg";

/// URL builder bound to one deployment's asset root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogoUrls {
    base_path: String,
    icon_dir: String,
}

/// One icon variant offered for an entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LogoVariant {
    pub version: String,
    pub url: String,
    pub label: String,
}

/// What to draw for a technology: its icon, or the initial-letter glyph.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TechLogo {
    Icon { url: String },
    Glyph { initial: char },
}

impl TechLogo {
    pub fn url(&self) -> Option<&str> {
        match self {
            TechLogo::Icon { url } => Some(url.as_str()),
            TechLogo::Glyph { .. } => None,
        }
    }
}

/// First character of `name` uppercased, or `?` for an empty name.
pub fn glyph_for(name: &str) -> char {
    name.trim()
        .chars()
        .next()
        .and_then(|c| c.to_uppercase().next())
        .unwrap_or('?')
}

impl LogoUrls {
    /// `base_path` is the deployment prefix (`""` or e.g. `/p77`); `icon_dir`
    /// the directory under it holding the icon tree.
    pub fn new(base_path: &str, icon_dir: &str) -> Self {
        Self {
            base_path: base_path.trim_end_matches('/').to_string(),
            icon_dir: icon_dir.trim_matches('/').to_string(),
        }
    }

    /// `<base-path>/<icon-dir>`, e.g. `/p77/icons`.
    pub fn asset_root(&self) -> String {
        format!("{}/{}", self.base_path, self.icon_dir)
    }

    fn variant_url(&self, entry: &TechnologyEntry, variant: &str) -> String {
        let id = &entry.canonical_id;
        format!("{}/{id}/{id}-{variant}{SVG_EXTENSION}", self.asset_root())
    }

    /// URL of the entry's preferred icon: `original` when declared, else the
    /// first declared variant, else `original` regardless.
    pub fn generate(&self, entry: &TechnologyEntry) -> String {
        let variant = entry
            .icon_variants
            .iter()
            .find(|v| v.as_str() == PREFERRED_VARIANT)
            .or_else(|| entry.icon_variants.first())
            .map(String::as_str)
            .unwrap_or(PREFERRED_VARIANT);
        self.variant_url(entry, variant)
    }

    /// Every declared variant with its URL and a capitalized label.
    pub fn svg_variants(&self, entry: &TechnologyEntry) -> Vec<LogoVariant> {
        entry
            .icon_variants
            .iter()
            .map(|version| LogoVariant {
                version: version.clone(),
                url: self.variant_url(entry, version),
                label: capitalize(version),
            })
            .collect()
    }

    /// Resolve a caller-supplied override URL.
    ///
    /// Paths into the icon directory (`/<icon-dir>/...` or the prefixed asset
    /// root) naming a `<name>-<variant>.svg` file are rebuilt from the
    /// standard URL with that variant, so the base path is always applied.
    /// Anything else (uploads, external hosts) is returned verbatim.
    pub fn resolve_override(&self, entry: Option<&TechnologyEntry>, override_url: &str) -> String {
        let Some(entry) = entry else {
            return override_url.to_string();
        };
        if !self.points_into_icon_dir(override_url) {
            return override_url.to_string();
        }
        let Some(variant) = variant_from_filename(entry, override_url) else {
            return override_url.to_string();
        };

        let standard = self.generate(entry);
        let derived = standard.replace(
            &format!("-{PREFERRED_VARIANT}{SVG_EXTENSION}"),
            &format!("-{variant}{SVG_EXTENSION}"),
        );
        debug!(override_url, derived = %derived, "re-derived icon override");
        derived
    }

    fn points_into_icon_dir(&self, url: &str) -> bool {
        let bare = format!("/{}/", self.icon_dir);
        let prefixed = format!("{}/", self.asset_root());
        url.starts_with(&bare) || url.starts_with(&prefixed)
    }

    /// Logo for a technology as the renderers draw it.
    ///
    /// `lookup_name` is the canonical catalog name when one was stored,
    /// `display_name` what the user typed. An override URL wins when present;
    /// otherwise the catalog icon, otherwise the glyph.
    pub fn tech_logo(
        &self,
        index: &TechnologyIndex,
        display_name: &str,
        lookup_name: Option<&str>,
        override_url: Option<&str>,
    ) -> TechLogo {
        let lookup_name = lookup_name
            .filter(|name| !name.is_empty())
            .unwrap_or(display_name);
        let resolved = index.lookup(Some(lookup_name));
        let entry = resolved.as_ref().map(|hit| hit.entry);

        if let Some(url) = override_url.filter(|url| !url.trim().is_empty()) {
            return TechLogo::Icon {
                url: self.resolve_override(entry, url),
            };
        }
        match entry {
            Some(entry) => TechLogo::Icon {
                url: self.generate(entry),
            },
            None => TechLogo::Glyph {
                initial: glyph_for(display_name),
            },
        }
    }
}

// "nextjs-original-wordmark.svg" -> "original-wordmark"
fn variant_from_filename(entry: &TechnologyEntry, url: &str) -> Option<String> {
    let filename = url.rsplit('/').next()?;
    let stem = filename.strip_suffix(SVG_EXTENSION)?;
    let variant = match stem.strip_prefix(&format!("{}-", entry.canonical_id)) {
        Some(rest) => rest,
        None => stem.split_once('-').map(|(_, rest)| rest).unwrap_or(""),
    };
    if variant.is_empty() {
        Some(PREFERRED_VARIANT.to_string())
    } else {
        Some(variant.to_string())
    }
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
