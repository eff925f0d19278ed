//! Display labels for catalog entries.
//!
//! Labels come from the override table when the canonical name or one of the
//! alt-names is listed there; otherwise the best alt-name (or the canonical
//! name) is prettified by `format_name_for_display`.

use super::model::RawTechnology;
use anyhow::{Context, Result};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Names that the generic formatter would mangle.
const SPECIAL_CASES: &[(&str, &str)] = &[
    ("type-script", "TypeScript"),
    ("java-script", "JavaScript"),
    ("react-native", "React Native"),
    ("react-bootstrap", "React Bootstrap"),
    ("react bootstrap", "React Bootstrap"),
    ("next.js", "Next.js"),
    ("node.js", "Node.js"),
    ("amazon-web-services", "Amazon Web Services"),
];

/// Read-only mapping from a catalog name or alt-name to a preferred label.
#[derive(Clone, Debug, Default)]
pub struct DisplayNameOverrides {
    labels: BTreeMap<String, String>,
}

impl DisplayNameOverrides {
    pub fn parse(data: &str) -> Result<Self> {
        let labels: BTreeMap<String, String> =
            serde_json::from_str(data).context("parsing display-name overrides")?;
        Ok(Self { labels })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("reading display-name overrides {}", path.display()))?;
        Self::parse(&data).with_context(|| format!("loading {}", path.display()))
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.labels.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl FromIterator<(String, String)> for DisplayNameOverrides {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self {
            labels: iter.into_iter().collect(),
        }
    }
}

/// Resolve the label for a catalog record. First match wins:
/// canonical override, first alt-name override, best alt-name, canonical name.
pub fn resolve_display_name(raw: &RawTechnology, overrides: &DisplayNameOverrides) -> String {
    if let Some(label) = overrides.get(&raw.name) {
        return label.to_string();
    }

    if let Some(label) = raw.altnames.iter().find_map(|alt| overrides.get(alt)) {
        return label.to_string();
    }

    match best_alt_name(&raw.altnames) {
        Some(alt) => format_name_for_display(alt),
        None => format_name_for_display(&raw.name),
    }
}

// Longest first, then case-insensitive alphabetical.
fn best_alt_name(altnames: &[String]) -> Option<&str> {
    altnames
        .iter()
        .min_by(|a, b| match b.len().cmp(&a.len()) {
            Ordering::Equal => a
                .to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b)),
            other => other,
        })
        .map(String::as_str)
}

/// Prettify a raw catalog name: `"material-ui"` becomes `"Material ui"`,
/// `"someName"` becomes `"Some Name"`.
pub fn format_name_for_display(name: &str) -> String {
    if let Some((_, label)) = SPECIAL_CASES.iter().find(|(key, _)| *key == name) {
        return (*label).to_string();
    }

    let mut spaced = String::with_capacity(name.len() + 4);
    for ch in name.chars() {
        match ch {
            '-' => spaced.push(' '),
            c if c.is_ascii_uppercase() => {
                spaced.push(' ');
                spaced.push(c);
            }
            c => spaced.push(c),
        }
    }

    let mut chars = spaced.chars();
    let capitalized: String = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };

    let formatted = capitalized.split_whitespace().collect::<Vec<_>>().join(" ");
    if !formatted.is_empty() {
        return formatted;
    }
    let trimmed = name.trim();
    if trimmed.is_empty() {
        name.to_string()
    } else {
        trimmed.to_string()
    }
}
