//! Indexed view of the technology catalog.
//!
//! The index resolves display labels once at load time, enforces unique
//! canonical ids, and keeps lowercase lookup tables for ids, labels and
//! alt-names. Alt-names may be shared between entries; the first-loaded entry
//! owns a shared alt-name and the collision is logged.

use super::display::{DisplayNameOverrides, resolve_display_name};
use super::model::{RawTechnology, TechnologyEntry, load_raw_catalog, parse_raw_catalog};
use super::{BUNDLED_CATALOG, BUNDLED_DISPLAY_NAMES};
use anyhow::{Context, Result, bail};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use tracing::{debug, warn};

/// Which tier of the lookup produced a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    CanonicalId,
    Label,
    AltName,
    NormalizedCanonicalId,
    NormalizedLabel,
    NormalizedAltName,
}

/// Result of a successful lookup. Borrowed from the index; discard after use.
#[derive(Clone, Debug, Serialize)]
pub struct ResolvedTechnology<'a> {
    pub entry: &'a TechnologyEntry,
    pub query: String,
    pub matched_by: MatchKind,
}

/// Technology catalog plus derived lowercase lookup tables.
#[derive(Debug)]
pub struct TechnologyIndex {
    entries: Vec<TechnologyEntry>,
    /// Tag usage counts in declared catalog order.
    tag_counts: Vec<(String, usize)>,
    by_id: BTreeMap<String, usize>,
    by_label: BTreeMap<String, usize>,
    by_alt_name: BTreeMap<String, usize>,
}

impl TechnologyIndex {
    /// Index the catalog and override table compiled into the binary.
    pub fn bundled() -> Result<Self> {
        let raw = parse_raw_catalog(BUNDLED_CATALOG).context("bundled catalog")?;
        let overrides =
            DisplayNameOverrides::parse(BUNDLED_DISPLAY_NAMES).context("bundled display names")?;
        Self::from_raw(raw, &overrides)
    }

    /// Load and validate a catalog from disk.
    pub fn load(catalog_path: &Path, overrides: &DisplayNameOverrides) -> Result<Self> {
        let raw = load_raw_catalog(catalog_path)?;
        Self::from_raw(raw, overrides)
            .with_context(|| format!("indexing {}", catalog_path.display()))
    }

    /// Build the index from parsed records, resolving labels in catalog order.
    ///
    /// Fails on an empty catalog, malformed names or duplicate canonical ids.
    pub fn from_raw(raw: Vec<RawTechnology>, overrides: &DisplayNameOverrides) -> Result<Self> {
        if raw.is_empty() {
            bail!("catalog contains no technologies");
        }

        let mut entries = Vec::with_capacity(raw.len());
        let mut by_id = BTreeMap::new();
        let mut by_label = BTreeMap::new();
        let mut by_alt_name: BTreeMap<String, usize> = BTreeMap::new();
        let mut tag_counts: Vec<(String, usize)> = Vec::new();

        for record in raw {
            validate_name(&record.name)?;
            let id_key = record.name.to_lowercase();
            if by_id.contains_key(&id_key) {
                bail!("duplicate technology name {}", record.name);
            }
            if record.altnames.iter().any(|alt| alt.trim().is_empty()) {
                bail!("technology {} declares an empty alt-name", record.name);
            }

            let label = resolve_display_name(&record, overrides);
            let position = entries.len();
            by_id.insert(id_key, position);
            by_label.entry(label.to_lowercase()).or_insert(position);
            for alt in &record.altnames {
                let alt_key = alt.to_lowercase();
                match by_alt_name.get(&alt_key) {
                    Some(&owner) if owner != position => {
                        let owner_id: &TechnologyEntry = &entries[owner];
                        warn!(
                            alt_name = %alt,
                            kept = %owner_id.canonical_id,
                            ignored = %record.name,
                            "alt-name shared by two technologies; first loaded wins"
                        );
                    }
                    Some(_) => {}
                    None => {
                        by_alt_name.insert(alt_key, position);
                    }
                }
            }
            count_tags(&mut tag_counts, &record.tags);
            entries.push(TechnologyEntry::from_raw(record, label));
        }

        debug!(technologies = entries.len(), "technology catalog indexed");
        Ok(Self {
            entries,
            tag_counts,
            by_id,
            by_label,
            by_alt_name,
        })
    }

    /// All entries in catalog load order.
    pub fn entries(&self) -> &[TechnologyEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exact (case-sensitive) canonical id lookup.
    pub fn by_id(&self, id: &str) -> Option<&TechnologyEntry> {
        self.by_id
            .get(&id.to_lowercase())
            .map(|&idx| &self.entries[idx])
            .filter(|entry| entry.canonical_id == id)
    }

    /// Resolve a free-text technology name.
    ///
    /// Tries canonical ids, labels and alt-names case-insensitively, then the
    /// same three against the query lowercased with whitespace runs collapsed
    /// to `-`. Returns `None` for missing or empty input and for no match.
    pub fn lookup(&self, query: Option<&str>) -> Option<ResolvedTechnology<'_>> {
        let query = query.filter(|q| !q.is_empty())?;
        let lowered = query.to_lowercase();

        let direct = [
            (&self.by_id, MatchKind::CanonicalId),
            (&self.by_label, MatchKind::Label),
            (&self.by_alt_name, MatchKind::AltName),
        ];
        for (table, kind) in direct {
            if let Some(&idx) = table.get(&lowered) {
                return Some(self.resolved(idx, query, kind));
            }
        }

        let normalized = normalize_query(&lowered);
        let fallback = [
            (&self.by_id, MatchKind::NormalizedCanonicalId),
            (&self.by_label, MatchKind::NormalizedLabel),
            (&self.by_alt_name, MatchKind::NormalizedAltName),
        ];
        for (table, kind) in fallback {
            if let Some(&idx) = table.get(&normalized) {
                return Some(self.resolved(idx, query, kind));
            }
        }

        debug!(query, "no technology matched");
        None
    }

    fn resolved(&self, idx: usize, query: &str, matched_by: MatchKind) -> ResolvedTechnology<'_> {
        ResolvedTechnology {
            entry: &self.entries[idx],
            query: query.to_string(),
            matched_by,
        }
    }

    /// Whether `name` resolves to an entry that ships at least one icon.
    pub fn has_logo(&self, name: &str) -> bool {
        self.lookup(Some(name))
            .is_some_and(|resolved| resolved.entry.has_icon())
    }

    /// Entries whose label, id or any alt-name starts with `prefix`.
    pub fn search(&self, prefix: &str) -> Vec<&TechnologyEntry> {
        let prefix = prefix.to_lowercase();
        self.entries
            .iter()
            .filter(|entry| {
                entry.label.to_lowercase().starts_with(&prefix)
                    || entry.canonical_id.to_lowercase().starts_with(&prefix)
                    || entry
                        .alt_names
                        .iter()
                        .any(|alt| alt.to_lowercase().starts_with(&prefix))
            })
            .collect()
    }

    /// Every tag used by the catalog, sorted.
    pub fn all_tags(&self) -> Vec<String> {
        let tags: BTreeSet<&String> = self.entries.iter().flat_map(|e| &e.tags).collect();
        tags.into_iter().cloned().collect()
    }

    pub fn by_tag(&self, tag: &str) -> Vec<&TechnologyEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.tags.iter().any(|t| t.eq_ignore_ascii_case(tag)))
            .collect()
    }

    /// Tags ordered by how many technologies carry them; ties keep first-seen order.
    pub fn popular_tags(&self, limit: usize) -> Vec<String> {
        let mut counts = self.tag_counts.clone();
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts.into_iter().take(limit).map(|(tag, _)| tag).collect()
    }

    /// Sorted set of every label and alt-name.
    pub fn available_names(&self) -> Vec<String> {
        let names: BTreeSet<&str> = self
            .entries
            .iter()
            .flat_map(|e| std::iter::once(e.label.as_str()).chain(e.alt_names.iter().map(String::as_str)))
            .collect();
        names.into_iter().map(str::to_string).collect()
    }

    /// Labels and alt-names grouped by tag, each group sorted.
    pub fn names_by_category(&self) -> BTreeMap<String, Vec<String>> {
        let mut categories: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for entry in &self.entries {
            for tag in &entry.tags {
                let names = categories.entry(tag.clone()).or_default();
                names.insert(entry.label.clone());
                names.extend(entry.alt_names.iter().cloned());
            }
        }
        categories
            .into_iter()
            .map(|(tag, names)| (tag, names.into_iter().collect()))
            .collect()
    }
}

/// Replace each whitespace run with a single `-`, leading and trailing runs included.
fn normalize_query(lowered: &str) -> String {
    let mut normalized = String::with_capacity(lowered.len());
    let mut in_whitespace = false;
    for c in lowered.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                normalized.push('-');
            }
            in_whitespace = true;
        } else {
            normalized.push(c);
            in_whitespace = false;
        }
    }
    normalized
}

/// Count each tag once per technology, keeping first-declared order.
fn count_tags(counts: &mut Vec<(String, usize)>, tags: &[String]) {
    let mut seen: BTreeSet<&str> = BTreeSet::new();
    for tag in tags {
        if !seen.insert(tag.as_str()) {
            continue;
        }
        match counts.iter_mut().find(|(known, _)| known == tag) {
            Some((_, count)) => *count += 1,
            None => counts.push((tag.clone(), 1)),
        }
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        bail!("encountered technology with no name");
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-' | '+'))
    {
        bail!("technology name must match ^[A-Za-z0-9_.+-]+$, got {name}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::model::IconVersions;

    fn raw(name: &str, altnames: &[&str], svg: &[&str]) -> RawTechnology {
        RawTechnology {
            name: name.to_string(),
            altnames: altnames.iter().map(|s| s.to_string()).collect(),
            tags: vec!["fixture".to_string()],
            versions: IconVersions {
                svg: svg.iter().map(|s| s.to_string()).collect(),
                font: Vec::new(),
            },
            color: None,
            aliases: Vec::new(),
        }
    }

    #[test]
    fn rejects_duplicate_ids_and_empty_catalogs() {
        let overrides = DisplayNameOverrides::default();
        assert!(TechnologyIndex::from_raw(Vec::new(), &overrides).is_err());
        let dup = vec![raw("java", &[], &[]), raw("Java", &[], &[])];
        assert!(TechnologyIndex::from_raw(dup, &overrides).is_err());
    }

    #[test]
    fn rejects_malformed_names() {
        let overrides = DisplayNameOverrides::default();
        assert!(TechnologyIndex::from_raw(vec![raw("bad name", &[], &[])], &overrides).is_err());
        assert!(TechnologyIndex::from_raw(vec![raw("ok", &[" "], &[])], &overrides).is_err());
    }

    #[test]
    fn shared_alt_name_resolves_to_first_loaded() {
        let overrides = DisplayNameOverrides::default();
        let index = TechnologyIndex::from_raw(
            vec![
                raw("first", &["first-engine", "shared"], &[]),
                raw("second", &["second-engine", "shared"], &[]),
            ],
            &overrides,
        )
        .unwrap();
        assert_eq!(index.entries()[0].label, "First engine");
        let hit = index.lookup(Some("shared")).unwrap();
        assert_eq!(hit.entry.canonical_id, "first");
        assert_eq!(hit.matched_by, MatchKind::AltName);
    }

    #[test]
    fn id_tier_beats_label_tier_across_entries() {
        // "beta" is the label of the first entry and the id of the second.
        let overrides: DisplayNameOverrides =
            [("alpha".to_string(), "Beta".to_string())].into_iter().collect();
        let index = TechnologyIndex::from_raw(
            vec![raw("alpha", &[], &[]), raw("beta", &[], &[])],
            &overrides,
        )
        .unwrap();
        let hit = index.lookup(Some("Beta")).unwrap();
        assert_eq!(hit.entry.canonical_id, "beta");
        assert_eq!(hit.matched_by, MatchKind::CanonicalId);
    }

    #[test]
    fn normalized_query_collapses_whitespace() {
        let overrides = DisplayNameOverrides::default();
        let index =
            TechnologyIndex::from_raw(vec![raw("spring", &["spring-boot"], &[])], &overrides)
                .unwrap();
        let hit = index.lookup(Some("Spring \t Boot")).unwrap();
        assert_eq!(hit.entry.canonical_id, "spring");
        assert_eq!(hit.matched_by, MatchKind::NormalizedAltName);
        assert_eq!(hit.query, "Spring \t Boot");
    }

    #[test]
    fn edge_whitespace_becomes_hyphens() {
        assert_eq!(normalize_query(" java"), "-java");
        assert_eq!(normalize_query("spring  boot \n"), "spring-boot-");
        let overrides = DisplayNameOverrides::default();
        let index = TechnologyIndex::from_raw(
            vec![raw("java", &[], &[]), raw("spring", &["spring-boot"], &[])],
            &overrides,
        )
        .unwrap();
        assert!(index.lookup(Some(" java")).is_none());
        assert!(index.lookup(Some("java ")).is_none());
        assert!(index.lookup(Some("Spring Boot ")).is_none());
        assert!(index.lookup(Some("Spring  Boot")).is_some());
    }

    #[test]
    fn popular_tags_keep_first_seen_order_on_ties() {
        let overrides = DisplayNameOverrides::default();
        let mut a = raw("a", &[], &[]);
        a.tags = vec!["web".into(), "db".into()];
        let mut b = raw("b", &[], &[]);
        b.tags = vec!["db".into(), "cli".into()];
        let index = TechnologyIndex::from_raw(vec![a, b], &overrides).unwrap();
        assert_eq!(index.popular_tags(10), vec!["db", "web", "cli"]);
        assert_eq!(index.popular_tags(1), vec!["db"]);
    }

    #[test]
    fn popular_tag_ties_follow_declared_order() {
        let overrides = DisplayNameOverrides::default();
        let mut a = raw("a", &[], &[]);
        a.tags = vec!["web".into(), "db".into(), "web".into()];
        let index = TechnologyIndex::from_raw(vec![a], &overrides).unwrap();
        assert_eq!(index.popular_tags(10), vec!["web", "db"]);

        let mut b = raw("b", &[], &[]);
        b.tags = vec!["zsh".into()];
        let mut c = raw("c", &[], &[]);
        c.tags = vec!["shell".into(), "zsh".into()];
        let index = TechnologyIndex::from_raw(vec![b, c], &overrides).unwrap();
        assert_eq!(index.popular_tags(10), vec!["zsh", "shell"]);
    }

    #[test]
    fn by_id_is_case_sensitive() {
        let overrides = DisplayNameOverrides::default();
        let index = TechnologyIndex::from_raw(vec![raw("java", &[], &[])], &overrides).unwrap();
        assert!(index.by_id("java").is_some());
        assert!(index.by_id("Java").is_none());
    }
}
