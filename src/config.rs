//! `site.toml` loading.
//!
//! Every key is optional; a missing file yields the defaults. Relative paths
//! resolve against the site root.

use crate::catalog::{
    BUNDLED_CATALOG, BUNDLED_DISPLAY_NAMES, DisplayNameOverrides, TechnologyIndex,
    model::parse_raw_catalog,
};
use crate::document::{DEFAULT_DOCUMENT_PATH, LayoutKind};
use crate::{SITE_SENTINEL, logo::LogoUrls};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable that switches a build to production mode.
pub const ENV_BUILD_ENV: &str = "DEVFOLIO_ENV";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BuildMode {
    #[default]
    Development,
    /// Applies `site.base_path` to every generated URL.
    Production,
}

impl BuildMode {
    /// `--production` wins; otherwise `DEVFOLIO_ENV=production`.
    pub fn detect(production_flag: bool) -> Self {
        if production_flag {
            return BuildMode::Production;
        }
        match env::var(ENV_BUILD_ENV) {
            Ok(value) if value.trim().eq_ignore_ascii_case("production") => BuildMode::Production,
            _ => BuildMode::Development,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteSection {
    pub title: Option<String>,
    pub base_path: String,
    pub icon_dir: String,
    pub resume_file_name: String,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            title: None,
            base_path: String::new(),
            icon_dir: "icons".to_string(),
            resume_file_name: "resume.pdf".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsSection {
    pub document: PathBuf,
    /// Unset means the catalog compiled into the binary.
    pub catalog: Option<PathBuf>,
    pub display_names: Option<PathBuf>,
    pub public: PathBuf,
    pub output: PathBuf,
}

impl Default for PathsSection {
    fn default() -> Self {
        Self {
            document: PathBuf::from(DEFAULT_DOCUMENT_PATH),
            catalog: None,
            display_names: None,
            public: PathBuf::from("public"),
            output: PathBuf::from("out"),
        }
    }
}

/// Layouts for the two built-in item sections.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    pub experience: LayoutKind,
    pub education: LayoutKind,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    pub site: SiteSection,
    pub paths: PathsSection,
    pub layout: LayoutConfig,
}

impl SiteConfig {
    pub fn parse(data: &str) -> Result<Self> {
        toml::from_str(data).context("parsing site configuration")
    }

    /// Read `<root>/site.toml`, falling back to defaults when it is absent.
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(SITE_SENTINEL);
        if !path.is_file() {
            debug!(path = %path.display(), "no site config, using defaults");
            return Ok(Self::default());
        }
        let data = fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::parse(&data).with_context(|| format!("loading {}", path.display()))
    }

    /// Base path in effect for `mode`: empty outside production.
    pub fn base_path(&self, mode: BuildMode) -> String {
        match mode {
            BuildMode::Production => self.site.base_path.trim_end_matches('/').to_string(),
            BuildMode::Development => String::new(),
        }
    }

    pub fn logo_urls(&self, mode: BuildMode) -> LogoUrls {
        LogoUrls::new(&self.base_path(mode), &self.site.icon_dir)
    }

    pub fn document_path(&self, root: &Path) -> PathBuf {
        root.join(&self.paths.document)
    }

    pub fn public_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.paths.public)
    }

    pub fn output_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.paths.output)
    }

    /// Load the configured override table, or the bundled one.
    pub fn display_names(&self, root: &Path) -> Result<DisplayNameOverrides> {
        match &self.paths.display_names {
            Some(path) => DisplayNameOverrides::load(&root.join(path)),
            None => DisplayNameOverrides::parse(BUNDLED_DISPLAY_NAMES)
                .context("parsing bundled display names"),
        }
    }

    /// Build the technology index from the configured catalog, or the bundled one.
    pub fn technology_index(&self, root: &Path) -> Result<TechnologyIndex> {
        let overrides = self.display_names(root)?;
        match &self.paths.catalog {
            Some(path) => TechnologyIndex::load(&root.join(path), &overrides),
            None => {
                let raw = parse_raw_catalog(BUNDLED_CATALOG).context("parsing bundled catalog")?;
                TechnologyIndex::from_raw(raw, &overrides)
            }
        }
    }
}
