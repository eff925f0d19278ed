use anyhow::{Result, bail};
use std::{
    env, fs,
    path::{Path, PathBuf},
};
use tracing_subscriber::EnvFilter;

pub mod catalog;
pub mod config;
pub mod document;
pub mod export;
pub mod links;
pub mod logo;
pub mod render;
mod schema_loader;

pub use catalog::{
    DisplayNameOverrides, MatchKind, ResolvedTechnology, TechnologyEntry, TechnologyIndex,
    format_name_for_display, resolve_display_name,
};
pub use config::{BuildMode, LayoutConfig, SiteConfig};
pub use document::{
    LayoutKind, LogoType, NormalizedPortfolio, PortfolioDocument, SectionKey, load_document,
    normalize,
};
pub use export::{ExportSummary, export_site};
pub use links::{LinkIcon, ensure_absolute_url, link_icon};
pub use logo::{LogoUrls, LogoVariant, TechLogo};
pub use render::{PageBody, RenderContext, RenderedBlock, render_page, render_sections};
pub use schema_loader::{SchemaKind, validate_against_schema};

/// File whose presence marks a site root.
pub const SITE_SENTINEL: &str = "site.toml";

/// Environment variable naming the site root explicitly.
pub const ENV_SITE_ROOT: &str = "DEVFOLIO_ROOT";

/// Environment variable holding the tracing filter for the binaries.
pub const ENV_LOG: &str = "DEVFOLIO_LOG";

fn is_site_root(candidate: &Path) -> bool {
    candidate.join(SITE_SENTINEL).is_file()
}

fn site_root_from_hint(hint: &str) -> Option<PathBuf> {
    if hint.is_empty() {
        return None;
    }
    let hint_path = PathBuf::from(hint);
    if !hint_path.exists() || !is_site_root(&hint_path) {
        return None;
    }
    fs::canonicalize(hint_path).ok()
}

fn search_upwards(start: &Path) -> Option<PathBuf> {
    let mut dir = fs::canonicalize(start).ok()?;
    loop {
        if is_site_root(&dir) {
            return Some(dir);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}

/// Locate the site root: `DEVFOLIO_ROOT` first, then the nearest ancestor of
/// `start` that holds a `site.toml`.
pub fn find_site_root(start: &Path) -> Result<PathBuf> {
    if let Ok(env_root) = env::var(ENV_SITE_ROOT) {
        if let Some(root) = site_root_from_hint(&env_root) {
            return Ok(root);
        }
    }

    if let Some(root) = search_upwards(start) {
        return Ok(root);
    }

    bail!(
        "Unable to locate a devfolio site (no {SITE_SENTINEL} above {}). Pass --root or set {ENV_SITE_ROOT}.",
        start.display()
    );
}

/// Install the stderr tracing subscriber used by every binary.
///
/// Reads the filter from `DEVFOLIO_LOG` and defaults to `warn`, keeping stdout
/// free for JSON output.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env(ENV_LOG).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
