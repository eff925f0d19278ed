//! Static export: render the page and lay out the output directory.

use crate::config::{BuildMode, SiteConfig};
use crate::document::{load_document, normalize};
use crate::render::{RenderContext, render_page, render_sections};
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

const INDEX_FILE: &str = "index.html";

/// What a build produced.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ExportSummary {
    pub output: PathBuf,
    pub index: PathBuf,
    /// Rendered sections; zero when the placeholder was emitted.
    pub blocks: usize,
    pub copied_files: usize,
}

/// Build the site rooted at `root` into `output` (or the configured output
/// directory).
pub fn export_site(
    root: &Path,
    config: &SiteConfig,
    mode: BuildMode,
    output: Option<&Path>,
) -> Result<ExportSummary> {
    let output = match output {
        Some(dir) => dir.to_path_buf(),
        None => config.output_dir(root),
    };
    let index = config.technology_index(root)?;
    let document = load_document(&config.document_path(root))?;
    let portfolio = normalize(&document);

    let ctx = RenderContext::new(&index, config, mode);
    let body = render_sections(&portfolio, &ctx);
    let html = render_page(&portfolio, &body, &ctx).into_string();

    fs::create_dir_all(&output)
        .with_context(|| format!("creating output directory {}", output.display()))?;
    let index_path = output.join(INDEX_FILE);
    write_atomic(&index_path, html.as_bytes())?;

    let public = config.public_dir(root);
    let copied_files = if public.is_dir() {
        copy_tree(&public, &output)?
    } else {
        debug!(path = %public.display(), "no public directory to copy");
        0
    };

    let summary = ExportSummary {
        output,
        index: index_path,
        blocks: body.block_count(),
        copied_files,
    };
    info!(
        output = %summary.output.display(),
        blocks = summary.blocks,
        copied_files = summary.copied_files,
        "site exported"
    );
    Ok(summary)
}

/// Write via a sibling temp file so readers never see a partial page.
fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let dir = path
        .parent()
        .with_context(|| format!("{} has no parent directory", path.display()))?;
    let mut file = NamedTempFile::new_in(dir)
        .with_context(|| format!("creating temp file in {}", dir.display()))?;
    file.write_all(contents)
        .with_context(|| format!("writing {}", path.display()))?;
    file.persist(path)
        .with_context(|| format!("persisting {}", path.display()))?;
    Ok(())
}

/// Recursively copy `from` into `to`, returning the number of files copied.
fn copy_tree(from: &Path, to: &Path) -> Result<usize> {
    fs::create_dir_all(to).with_context(|| format!("creating {}", to.display()))?;
    let mut copied = 0;
    for entry in fs::read_dir(from).with_context(|| format!("reading {}", from.display()))? {
        let entry = entry.with_context(|| format!("reading {}", from.display()))?;
        let source = entry.path();
        let target = to.join(entry.file_name());
        let file_type = entry
            .file_type()
            .with_context(|| format!("inspecting {}", source.display()))?;
        if file_type.is_dir() {
            copied += copy_tree(&source, &target)?;
        } else {
            fs::copy(&source, &target).with_context(|| {
                format!("copying {} to {}", source.display(), target.display())
            })?;
            copied += 1;
        }
    }
    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn copy_tree_counts_nested_files() {
        let temp = TempDir::new().unwrap();
        let from = temp.path().join("public");
        fs::create_dir_all(from.join("icons/rust")).unwrap();
        fs::write(from.join("style.css"), "body {}").unwrap();
        fs::write(from.join("icons/rust/rust-original.svg"), "<svg/>").unwrap();

        let to = temp.path().join("out");
        assert_eq!(copy_tree(&from, &to).unwrap(), 2);
        assert!(to.join("icons/rust/rust-original.svg").is_file());
    }

    #[test]
    fn write_atomic_replaces_existing_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(INDEX_FILE);
        fs::write(&path, "old").unwrap();
        write_atomic(&path, b"new").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn missing_document_is_an_error() {
        let temp = TempDir::new().unwrap();
        let err = export_site(
            temp.path(),
            &SiteConfig::default(),
            BuildMode::Development,
            None,
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("portfolio.json"));
    }
}
