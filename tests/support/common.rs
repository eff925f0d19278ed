#![allow(dead_code)]

use anyhow::Result;
use devfolio::catalog::RawTechnology;
use devfolio::{
    BuildMode, DisplayNameOverrides, PageBody, PortfolioDocument, RenderContext, SiteConfig,
    TechnologyIndex, normalize, render_page, render_sections,
};
use serde_json::{Value, json};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

use crate::support::repo_root;

pub fn bundled_index() -> TechnologyIndex {
    TechnologyIndex::bundled().expect("bundled catalog indexes")
}

pub fn raw_entry(name: &str, altnames: &[&str], svg: &[&str]) -> RawTechnology {
    serde_json::from_value(json!({
        "name": name,
        "altnames": altnames,
        "tags": ["fixture"],
        "versions": {"svg": svg, "font": []},
    }))
    .expect("fixture entry deserializes")
}

pub fn index_from(entries: Vec<RawTechnology>) -> Result<TechnologyIndex> {
    TechnologyIndex::from_raw(entries, &DisplayNameOverrides::default())
}

pub fn sample_document() -> Value {
    let path = repo_root().join("content/portfolio.json");
    let data = fs::read_to_string(&path).expect("sample document readable");
    serde_json::from_str(&data).expect("sample document parses")
}

pub struct Rendered {
    pub body: PageBody,
    pub html: String,
}

impl Rendered {
    pub fn keys(&self) -> Vec<String> {
        match &self.body {
            PageBody::Placeholder(_) => Vec::new(),
            PageBody::Sections(blocks) => blocks
                .iter()
                .map(|block| block.key.as_str().to_string())
                .collect(),
        }
    }
}

pub fn render_document(doc: Value, config: &SiteConfig, mode: BuildMode) -> Result<Rendered> {
    let index = bundled_index();
    let doc: PortfolioDocument = serde_json::from_value(doc)?;
    let portfolio = normalize(&doc);
    let ctx = RenderContext::new(&index, config, mode);
    let body = render_sections(&portfolio, &ctx);
    let html = render_page(&portfolio, &body, &ctx).into_string();
    Ok(Rendered { body, html })
}

// Scratch site with a config, a document and a public directory.
pub struct SiteFixture {
    pub dir: TempDir,
}

impl SiteFixture {
    pub fn new(document: &Value) -> Result<Self> {
        let dir = TempDir::new()?;
        let root = dir.path();
        fs::write(
            root.join("site.toml"),
            "[site]\ntitle = \"Fixture\"\nbase_path = \"/p77\"\n",
        )?;
        fs::create_dir_all(root.join("content"))?;
        fs::write(
            root.join("content/portfolio.json"),
            serde_json::to_vec_pretty(document)?,
        )?;
        fs::create_dir_all(root.join("public/icons/rust"))?;
        fs::write(root.join("public/style.css"), "body {}")?;
        fs::write(root.join("public/icons/rust/rust-original.svg"), "<svg/>")?;
        Ok(Self { dir })
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }
}
