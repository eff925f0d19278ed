// Icon URL generation against the bundled catalog.
mod support;
#[path = "support/common.rs"]
mod common;

use anyhow::Result;
use devfolio::{BuildMode, LogoUrls, SiteConfig, TechLogo};

use common::{bundled_index, index_from, raw_entry};

#[test]
fn every_entry_gets_a_well_formed_url() {
    let index = bundled_index();
    let urls = LogoUrls::new("/p77", "icons");
    for entry in index.entries() {
        let url = urls.generate(entry);
        let id = &entry.canonical_id;
        let prefix = format!("/p77/icons/{id}/{id}-");
        assert!(url.starts_with(&prefix), "{url}");
        let variant = url
            .strip_prefix(&prefix)
            .and_then(|rest| rest.strip_suffix(".svg"))
            .unwrap();
        if entry.icon_variants.iter().any(|v| v == "original") {
            assert_eq!(variant, "original");
        } else if let Some(first) = entry.icon_variants.first() {
            assert_eq!(variant, first);
        } else {
            assert_eq!(variant, "original");
        }
    }
}

#[test]
fn entry_without_variants_assumes_original() -> Result<()> {
    let index = index_from(vec![raw_entry("zig", &[], &[])])?;
    let urls = LogoUrls::new("", "icons");
    let entry = index.by_id("zig").unwrap();
    assert_eq!(urls.generate(entry), "/icons/zig/zig-original.svg");
    Ok(())
}

#[test]
fn nextjs_standard_and_override_urls() {
    let index = bundled_index();
    let defaults = SiteConfig::default();
    let mut config = defaults.clone();
    config.site.base_path = "/p77".to_string();
    let urls = config.logo_urls(BuildMode::Production);

    let standard = urls.tech_logo(&index, "Next.js", Some("nextjs"), None);
    assert_eq!(
        standard.url(),
        Some("/p77/icons/nextjs/nextjs-original.svg")
    );

    let wordmark = urls.tech_logo(
        &index,
        "Next.js",
        Some("nextjs"),
        Some("/icons/nextjs/nextjs-original-wordmark.svg"),
    );
    assert_eq!(
        wordmark.url(),
        Some("/p77/icons/nextjs/nextjs-original-wordmark.svg")
    );

    let dev = defaults.logo_urls(BuildMode::Development);
    assert_eq!(
        dev.tech_logo(&index, "Next.js", None, None).url(),
        Some("/icons/nextjs/nextjs-original.svg")
    );
}

#[test]
fn uploaded_logo_is_used_verbatim() {
    let index = bundled_index();
    let urls = LogoUrls::new("/p77", "icons");
    let upload = "https://storage.example.com/logos/acme.png";
    let logo = urls.tech_logo(&index, "Acme DSL", None, Some(upload));
    assert_eq!(logo.url(), Some(upload));
}

#[test]
fn unknown_technology_falls_back_to_glyph() {
    let index = bundled_index();
    let urls = LogoUrls::new("", "icons");
    assert_eq!(
        urls.tech_logo(&index, "agile/scrum", None, None),
        TechLogo::Glyph { initial: 'A' }
    );
    // The stored lookup name wins over the display name.
    assert_eq!(
        urls.tech_logo(&index, "My Postgres", Some("postgresql"), None)
            .url(),
        Some("/icons/postgresql/postgresql-original.svg")
    );
}
