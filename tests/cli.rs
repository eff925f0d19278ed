// End-to-end behavior of the devfolio binary.
mod support;
#[path = "support/common.rs"]
mod common;

use anyhow::{Context, Result};
use serde_json::{Value, json};
use std::fs;
use std::process::Command;
use support::{devfolio_binary, repo_root, run_command};
use tempfile::TempDir;

use common::{SiteFixture, sample_document};

fn stdout_json(output: &std::process::Output) -> Result<Value> {
    serde_json::from_slice(&output.stdout).context("stdout should be JSON")
}

#[test]
fn build_writes_index_and_copies_public_assets() -> Result<()> {
    let site = SiteFixture::new(&sample_document())?;
    let mut cmd = Command::new(devfolio_binary());
    cmd.args(["build", "--production"]);
    let output = run_command(cmd, site.root())?;
    assert!(
        output.status.success(),
        "build failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let summary = stdout_json(&output)?;
    assert_eq!(summary["blocks"], json!(6));
    assert_eq!(summary["copied_files"], json!(2));

    let out = site.root().join("out");
    let html = fs::read_to_string(out.join("index.html"))?;
    assert!(html.contains("<title>Fixture</title>"));
    assert!(html.contains("/p77/style.css"));
    assert!(out.join("icons/rust/rust-original.svg").is_file());
    Ok(())
}

#[test]
fn build_honours_explicit_root_and_out() -> Result<()> {
    let site = SiteFixture::new(&json!({}))?;
    let elsewhere = TempDir::new()?;
    let out = elsewhere.path().join("dist");
    let mut cmd = Command::new(devfolio_binary());
    cmd.arg("build")
        .arg("--root")
        .arg(site.root())
        .arg("--out")
        .arg(&out);
    let output = run_command(cmd, elsewhere.path())?;
    assert!(output.status.success());
    assert_eq!(stdout_json(&output)?["blocks"], json!(0));

    let html = fs::read_to_string(out.join("index.html"))?;
    assert!(html.contains("Your portfolio will appear here"));
    // Development builds carry no base path.
    assert!(html.contains("href=\"/style.css\""));
    Ok(())
}

#[test]
fn build_outside_a_site_fails() -> Result<()> {
    let empty = TempDir::new()?;
    let mut cmd = Command::new(devfolio_binary());
    cmd.arg("build");
    let output = run_command(cmd, empty.path())?;
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("site.toml"), "{stderr}");
    Ok(())
}

#[test]
fn lookup_reports_matches_and_misses() -> Result<()> {
    let mut cmd = Command::new(devfolio_binary());
    cmd.args(["lookup", "Next.js", "Agile/Scrum"]);
    let output = run_command(cmd, &repo_root())?;
    assert!(output.status.success());

    let results = stdout_json(&output)?;
    assert_eq!(results[0]["canonical_id"], json!("nextjs"));
    assert_eq!(results[0]["matched_by"], json!("label"));
    assert_eq!(results[0]["logo_url"], json!("/icons/nextjs/nextjs-original.svg"));
    assert_eq!(results[0]["svg_variants"].as_array().map(Vec::len), Some(2));
    assert_eq!(results[1]["found"], json!(false));
    assert_eq!(results[1]["logo"], json!({"kind": "glyph", "initial": "A"}));
    Ok(())
}

#[test]
fn search_and_tags_work_without_a_site() -> Result<()> {
    let empty = TempDir::new()?;
    let mut cmd = Command::new(devfolio_binary());
    cmd.args(["search", "post"]);
    let output = run_command(cmd, empty.path())?;
    assert!(output.status.success());
    assert_eq!(stdout_json(&output)?[0]["canonical_id"], json!("postgresql"));

    let mut cmd = Command::new(devfolio_binary());
    cmd.args(["tags", "--popular", "2"]);
    let output = run_command(cmd, empty.path())?;
    assert!(output.status.success());
    assert_eq!(stdout_json(&output)?.as_array().map(Vec::len), Some(2));
    Ok(())
}
