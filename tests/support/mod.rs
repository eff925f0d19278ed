#![allow(dead_code)]

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

pub fn repo_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

pub fn devfolio_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_devfolio"))
}

pub fn schema_validate_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_schema-validate"))
}

// Runs a command with logging and site discovery pinned so results do not
// depend on the caller's environment.
pub fn run_command(mut cmd: Command, cwd: &Path) -> Result<Output> {
    cmd.current_dir(cwd)
        .env_remove("DEVFOLIO_ROOT")
        .env_remove("DEVFOLIO_ENV")
        .env("DEVFOLIO_LOG", "warn");
    cmd.output()
        .with_context(|| format!("failed to run {:?}", cmd.get_program()))
}
