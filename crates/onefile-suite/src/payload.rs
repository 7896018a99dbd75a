//! Locates the packaged tool tree the entry functions delegate to.

use anyhow::{anyhow, Context, Result};
use std::env;
use std::path::PathBuf;

/// Environment variable overriding the payload root directory.
pub const PAYLOAD_DIR_ENV: &str = "ONEFILE_PAYLOAD_DIR";

/// Directory name of the payload when it sits next to the launcher binary.
pub const DEFAULT_PAYLOAD_DIR: &str = "payload";

/// Resolves the payload root directory.
pub fn payload_root() -> Result<PathBuf> {
    // Allow override via ONEFILE_PAYLOAD_DIR for relocated installs and testing
    if let Some(dir) = env::var_os(PAYLOAD_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }

    let exe = env::current_exe().context("failed to locate the running executable")?;
    exe.parent()
        .map(|dir| dir.join(DEFAULT_PAYLOAD_DIR))
        .ok_or_else(|| anyhow!("executable path {} has no parent directory", exe.display()))
}
