//! Payload manifest: the packaging pipeline's description of the bundled
//! tool tree.

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Manifest file name, relative to the payload root.
pub const MANIFEST_FILE: &str = "manifest.toml";

/// Parsed payload manifest.
#[derive(Debug, Clone, Deserialize)]
pub struct PayloadManifest {
    pub payload: PayloadInfo,
    /// Tool name to payload-relative executable path.
    #[serde(default)]
    pub tools: BTreeMap<String, String>,
}

/// Identity of the bundled distribution.
#[derive(Debug, Clone, Deserialize)]
pub struct PayloadInfo {
    pub version: String,
}

impl PayloadManifest {
    /// Loads and parses the manifest under a payload root.
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(MANIFEST_FILE);
        let content = fs::read_to_string(&path)
            .with_context(|| format!("failed to read payload manifest at {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("invalid payload manifest at {}", path.display()))
    }

    /// Returns the absolute path of a bundled tool.
    pub fn tool_path(&self, root: &Path, tool: &str) -> Result<PathBuf> {
        let relative = self
            .tools
            .get(tool)
            .ok_or_else(|| anyhow!("tool `{tool}` is not listed in the payload manifest"))?;
        Ok(root.join(relative))
    }
}
