//! Workspace configuration file
//!
//! Stored as TOML at `<config dir>/p4sync/config.toml` unless `--config` points
//! elsewhere.

use anyhow::{Context, Result};
use depot_core::{generate_client_view, Populate, Publish};
use selector::FilterSet;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Complete configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub workspace: WorkspaceSection,

    #[serde(default)]
    pub filters: FilterSet,

    #[serde(default)]
    pub populate: Populate,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish: Option<Publish>,
}

/// Client workspace settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceSection {
    /// Client (workspace) name used as the view's client root
    #[serde(default)]
    pub client_root: String,

    /// Depot paths to map, one per line
    #[serde(default)]
    pub depot_spec: String,

    /// File whose presence marks a branch root
    #[serde(default = "default_marker")]
    pub marker_file: String,
}

impl Default for WorkspaceSection {
    fn default() -> Self {
        Self {
            client_root: String::new(),
            depot_spec: String::new(),
            marker_file: default_marker(),
        }
    }
}

fn default_marker() -> String {
    "build.xml".to_string()
}

impl Config {
    /// Check values that would otherwise fail later, mid-sync
    pub fn validate(&self) -> Result<()> {
        generate_client_view(&self.workspace.depot_spec, &self.workspace.client_root)
            .context("workspace.depot_spec does not produce a valid view")?;

        if self.workspace.marker_file.trim().is_empty() {
            anyhow::bail!("workspace.marker_file must not be empty");
        }
        if self.filters.latest_change_only && self.filters.per_change_only {
            tracing::warn!("latest_change_only overrides per_change_only");
        }
        Ok(())
    }
}

/// Default config file location
pub fn config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("p4sync").join("config.toml"))
}

/// Resolve the file to use: the explicit one, or the default location
pub fn resolve_path(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => config_file_path().context("Could not determine config file path"),
    }
}

/// Load configuration
///
/// An explicit path must exist; a missing default file yields the defaults.
pub fn load(explicit: Option<&Path>) -> Result<Config> {
    let path = resolve_path(explicit)?;

    if !path.exists() {
        if explicit.is_some() {
            anyhow::bail!("Config file not found: {}", path.display());
        }
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(Config::default());
    }

    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config: Config = toml::from_str(&text)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// Write configuration, creating parent directories
pub fn save(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }
    let text = toml::to_string_pretty(config).context("Failed to serialize config")?;
    std::fs::write(path, text)
        .with_context(|| format!("Failed to write config file {}", path.display()))
}

/// Create the config file with defaults if it doesn't exist
pub fn init_if_missing(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    save(&Config::default(), path)?;
    Ok(true)
}

/// Annotated example configuration
pub fn example_config() -> &'static str {
    r#"[workspace]
client_root = "ci-main"
depot_spec = """
//depot/proj/main/...
-//depot/proj/main/generated/...
//depot/libs/common/...
"""
marker_file = "build.xml"

[filters]
latest_change_only = false
per_change_only = false

[[filters.rules]]
type = "user"
name = "buildbot"

[[filters.rules]]
type = "path"
prefix = "//depot/proj/main/docs"

[[filters.rules]]
type = "pattern"
patterns = ['//depot/proj/main/src/.*\.(c|h)']
case_sensitive = true

[populate]
type = "auto_clean"

[populate.options]
quiet = true
parallel = 4

[publish]
type = "shelve"
description = "CI build"
"#
}
