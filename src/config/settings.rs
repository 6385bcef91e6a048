//! Repository-level installer configuration
//!
//! Handles the optional `hook-installer.toml` stored at the repository root.

use anyhow::{Context, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

/// File name of the installer configuration, relative to the repository root
pub const CONFIG_FILE_NAME: &str = "hook-installer.toml";

/// Default hook source directory, relative to the repository root
pub const DEFAULT_SOURCE_DIR: &str = "scripts/git-hooks";

/// Default git hooks directory, relative to the repository root
pub const DEFAULT_HOOKS_DIR: &str = ".git/hooks";

/// Installer configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct InstallerConfig {
    /// Directory layout
    #[serde(default)]
    pub paths: PathsConfig,
    /// Install behaviour
    #[serde(default)]
    pub install: InstallConfig,
}

/// Source and destination directories, relative to the repository root
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PathsConfig {
    /// Directory holding the hook scripts to install
    #[serde(default = "default_source")]
    pub source: PathBuf,
    /// Git hooks directory receiving the copies
    #[serde(default = "default_hooks")]
    pub hooks: PathBuf,
}

/// Install behaviour settings
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct InstallConfig {
    /// Glob patterns of source file names that are never installed
    #[serde(default)]
    pub exclude: Vec<String>,
}

fn default_source() -> PathBuf {
    PathBuf::from(DEFAULT_SOURCE_DIR)
}

fn default_hooks() -> PathBuf {
    PathBuf::from(DEFAULT_HOOKS_DIR)
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            hooks: default_hooks(),
        }
    }
}

impl InstallerConfig {
    /// Load the configuration stored at a repository root
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, parsed or
    /// validated
    pub fn load(root: &Path) -> Result<Self> {
        Self::from_file(root.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from a specific file
    ///
    /// A missing file yields the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Parse and validate configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or a setting is invalid
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse TOML")?;
        config.validate()?;
        Ok(config)
    }

    /// Check that configured paths stay inside the repository and patterns
    /// compile
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid setting
    pub fn validate(&self) -> Result<()> {
        validate_relative("paths.source", &self.paths.source)?;
        validate_relative("paths.hooks", &self.paths.hooks)?;
        self.exclude_patterns()?;
        Ok(())
    }

    /// Compile the exclude patterns
    ///
    /// # Errors
    ///
    /// Returns an error if a pattern is not a valid glob
    pub fn exclude_patterns(&self) -> Result<Vec<Pattern>> {
        self.install
            .exclude
            .iter()
            .map(|raw| {
                Pattern::new(raw).with_context(|| format!("Invalid exclude pattern: {raw}"))
            })
            .collect()
    }
}

fn validate_relative(key: &str, path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        bail!("{key} must not be empty");
    }
    if path.is_absolute() {
        bail!("{key} must be relative to the repository root: {}", path.display());
    }
    if path
        .components()
        .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)))
    {
        bail!("{key} must not leave the repository root: {}", path.display());
    }
    Ok(())
}
