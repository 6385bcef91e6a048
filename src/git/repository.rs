//! Repository root discovery and directory layout

use crate::{
    config::{CONFIG_FILE_NAME, DEFAULT_SOURCE_DIR, InstallerConfig},
    debug,
};
use anyhow::{Context, Result, bail};
use glob::Pattern;
use std::path::{Path, PathBuf};

/// How the repository root was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootSource {
    /// Given on the command line
    Explicit,
    /// Two levels above the running executable
    ToolLocation,
    /// Nearest matching ancestor of the working directory
    WorkingDirectory,
}

impl std::fmt::Display for RootSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Explicit => write!(f, "--root"),
            Self::ToolLocation => write!(f, "executable location"),
            Self::WorkingDirectory => write!(f, "working directory"),
        }
    }
}

/// Resolved directories of a repository
#[derive(Debug, Clone)]
pub struct RepoLayout {
    /// Repository root
    pub root: PathBuf,
    /// How the root was found
    pub root_source: RootSource,
    /// Directory holding the hook scripts
    pub source_dir: PathBuf,
    /// Git hooks directory
    pub hooks_dir: PathBuf,
    /// File name patterns that are never installed
    pub exclude: Vec<Pattern>,
}

impl RepoLayout {
    /// Build a layout from a root and its configuration
    ///
    /// # Errors
    ///
    /// Returns an error if an exclude pattern does not compile
    pub fn from_config(root: &Path, root_source: RootSource, config: &InstallerConfig) -> Result<Self> {
        Ok(Self {
            root: root.to_path_buf(),
            root_source,
            source_dir: root.join(&config.paths.source),
            hooks_dir: root.join(&config.paths.hooks),
            exclude: config.exclude_patterns()?,
        })
    }

    /// Resolve the repository root and load its configuration
    ///
    /// # Errors
    ///
    /// Returns an error if no root can be found or its configuration is
    /// invalid
    pub fn discover(explicit_root: Option<&Path>) -> Result<Self> {
        let current_exe = std::env::current_exe().ok();
        let current_dir = std::env::current_dir().context("Failed to get current working directory")?;

        let (root, root_source) =
            resolve_root(explicit_root, current_exe.as_deref(), &current_dir)?;
        debug::log(format!("repository root: {} (from {root_source})", root.display()));

        let config = InstallerConfig::load(&root)?;
        let layout = Self::from_config(&root, root_source, &config)?;
        debug::log(format!(
            "source: {}, hooks: {}",
            layout.source_dir.display(),
            layout.hooks_dir.display()
        ));
        Ok(layout)
    }
}

/// Locate the repository root
///
/// An explicit root wins. Otherwise the directory two levels above the
/// executable is used when it looks like a repository root, then the nearest
/// such ancestor of `current_dir`.
///
/// # Errors
///
/// Returns an error if no candidate looks like a repository root
pub fn resolve_root(
    explicit_root: Option<&Path>,
    current_exe: Option<&Path>,
    current_dir: &Path,
) -> Result<(PathBuf, RootSource)> {
    if let Some(root) = explicit_root {
        let root = if root.is_absolute() {
            root.to_path_buf()
        } else {
            current_dir.join(root)
        };
        if !root.is_dir() {
            bail!("Repository root does not exist: {}", root.display());
        }
        return Ok((root, RootSource::Explicit));
    }

    if let Some(root) = current_exe
        .and_then(root_from_tool_path)
        .filter(|candidate| looks_like_root(candidate))
    {
        return Ok((root, RootSource::ToolLocation));
    }

    if let Some(root) = current_dir.ancestors().find(|dir| looks_like_root(dir)) {
        return Ok((root.to_path_buf(), RootSource::WorkingDirectory));
    }

    bail!(
        "Could not locate the repository root: no {DEFAULT_SOURCE_DIR} directory or {CONFIG_FILE_NAME} found above {}",
        current_dir.display()
    )
}

/// The directory two levels above a tool's own path
///
/// For `<root>/scripts/install-hooks` this is `<root>`.
#[must_use]
pub fn root_from_tool_path(tool: &Path) -> Option<PathBuf> {
    tool.parent()?.parent().map(Path::to_path_buf)
}

/// Whether a directory holds the hook source directory or an installer
/// config file
#[must_use]
pub fn looks_like_root(dir: &Path) -> bool {
    dir.join(DEFAULT_SOURCE_DIR).is_dir() || dir.join(CONFIG_FILE_NAME).is_file()
}

/// Value of `core.hooksPath` from the repository's git configuration
///
/// When set, git runs hooks from that path instead of `.git/hooks`.
///
/// # Errors
///
/// Returns an error if the repository or its configuration cannot be opened
pub fn configured_hooks_path(root: &Path) -> Result<Option<String>> {
    let repo = git2::Repository::open(root)
        .with_context(|| format!("Failed to open git repository: {}", root.display()))?;
    let config = repo.config().context("Failed to read git configuration")?;

    match config.get_string("core.hooksPath") {
        Ok(path) => Ok(Some(path)),
        Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(None),
        Err(e) => Err(e).context("Failed to read core.hooksPath"),
    }
}
