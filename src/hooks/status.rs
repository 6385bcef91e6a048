//! Comparison of source hooks against their installed copies

use crate::hooks::{HookFile, SourceScan};
use anyhow::{Context, Result};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

/// State of a source hook in the hooks directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum HookState {
    /// Identical content and executable
    Installed,
    /// Installed copy differs from the source
    Outdated,
    /// Identical content but the execute bit is missing
    NotExecutable,
    /// No installed copy
    Missing,
}

impl HookState {
    /// Whether the installed copy is usable as-is
    #[must_use]
    pub const fn is_current(self) -> bool {
        matches!(self, Self::Installed)
    }

    /// Short label
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Installed => "installed",
            Self::Outdated => "outdated",
            Self::NotExecutable => "not-executable",
            Self::Missing => "missing",
        }
    }
}

impl std::fmt::Display for HookState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status of one source hook
#[derive(Debug, Clone, Serialize)]
pub struct HookStatus {
    /// Hook name
    pub name: String,
    /// Source file
    pub source: PathBuf,
    /// Expected installed location
    pub target: PathBuf,
    /// SHA-256 of the source content, hex encoded
    pub source_digest: String,
    /// SHA-256 of the installed content, if present
    pub installed_digest: Option<String>,
    /// Resulting state
    pub state: HookState,
}

/// Compute the status of every hook in a scan
///
/// # Errors
///
/// Returns an error if a source file or an existing installed copy cannot be
/// read
pub fn inspect(scan: &SourceScan, hooks_dir: &Path) -> Result<Vec<HookStatus>> {
    scan.hooks
        .iter()
        .map(|hook| inspect_hook(hook, hooks_dir))
        .collect()
}

fn inspect_hook(hook: &HookFile, hooks_dir: &Path) -> Result<HookStatus> {
    let target = hooks_dir.join(&hook.file_name);
    let source_digest = file_digest(&hook.path)?;

    let (installed_digest, state) = if target.is_file() {
        let installed = file_digest(&target)?;
        let state = if installed != source_digest {
            HookState::Outdated
        } else if is_executable(&target)? {
            HookState::Installed
        } else {
            HookState::NotExecutable
        };
        (Some(installed), state)
    } else {
        (None, HookState::Missing)
    };

    Ok(HookStatus {
        name: hook.name.clone(),
        source: hook.path.clone(),
        target,
        source_digest,
        installed_digest,
        state,
    })
}

/// Hex-encoded SHA-256 of a file's content
///
/// # Errors
///
/// Returns an error if the file cannot be read
pub fn file_digest(path: &Path) -> Result<String> {
    let content =
        fs::read(path).with_context(|| format!("Failed to read hook file: {}", path.display()))?;
    Ok(hex::encode(Sha256::digest(&content)))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> Result<bool> {
    use std::os::unix::fs::PermissionsExt;

    let meta = fs::metadata(path)
        .with_context(|| format!("Failed to read metadata: {}", path.display()))?;
    Ok(meta.permissions().mode() & 0o100 != 0)
}

#[cfg(not(unix))]
#[allow(clippy::unnecessary_wraps)]
fn is_executable(_path: &Path) -> Result<bool> {
    Ok(true)
}
