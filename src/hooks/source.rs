//! Discovery of installable hook files in the source directory

use crate::{debug, error::InstallError};
use glob::Pattern;
use serde::Serialize;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// A regular file in the source directory that will be installed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookFile {
    /// Display name of the hook (the file name)
    pub name: String,
    /// Raw file name, used to build the destination path
    pub file_name: OsString,
    /// Full path of the source file
    pub path: PathBuf,
}

/// Why a source directory entry is not installed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case", tag = "reason", content = "detail")]
pub enum SkipReason {
    /// Subdirectory, symlink to a directory, dangling symlink or special file
    NotRegularFile,
    /// Matched an exclude pattern from the configuration
    Excluded(String),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotRegularFile => write!(f, "not a regular file"),
            Self::Excluded(pattern) => write!(f, "excluded by pattern '{pattern}'"),
        }
    }
}

/// Result of scanning a source directory
#[derive(Debug, Clone, Default)]
pub struct SourceScan {
    /// Installable hooks, sorted by name
    pub hooks: Vec<HookFile>,
    /// Entries left alone, sorted by name
    pub skipped: Vec<(String, SkipReason)>,
}

/// Enumerate the direct entries of `source_dir`
///
/// Symlinks are followed: a link to a regular file is installable, links
/// to directories and dangling links are skipped.
///
/// # Errors
///
/// Returns [`InstallError::SourceMissing`] if the directory does not exist
/// and [`InstallError::SourceUnreadable`] if it cannot be listed
pub fn scan_source(source_dir: &Path, exclude: &[Pattern]) -> Result<SourceScan, InstallError> {
    if !source_dir.is_dir() {
        return Err(InstallError::SourceMissing(source_dir.to_path_buf()));
    }

    let unreadable = |source: std::io::Error| InstallError::SourceUnreadable {
        path: source_dir.to_path_buf(),
        source,
    };

    let mut scan = SourceScan::default();

    for entry in fs::read_dir(source_dir).map_err(unreadable)? {
        let entry = entry.map_err(unreadable)?;
        let path = entry.path();
        let file_name = entry.file_name();
        let name = file_name.to_string_lossy().into_owned();

        // fs::metadata follows symlinks; a dangling link errors out here
        let is_file = fs::metadata(&path).is_ok_and(|meta| meta.is_file());
        if !is_file {
            debug::log(format!("skipping {name}: not a regular file"));
            scan.skipped.push((name, SkipReason::NotRegularFile));
            continue;
        }

        if let Some(pattern) = exclude.iter().find(|p| p.matches(&name)) {
            debug::log(format!("skipping {name}: excluded by '{}'", pattern.as_str()));
            scan.skipped
                .push((name, SkipReason::Excluded(pattern.as_str().to_string())));
            continue;
        }

        scan.hooks.push(HookFile {
            name,
            file_name,
            path,
        });
    }

    scan.hooks.sort_by(|a, b| a.name.cmp(&b.name));
    scan.skipped.sort_by(|a, b| a.0.cmp(&b.0));

    Ok(scan)
}
