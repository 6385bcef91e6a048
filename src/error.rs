//! Errors raised while installing hooks

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Step of a single hook installation that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallStage {
    /// Copying the file content into the hooks directory
    Copy,
    /// Marking the installed copy executable
    Permissions,
}

impl fmt::Display for InstallStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Copy => write!(f, "copy hook"),
            Self::Permissions => write!(f, "set executable permission on"),
        }
    }
}

/// Failure of an install run
#[derive(Debug, Error)]
pub enum InstallError {
    /// The git hooks directory is absent or not a directory
    #[error(
        "git hooks directory does not exist: {} (is this an initialized git repository?)",
        .0.display()
    )]
    DestinationMissing(PathBuf),

    /// The hook source directory is absent or not a directory
    #[error("hook source directory does not exist: {}", .0.display())]
    SourceMissing(PathBuf),

    /// The hook source directory could not be enumerated
    #[error("failed to read hook source directory: {}", .path.display())]
    SourceUnreadable {
        /// Source directory
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Copying or chmod-ing a specific hook failed
    #[error("failed to {stage} '{name}'")]
    IoFailure {
        /// Name of the hook being installed
        name: String,
        /// Step that failed
        stage: InstallStage,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },
}

impl InstallError {
    /// Process exit code reported for this failure
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::DestinationMissing(_) | Self::SourceMissing(_) => 1,
            Self::SourceUnreadable { .. } | Self::IoFailure { .. } => 2,
        }
    }

    /// Name of the hook involved, if the failure is tied to one file
    #[must_use]
    pub fn hook_name(&self) -> Option<&str> {
        match self {
            Self::IoFailure { name, .. } => Some(name),
            _ => None,
        }
    }
}
