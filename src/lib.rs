//! Hook Installer - copies repository-local git hooks into `.git/hooks`
//!
//! Every regular file of `scripts/git-hooks/` is copied under the same name
//! into the repository's git hooks directory and marked executable.

/// Command-line interface
pub mod cli;
/// Shell completions
pub mod completions;
/// Installer configuration
pub mod config;
/// Debug output toggle
pub mod debug;
/// Health checks
pub mod doctor;
/// Install errors
pub mod error;
/// Repository layout and installation
pub mod git;
/// Hook discovery and status
pub mod hooks;
/// Output formatting
pub mod output;

pub use config::*;
pub use error::{InstallError, InstallStage};
pub use git::{HookInstaller, InstallReport, InstalledHook, RepoLayout, install};
