use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Command-line interface for the hook installer
#[derive(Parser)]
#[command(name = "hook-installer")]
#[command(about = "Install repository git hooks from scripts/git-hooks into .git/hooks")]
pub struct Cli {
    /// Repository root (default: two levels above this executable, then the
    /// nearest ancestor of the current directory holding scripts/git-hooks)
    #[arg(long, global = true, value_name = "PATH")]
    pub root: Option<PathBuf>,

    /// Print diagnostic output to stderr
    #[arg(long, global = true)]
    pub debug: bool,

    /// Subcommand to execute (installs hooks when omitted)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Copy every hook script into the git hooks directory
    Install,
    /// Show each hook script and whether its installed copy is current
    List {
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check the repository layout and installed hooks
    Doctor,
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
    /// Print version information
    Version,
}
