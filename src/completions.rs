//! Shell completion generation module.

use clap::CommandFactory;
use clap_complete::Shell;
use std::io;

use crate::cli::Cli;

/// Name the completions are registered under
const BIN_NAME: &str = "hook-installer";

/// Generate shell completion scripts.
///
/// Outputs both instructions and the completion script to stdout.
pub fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();

    println!("# Shell completion for {BIN_NAME}");
    println!("#");
    println!("# To enable completions, add this to your shell config:");
    println!("#");

    match shell {
        Shell::Bash => {
            println!("# For bash (~/.bashrc):");
            println!("#   source <({BIN_NAME} completions bash)");
        }
        Shell::Zsh => {
            println!("# For zsh (~/.zshrc):");
            println!("#   {BIN_NAME} completions zsh > ~/.zsh/completions/_{BIN_NAME}");
            println!("#   # Ensure fpath includes ~/.zsh/completions");
        }
        Shell::Fish => {
            println!("# For fish (~/.config/fish/config.fish):");
            println!("#   {BIN_NAME} completions fish | source");
        }
        _ => {
            println!("# For {shell}:");
            println!("#   {BIN_NAME} completions {shell} > /path/to/completions/_{BIN_NAME}");
        }
    }

    println!();

    clap_complete::generate(shell, &mut cmd, BIN_NAME, &mut io::stdout());
}
