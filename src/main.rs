//! Hook Installer - copies repository-local git hooks into `.git/hooks`

use anyhow::{Context, Result};
use clap::Parser;
use hook_installer::{
    InstallError,
    cli::{Cli, Commands},
    completions::generate_completions,
    debug, doctor,
    git::{HookInstaller, RepoLayout},
    hooks::{inspect, scan_source},
    output::formatter,
};
use serde_json::json;
use std::path::Path;
use std::process;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        let code = e
            .downcast_ref::<InstallError>()
            .map_or(1, InstallError::exit_code);
        process::exit(code);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        debug::enable();
    }

    let root = cli.root.as_deref();

    match cli.command.unwrap_or(Commands::Install) {
        Commands::Install => install_hooks(root),
        Commands::List { json } => list_hooks(root, json),
        Commands::Doctor => {
            let code = doctor::run_doctor(root);
            if code != 0 {
                process::exit(code);
            }
            Ok(())
        }
        Commands::Completions { shell } => {
            generate_completions(shell);
            Ok(())
        }
        Commands::Version => show_version(),
    }
}

/// Copy every hook script into the git hooks directory
fn install_hooks(root: Option<&Path>) -> Result<()> {
    let layout = RepoLayout::discover(root)?;
    let installer = HookInstaller::from_layout(&layout);

    let plan = installer.plan()?;
    let progress =
        formatter().create_progress_bar(u64::try_from(plan.hooks.len()).unwrap_or(u64::MAX));

    let result = installer.apply(&plan, |hook| {
        let line = formatter().installed(&hook.name);
        match &progress {
            Some(pb) => {
                pb.println(line);
                pb.inc(1);
            }
            None => println!("{line}"),
        }
    });

    if let Some(pb) = &progress {
        pb.finish_and_clear();
    }

    let report = result?;
    report.print_summary(installer.hooks_dir());

    Ok(())
}

/// Show every hook script with the state of its installed copy
fn list_hooks(root: Option<&Path>, json: bool) -> Result<()> {
    let layout = RepoLayout::discover(root)?;
    let scan = scan_source(&layout.source_dir, &layout.exclude)?;
    let statuses = inspect(&scan, &layout.hooks_dir).context("Failed to inspect hooks")?;

    if json {
        let skipped: Vec<_> = scan
            .skipped
            .iter()
            .map(|(name, reason)| json!({ "name": name, "skip": reason }))
            .collect();
        let document = json!({
            "root": layout.root,
            "source_dir": layout.source_dir,
            "hooks_dir": layout.hooks_dir,
            "hooks": statuses,
            "skipped": skipped,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&document).context("Failed to serialize hook list")?
        );
        return Ok(());
    }

    if statuses.is_empty() && scan.skipped.is_empty() {
        println!("No hook scripts found in {}", layout.source_dir.display());
        return Ok(());
    }

    println!(
        "{}",
        formatter().divider(&format!("Hook scripts in {}", layout.source_dir.display()))
    );

    for status in &statuses {
        println!("{} {}", status.name, formatter().hook_state(status.state));
    }

    for (name, reason) in &scan.skipped {
        println!("{} {name}: {reason}", formatter().skip());
    }

    Ok(())
}

/// Show version information
fn show_version() -> Result<()> {
    println!("{}", env!("CARGO_PKG_VERSION"));
    Ok(())
}
