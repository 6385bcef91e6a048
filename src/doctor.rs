//! Health check and diagnostics module.

use crate::{
    git::{RepoLayout, configured_hooks_path},
    hooks::{HookState, inspect, scan_source},
    output::{CheckLevel, formatter},
};
use std::path::Path;

/// Accumulated outcome of the checks
#[derive(Debug, Default)]
struct Findings {
    errors: bool,
    warnings: bool,
}

impl Findings {
    fn line(&mut self, level: CheckLevel, message: impl std::fmt::Display) {
        match level {
            CheckLevel::Error => self.errors = true,
            CheckLevel::Warning => self.warnings = true,
            CheckLevel::Ok | CheckLevel::Info => {}
        }
        println!("  {} {message}", formatter().check(level));
    }
}

/// Run doctor command to check health and configuration.
///
/// Returns exit code: 0 if healthy, 1 if issues found.
#[must_use]
pub fn run_doctor(explicit_root: Option<&Path>) -> i32 {
    println!("{}", formatter().divider("hook-installer health check"));
    println!();

    let mut findings = Findings::default();

    println!("Repository:");
    match RepoLayout::discover(explicit_root) {
        Ok(layout) => {
            findings.line(
                CheckLevel::Ok,
                format!(
                    "Root: {} (from {})",
                    layout.root.display(),
                    layout.root_source
                ),
            );
            println!();
            check_directories(&layout, &mut findings);
            println!();
            check_git_config(&layout, &mut findings);
            println!();
            check_hooks(&layout, &mut findings);
        }
        Err(e) => findings.line(CheckLevel::Error, format!("{e:#}")),
    }
    println!();

    if findings.errors {
        println!("Issues found - see above for details");
        1
    } else if findings.warnings {
        println!("Warnings found - hooks may need attention");
        0
    } else {
        println!("Everything looks healthy!");
        0
    }
}

fn check_directories(layout: &RepoLayout, findings: &mut Findings) {
    println!("Directories:");

    if layout.source_dir.is_dir() {
        findings.line(
            CheckLevel::Ok,
            format!("Hook sources: {}", layout.source_dir.display()),
        );
    } else {
        findings.line(
            CheckLevel::Error,
            format!("Hook source directory missing: {}", layout.source_dir.display()),
        );
    }

    if layout.hooks_dir.is_dir() {
        findings.line(
            CheckLevel::Ok,
            format!("Git hooks directory: {}", layout.hooks_dir.display()),
        );
    } else {
        findings.line(
            CheckLevel::Error,
            format!("Git hooks directory missing: {}", layout.hooks_dir.display()),
        );
        findings.line(
            CheckLevel::Info,
            "Initialize the repository with 'git init' before installing hooks",
        );
    }
}

fn check_git_config(layout: &RepoLayout, findings: &mut Findings) {
    println!("Git configuration:");
    match configured_hooks_path(&layout.root) {
        Ok(Some(path)) => {
            findings.line(
                CheckLevel::Warning,
                format!("core.hooksPath is set to '{path}'; git will not run hooks from .git/hooks"),
            );
        }
        Ok(None) => findings.line(CheckLevel::Ok, "core.hooksPath not set"),
        Err(e) => findings.line(CheckLevel::Warning, format!("Could not read git config: {e:#}")),
    }
}

fn check_hooks(layout: &RepoLayout, findings: &mut Findings) {
    println!("Hooks:");

    let scan = match scan_source(&layout.source_dir, &layout.exclude) {
        Ok(scan) => scan,
        Err(e) => {
            findings.line(CheckLevel::Error, format!("{e:#}"));
            return;
        }
    };

    if scan.hooks.is_empty() {
        findings.line(CheckLevel::Warning, "No hook scripts to install");
        return;
    }

    match inspect(&scan, &layout.hooks_dir) {
        Ok(statuses) => {
            let mut stale = 0;
            for status in &statuses {
                let level = if status.state.is_current() {
                    CheckLevel::Ok
                } else {
                    stale += 1;
                    CheckLevel::Warning
                };
                findings.line(level, format!("{} {}", status.name, formatter().hook_state(status.state)));
            }
            if stale > 0 {
                findings.line(
                    CheckLevel::Info,
                    "Run 'hook-installer' to install or refresh hooks",
                );
            }
            if statuses.iter().all(|s| s.state == HookState::Installed) {
                findings.line(CheckLevel::Ok, format!("{} hook(s) up to date", statuses.len()));
            }
        }
        Err(e) => findings.line(CheckLevel::Error, format!("Failed to inspect hooks: {e:#}")),
    }
}
