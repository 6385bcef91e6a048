//! Git hook installation

use crate::{
    debug,
    error::{InstallError, InstallStage},
    git::RepoLayout,
    hooks::{HookFile, SkipReason, SourceScan, scan_source},
    output::formatter,
};
use glob::Pattern;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Execute bits for user, group and other
pub const EXECUTE_BITS: u32 = 0o111;

/// Copies hook scripts from a source directory into a git hooks directory
#[derive(Debug, Clone)]
pub struct HookInstaller {
    /// Directory holding the hook scripts
    source_dir: PathBuf,
    /// Git hooks directory that receives the copies
    hooks_dir: PathBuf,
    /// File name patterns that are never installed
    exclude: Vec<Pattern>,
}

impl HookInstaller {
    /// Create an installer for a source and destination directory
    #[must_use]
    pub fn new(source_dir: impl Into<PathBuf>, hooks_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            hooks_dir: hooks_dir.into(),
            exclude: Vec::new(),
        }
    }

    /// Create an installer for a resolved repository layout
    #[must_use]
    pub fn from_layout(layout: &RepoLayout) -> Self {
        Self::new(&layout.source_dir, &layout.hooks_dir).with_exclude(layout.exclude.clone())
    }

    /// Skip source files whose name matches one of `patterns`
    #[must_use]
    pub fn with_exclude(mut self, patterns: Vec<Pattern>) -> Self {
        self.exclude = patterns;
        self
    }

    /// Directory holding the hook scripts
    #[must_use]
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Git hooks directory that receives the copies
    #[must_use]
    pub fn hooks_dir(&self) -> &Path {
        &self.hooks_dir
    }

    /// Check preconditions and list what would be installed
    ///
    /// The hooks directory is checked first and is never created.
    ///
    /// # Errors
    ///
    /// Returns [`InstallError::DestinationMissing`] if the hooks directory is
    /// absent, or a source error if the source directory cannot be listed
    pub fn plan(&self) -> Result<SourceScan, InstallError> {
        if !self.hooks_dir.is_dir() {
            return Err(InstallError::DestinationMissing(self.hooks_dir.clone()));
        }
        scan_source(&self.source_dir, &self.exclude)
    }

    /// Install every hook of a plan, calling `on_installed` after each one
    ///
    /// Stops at the first failure; hooks installed before it stay in place.
    ///
    /// # Errors
    ///
    /// Returns [`InstallError::IoFailure`] naming the hook that failed
    pub fn apply<F>(&self, plan: &SourceScan, mut on_installed: F) -> Result<InstallReport, InstallError>
    where
        F: FnMut(&InstalledHook),
    {
        let mut report = InstallReport {
            installed: Vec::with_capacity(plan.hooks.len()),
            skipped: plan.skipped.clone(),
        };

        for hook in &plan.hooks {
            let installed = self.install_hook(hook)?;
            on_installed(&installed);
            report.installed.push(installed);
        }

        Ok(report)
    }

    /// Plan and apply in one step
    ///
    /// # Errors
    ///
    /// Returns the first error from [`Self::plan`] or [`Self::apply`]
    pub fn install_each<F>(&self, on_installed: F) -> Result<InstallReport, InstallError>
    where
        F: FnMut(&InstalledHook),
    {
        let plan = self.plan()?;
        self.apply(&plan, on_installed)
    }

    /// Copy a single hook into place and mark it executable
    ///
    /// The content is staged in a temporary file inside the hooks directory
    /// and renamed over the final name, so readers never see a partial hook.
    fn install_hook(&self, hook: &HookFile) -> Result<InstalledHook, InstallError> {
        let target = self.hooks_dir.join(&hook.file_name);

        let mut source = fs::File::open(&hook.path).map_err(io_failure(hook, InstallStage::Copy))?;
        let mut staged =
            NamedTempFile::new_in(&self.hooks_dir).map_err(io_failure(hook, InstallStage::Copy))?;
        let bytes = io::copy(&mut source, staged.as_file_mut())
            .map_err(io_failure(hook, InstallStage::Copy))?;

        let mode = mark_executable(&source, staged.as_file())
            .map_err(io_failure(hook, InstallStage::Permissions))?;

        staged
            .persist(&target)
            .map_err(|e| io_failure(hook, InstallStage::Copy)(e.error))?;

        debug::log(format!(
            "copied {} -> {} ({bytes} bytes{})",
            hook.path.display(),
            target.display(),
            mode.map(|m| format!(", mode {m:o}")).unwrap_or_default()
        ));

        Ok(InstalledHook {
            name: hook.name.clone(),
            path: target,
            bytes,
            mode,
        })
    }
}

fn io_failure(hook: &HookFile, stage: InstallStage) -> impl FnOnce(io::Error) -> InstallError + '_ {
    move |source| InstallError::IoFailure {
        name: hook.name.clone(),
        stage,
        source,
    }
}

/// Give `staged` the source permission bits plus execute for everyone
#[cfg(unix)]
#[allow(clippy::unnecessary_wraps)]
fn mark_executable(source: &fs::File, staged: &fs::File) -> io::Result<Option<u32>> {
    use std::os::unix::fs::PermissionsExt;

    let mode = (source.metadata()?.permissions().mode() & 0o7777) | EXECUTE_BITS;
    staged.set_permissions(fs::Permissions::from_mode(mode))?;
    Ok(Some(mode))
}

#[cfg(not(unix))]
#[allow(clippy::unnecessary_wraps)]
fn mark_executable(_source: &fs::File, _staged: &fs::File) -> io::Result<Option<u32>> {
    Ok(None)
}

/// Install every regular file of `source_dir` into `dest_dir`
///
/// Prints one confirmation line per installed hook and returns the
/// installed names in installation order.
///
/// # Errors
///
/// Returns [`InstallError::DestinationMissing`] before writing anything if
/// `dest_dir` is not an existing directory, or the first per-file failure
pub fn install(source_dir: &Path, dest_dir: &Path) -> Result<Vec<String>, InstallError> {
    let installer = HookInstaller::new(source_dir, dest_dir);
    let report = installer.install_each(|hook| println!("{}", formatter().installed(&hook.name)))?;
    Ok(report.names())
}

/// A hook copied into the hooks directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledHook {
    /// Hook name
    pub name: String,
    /// Installed path
    pub path: PathBuf,
    /// Bytes copied
    pub bytes: u64,
    /// Permission bits applied, on platforms that have them
    pub mode: Option<u32>,
}

/// Report of an install run
#[derive(Debug, Clone, Default)]
pub struct InstallReport {
    /// Installed hooks, in installation order
    pub installed: Vec<InstalledHook>,
    /// Source entries that were not installed
    pub skipped: Vec<(String, SkipReason)>,
}

impl InstallReport {
    /// Names of the installed hooks
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.installed.iter().map(|h| h.name.clone()).collect()
    }

    /// Print a closing summary line
    pub fn print_summary(&self, hooks_dir: &Path) {
        println!(
            "{}",
            formatter().install_summary(self.installed.len(), hooks_dir)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TempDir, PathBuf, PathBuf) {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("scripts/git-hooks");
        let hooks = temp_dir.path().join(".git/hooks");
        fs::create_dir_all(&source).unwrap();
        fs::create_dir_all(&hooks).unwrap();
        (temp_dir, source, hooks)
    }

    #[test]
    fn test_install_copies_content() {
        let (_temp, source, hooks) = setup();
        fs::write(source.join("pre-commit"), "#!/bin/sh\necho hi\n").unwrap();
        fs::write(source.join("pre-push"), "#!/bin/sh\necho bye\n").unwrap();

        let names = install(&source, &hooks).unwrap();

        assert_eq!(names, vec!["pre-commit", "pre-push"]);
        assert_eq!(
            fs::read_to_string(hooks.join("pre-commit")).unwrap(),
            "#!/bin/sh\necho hi\n"
        );
        assert_eq!(
            fs::read_to_string(hooks.join("pre-push")).unwrap(),
            "#!/bin/sh\necho bye\n"
        );
    }

    #[test]
    fn test_missing_destination_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("scripts/git-hooks");
        fs::create_dir_all(&source).unwrap();
        fs::write(source.join("pre-commit"), "#!/bin/sh\n").unwrap();
        let hooks = temp_dir.path().join(".git/hooks");

        let err = install(&source, &hooks).unwrap_err();

        assert!(matches!(err, InstallError::DestinationMissing(_)));
        assert!(!temp_dir.path().join(".git").exists());
    }

    #[test]
    fn test_destination_that_is_a_file() {
        let (_temp, source, hooks) = setup();
        fs::remove_dir(&hooks).unwrap();
        fs::write(&hooks, "not a directory").unwrap();

        let err = HookInstaller::new(&source, &hooks).plan().unwrap_err();
        assert!(matches!(err, InstallError::DestinationMissing(_)));
    }

    #[test]
    fn test_destination_checked_before_source() {
        let temp_dir = TempDir::new().unwrap();
        let err = HookInstaller::new(
            temp_dir.path().join("no-source"),
            temp_dir.path().join("no-hooks"),
        )
        .plan()
        .unwrap_err();
        assert!(matches!(err, InstallError::DestinationMissing(_)));
    }

    #[test]
    fn test_empty_source_installs_nothing() {
        let (_temp, source, hooks) = setup();
        let names = install(&source, &hooks).unwrap();
        assert!(names.is_empty());
        assert_eq!(fs::read_dir(&hooks).unwrap().count(), 0);
    }

    #[test]
    fn test_overwrites_existing_hook() {
        let (_temp, source, hooks) = setup();
        fs::write(hooks.join("pre-commit"), "old content").unwrap();
        fs::write(source.join("pre-commit"), "new content").unwrap();

        install(&source, &hooks).unwrap();

        assert_eq!(
            fs::read_to_string(hooks.join("pre-commit")).unwrap(),
            "new content"
        );
    }

    #[test]
    fn test_leaves_unrelated_hooks_alone() {
        let (_temp, source, hooks) = setup();
        fs::write(hooks.join("post-merge"), "custom").unwrap();
        fs::write(source.join("pre-commit"), "#!/bin/sh\n").unwrap();

        install(&source, &hooks).unwrap();

        assert_eq!(fs::read_to_string(hooks.join("post-merge")).unwrap(), "custom");
    }

    #[test]
    fn test_no_staging_files_left_behind() {
        let (_temp, source, hooks) = setup();
        fs::write(source.join("pre-commit"), "#!/bin/sh\n").unwrap();

        install(&source, &hooks).unwrap();

        let entries: Vec<_> = fs::read_dir(&hooks)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(entries, vec!["pre-commit"]);
    }

    #[test]
    fn test_callback_sees_each_hook() {
        let (_temp, source, hooks) = setup();
        fs::write(source.join("a"), "1").unwrap();
        fs::write(source.join("b"), "22").unwrap();

        let mut seen = Vec::new();
        let report = HookInstaller::new(&source, &hooks)
            .install_each(|hook| seen.push((hook.name.clone(), hook.bytes)))
            .unwrap();

        assert_eq!(seen, vec![("a".to_string(), 1), ("b".to_string(), 2)]);
        assert_eq!(report.names(), vec!["a", "b"]);
    }

    #[test]
    fn test_exclude_patterns_respected() {
        let (_temp, source, hooks) = setup();
        fs::write(source.join("pre-commit"), "#!/bin/sh\n").unwrap();
        fs::write(source.join("README.md"), "docs").unwrap();

        let report = HookInstaller::new(&source, &hooks)
            .with_exclude(vec![Pattern::new("*.md").unwrap()])
            .install_each(|_| {})
            .unwrap();

        assert_eq!(report.names(), vec!["pre-commit"]);
        assert!(!hooks.join("README.md").exists());
        assert_eq!(report.skipped.len(), 1);
    }

    #[test]
    fn test_fails_fast_without_rollback() {
        let (_temp, source, hooks) = setup();
        fs::write(source.join("a-hook"), "a").unwrap();
        fs::write(source.join("b-hook"), "b").unwrap();
        fs::write(source.join("c-hook"), "c").unwrap();
        // A directory in the way makes the rename fail even for root
        fs::create_dir(hooks.join("b-hook")).unwrap();

        let err = install(&source, &hooks).unwrap_err();

        assert_eq!(err.hook_name(), Some("b-hook"));
        assert_eq!(err.exit_code(), 2);
        assert_eq!(fs::read_to_string(hooks.join("a-hook")).unwrap(), "a");
        assert!(!hooks.join("c-hook").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_installed_hooks_are_executable() {
        use std::os::unix::fs::PermissionsExt;

        let (_temp, source, hooks) = setup();
        fs::write(source.join("pre-commit"), "#!/bin/sh\n").unwrap();
        fs::set_permissions(source.join("pre-commit"), fs::Permissions::from_mode(0o640))
            .unwrap();

        let report = HookInstaller::new(&source, &hooks)
            .install_each(|_| {})
            .unwrap();

        let mode = fs::metadata(hooks.join("pre-commit"))
            .unwrap()
            .permissions()
            .mode()
            & 0o7777;
        assert_eq!(mode, 0o751);
        assert_eq!(report.installed[0].mode, Some(0o751));
        // Source is untouched
        let source_mode = fs::metadata(source.join("pre-commit"))
            .unwrap()
            .permissions()
            .mode()
            & 0o7777;
        assert_eq!(source_mode, 0o640);
    }
}
