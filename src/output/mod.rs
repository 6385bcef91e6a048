//! Output formatting utilities

use crate::hooks::HookState;
use console::{Emoji, style};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::IsTerminal;
use std::path::Path;

/// Output formatter that strips colors and emojis for non-TTY output
pub struct OutputFormatter {
    /// Whether output is going to a TTY
    is_tty: bool,
}

/// Severity of a doctor check line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckLevel {
    /// Check passed
    Ok,
    /// Informational hint
    Info,
    /// Something may need attention
    Warning,
    /// Something is broken
    Error,
}

impl OutputFormatter {
    /// Create a new output formatter
    #[must_use]
    pub fn new() -> Self {
        Self {
            is_tty: std::io::stdout().is_terminal(),
        }
    }

    /// Whether output is going to a TTY
    #[must_use]
    pub const fn is_tty(&self) -> bool {
        self.is_tty
    }

    /// Format a status symbol (check mark, X, etc.)
    #[must_use]
    pub fn status(&self, success: bool) -> String {
        if self.is_tty {
            if success {
                format!("{}", style("✓").green().bold())
            } else {
                format!("{}", style("✗").red().bold())
            }
        } else if success {
            "[PASS]".to_string()
        } else {
            "[FAIL]".to_string()
        }
    }

    /// Create a progress bar for installing hooks
    ///
    /// # Panics
    ///
    /// Panics if the progress bar template is invalid
    #[must_use]
    pub fn create_progress_bar(&self, total: u64) -> Option<ProgressBar> {
        if self.is_tty && total > 1 {
            let pb = ProgressBar::new(total);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                    .unwrap()
                    .progress_chars("=> "),
            );
            Some(pb)
        } else {
            None
        }
    }

    /// Confirmation line for an installed hook
    #[must_use]
    pub fn installed(&self, name: &str) -> String {
        if self.is_tty {
            format!(
                "{} Installed {}",
                style("✓").green().bold(),
                style(name).cyan().bold()
            )
        } else {
            format!("Installed {name}")
        }
    }

    /// Closing line of an install run
    #[must_use]
    pub fn install_summary(&self, count: usize, hooks_dir: &Path) -> String {
        let text = match count {
            0 => "No hooks to install".to_string(),
            1 => format!("1 hook installed to {}", hooks_dir.display()),
            n => format!("{n} hooks installed to {}", hooks_dir.display()),
        };
        if self.is_tty && count > 0 {
            format!("\n{} {}", Emoji("🎉", ""), style(text).green().bold())
        } else {
            text
        }
    }

    /// Label for a hook state
    #[must_use]
    pub fn hook_state(&self, state: HookState) -> String {
        if self.is_tty {
            let label = style(state.as_str());
            let label = match state {
                HookState::Installed => label.green(),
                HookState::Outdated | HookState::NotExecutable => label.yellow(),
                HookState::Missing => label.red(),
            };
            format!("{label}")
        } else {
            format!("[{state}]")
        }
    }

    /// Prefix for a doctor check line
    #[must_use]
    pub const fn check(&self, level: CheckLevel) -> &'static str {
        match (self.is_tty, level) {
            (true, CheckLevel::Ok) => "✅",
            (true, CheckLevel::Info) => "ℹ️ ",
            (true, CheckLevel::Warning) => "⚠️ ",
            (true, CheckLevel::Error) => "❌",
            (false, CheckLevel::Ok) => "[OK]",
            (false, CheckLevel::Info) => "[INFO]",
            (false, CheckLevel::Warning) => "[WARN]",
            (false, CheckLevel::Error) => "[ERROR]",
        }
    }

    /// Format a skip symbol
    #[must_use]
    pub const fn skip(&self) -> &'static str {
        if self.is_tty { "⏭️" } else { "[SKIP]" }
    }

    /// Format section divider
    #[must_use]
    pub fn divider(&self, title: &str) -> String {
        if self.is_tty {
            format!("{}\n{}", title, "=".repeat(title.chars().count()))
        } else {
            format!("=== {title} ===")
        }
    }
}

impl Default for OutputFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Global output formatter instance
static OUTPUT_FORMATTER: once_cell::sync::Lazy<OutputFormatter> =
    once_cell::sync::Lazy::new(OutputFormatter::new);

/// Get the global output formatter
#[must_use]
pub fn formatter() -> &'static OutputFormatter {
    &OUTPUT_FORMATTER
}
