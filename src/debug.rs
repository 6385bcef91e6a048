//! Global debug state management

use std::fmt::Display;
use std::sync::atomic::{AtomicBool, Ordering};

/// Global debug state
static DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);

/// Enable debug mode
pub fn enable() {
    DEBUG_ENABLED.store(true, Ordering::Relaxed);
}

/// Check if debug mode is enabled
pub fn is_enabled() -> bool {
    DEBUG_ENABLED.load(Ordering::Relaxed)
}

/// Print a diagnostic line to stderr when debug mode is enabled
pub fn log(message: impl Display) {
    if is_enabled() {
        eprintln!("[debug] {message}");
    }
}
