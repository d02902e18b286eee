// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Console logging macros shared by the library and the CLI.
//!
//! Library code only ever emits [`warn!`] (unmatched render-catalog keys) and
//! [`verbose!`]; everything else is CLI output. Every macro expands to a
//! single statement, so several can share one scope.

use std::sync::atomic::{AtomicBool, Ordering};

/// Global verbosity flag.
static VERBOSE: AtomicBool = AtomicBool::new(true);

/// Whether warnings are printed at all. Turned off by `--quiet`.
static WARNINGS: AtomicBool = AtomicBool::new(true);

/// Set the global verbosity flag.
pub fn set_verbose(verbose: bool) {
    VERBOSE.store(verbose, Ordering::Relaxed);
}

/// Check if verbose output is enabled.
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::Relaxed)
}

/// Enable or silence warning output.
pub fn set_warnings(enabled: bool) {
    WARNINGS.store(enabled, Ordering::Relaxed);
}

/// Check if warnings are printed.
pub fn warnings_enabled() -> bool {
    WARNINGS.load(Ordering::Relaxed)
}

/// Macro for warning messages.
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        if $crate::logging::warnings_enabled() {
            use colored::Colorize;
            eprintln!("{} {}", "WARNING ⚠️".yellow().bold(), format!($($arg)*));
        }
    }
}

/// Macro for error messages.
#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {{
        use colored::Colorize;
        eprintln!("{} {}", "Error:".red().bold(), format!($($arg)*));
    }};
}

/// Macro for success messages.
#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {{
        use colored::Colorize;
        println!("{} {}", "✅".green(), format!($($arg)*));
    }};
}

/// Macro for verbose messages.
#[macro_export]
macro_rules! verbose {
    ($($arg:tt)*) => {
        if $crate::logging::is_verbose() {
            println!("{}", format!($($arg)*));
        }
    }
}

/// Macro for section headers.
#[macro_export]
macro_rules! section {
    ($($arg:tt)*) => {{
        use colored::Colorize;
        if $crate::logging::is_verbose() {
            println!();
            println!("{}", format!($($arg)*).cyan().bold());
        }
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_toggle() {
        set_verbose(true);
        assert!(is_verbose());

        set_verbose(false);
        assert!(!is_verbose());

        set_verbose(true);
        assert!(is_verbose());
    }

    #[test]
    fn test_warning_toggle() {
        set_warnings(false);
        assert!(!warnings_enabled());
        // Must not print, must not panic
        crate::warn!("silenced {}", 1);

        set_warnings(true);
        assert!(warnings_enabled());
    }

    #[test]
    fn test_macros_share_one_scope() {
        set_verbose(false);
        crate::section!("header {}", 1);
        crate::success!("done {}", 2);
        crate::error!("failed {}", 3);
        crate::section!("second header");
        set_verbose(true);
    }
}
