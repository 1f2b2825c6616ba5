//! Mode routing
//!
//! This module provides unified entry points for the execution modes:
//! - CLI mode (one command, then exit)
//! - TUI mode (interactive screens)
//!
//! The mode selection is based on the parsed command line and feature flags.

#[cfg(feature = "cli")]
pub mod cli;

#[cfg(feature = "tui")]
pub mod tui;

#[cfg(feature = "cli")]
pub use cli::run_cli;

#[cfg(feature = "tui")]
pub use tui::run_tui;

use std::time::Duration;

use crate::cli::{Cli, Commands};
use crate::config::StaticConfig;

/// Mode detection result
#[derive(Debug, PartialEq)]
pub enum Mode {
    #[cfg(feature = "cli")]
    Cli,
    #[cfg(feature = "tui")]
    Tui,
    /// No subcommand and no interactive mode compiled in
    Help,
}

/// Detect which mode to run based on the parsed command line
///
/// # Mode Detection Logic
/// 1. `tui` subcommand, or no subcommand with the TUI feature -> TUI mode
/// 2. Any other subcommand with the CLI feature -> CLI mode
/// 3. Otherwise -> Help
pub fn detect_mode(cli: &Cli) -> Mode {
    match &cli.command {
        #[cfg(feature = "tui")]
        Some(Commands::Tui) | None => Mode::Tui,
        #[cfg(feature = "cli")]
        Some(_) => Mode::Cli,
        #[allow(unreachable_patterns)]
        _ => Mode::Help,
    }
}

/// Logging console target for a mode
pub fn log_target(mode: &Mode) -> crate::system::LogTarget {
    match mode {
        #[cfg(feature = "tui")]
        Mode::Tui => crate::system::LogTarget::Discard,
        _ => crate::system::LogTarget::Stderr,
    }
}

/// How long a copy holds the clipboard before the process may exit
///
/// Only one-shot CLI commands wait; the TUI stays alive and must not block.
pub fn clipboard_hold(mode: &Mode, config: &StaticConfig) -> Option<Duration> {
    match mode {
        #[cfg(feature = "cli")]
        Mode::Cli if config.analytics.clipboard_hold_secs > 0 => {
            Some(Duration::from_secs(config.analytics.clipboard_hold_secs))
        }
        _ => None,
    }
}
