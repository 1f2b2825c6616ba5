//! Command-line interface definitions using clap
//!
//! This module defines the CLI structure for shorty using clap's derive macros.

use clap::{Parser, Subcommand};

/// Shorty - session-aware client for a URL-shortening backend
#[derive(Parser, Debug)]
#[command(name = "shorty")]
#[command(version)]
#[command(about = "Shorten, list and manage links on a URL-shortening backend", long_about = None)]
pub struct Cli {
    /// Configuration file (default: shorty.toml if present)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Start TUI mode
    #[cfg(feature = "tui")]
    Tui,

    /// Log in through the backend's OAuth flow
    ///
    /// Without --session, prints the browser URL to open. Once the browser
    /// login is done, run again with the session cookie value.
    Login {
        /// OAuth provider (github, google)
        #[arg(long, short = 'p', default_value = "github")]
        provider: String,

        /// Session cookie value obtained from the browser
        #[arg(long, short = 's')]
        session: Option<String>,
    },

    /// Forget the stored session
    Logout,

    /// Show the identity the backend reports for the stored session
    Whoami,

    /// Create a short link
    Shorten {
        /// Destination URL
        url: String,

        /// Custom alias instead of a generated code
        #[arg(long, short = 'a')]
        alias: Option<String>,
    },

    /// List your links with click counts
    List,

    /// Delete one of your links
    Delete {
        /// Short code to delete
        short_code: String,
    },

    /// Copy the short URL of a code to the clipboard
    Copy {
        /// Short code to copy
        short_code: String,
    },

    /// Push your account email to the backend profile
    Profile,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

/// Configuration management commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: shorty.example.toml, "-" for stdout)
        output_path: Option<String>,

        /// Force overwrite without confirmation
        #[arg(long)]
        force: bool,
    },
}

impl Commands {
    /// Whether the command needs the stored session
    pub fn needs_session(&self) -> bool {
        !matches!(
            self,
            Commands::Logout | Commands::Copy { .. } | Commands::Config { .. }
        )
    }
}
