//! CLI interface module
//!
//! This module provides command-line interface functionality for shorty.
//! Every command maps to one user action of the flows layer.

pub mod commands;

use std::fmt;

use crate::cli::{Commands, ConfigCommands};
use crate::client::ServiceContext;
use crate::errors::ShortyError;
use commands::{
    config_generate, copy_link, delete_link, list_links, login, logout, shorten, update_profile,
    whoami,
};

#[derive(Debug)]
pub enum CliError {
    /// Request reached the backend (or tried to) and failed
    ApiError(String),
    /// User is not logged in
    AuthError(String),
    ParseError(String),
    CommandError(String),
}

impl CliError {
    /// Format as simple output
    pub fn format_simple(&self) -> String {
        match self {
            CliError::ApiError(msg) => format!("API error: {}", msg),
            CliError::AuthError(msg) => format!("Auth error: {}", msg),
            CliError::ParseError(msg) => format!("Parse error: {}", msg),
            CliError::CommandError(msg) => format!("Command error: {}", msg),
        }
    }

    /// Format as colored output
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        match self {
            CliError::ApiError(msg) => format!("{} {}", "API error:".red().bold(), msg.white()),
            CliError::AuthError(msg) => {
                format!("{} {}", "Auth error:".yellow().bold(), msg.white())
            }
            CliError::ParseError(msg) => {
                format!("{} {}", "Parse error:".yellow().bold(), msg.white())
            }
            CliError::CommandError(msg) => {
                format!("{} {}", "Command error:".red().bold(), msg.white())
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CliError {}

impl From<ShortyError> for CliError {
    fn from(err: ShortyError) -> Self {
        match err {
            ShortyError::Unauthenticated(msg) => CliError::AuthError(msg),
            ShortyError::Validation(msg) => CliError::ParseError(msg),
            ShortyError::Transport(_)
            | ShortyError::HttpStatus(..)
            | ShortyError::MalformedResponse(_) => CliError::ApiError(err.message().to_string()),
            other => CliError::CommandError(other.to_string()),
        }
    }
}

/// Run a CLI command from clap-parsed input
pub async fn run_cli_command(ctx: &ServiceContext, cmd: Commands) -> Result<(), CliError> {
    if cmd.needs_session() {
        ctx.guard().restore()?;
    }

    match cmd {
        Commands::Login { provider, session } => login(ctx, &provider, session).await,
        Commands::Logout => logout(ctx),
        Commands::Whoami => whoami(ctx).await,
        Commands::Shorten { url, alias } => shorten(ctx, url, alias).await,
        Commands::List => list_links(ctx).await,
        Commands::Delete { short_code } => delete_link(ctx, &short_code).await,
        Commands::Copy { short_code } => copy_link(ctx, &short_code),
        Commands::Profile => update_profile(ctx).await,

        Commands::Config {
            action: ConfigCommands::Generate { output_path, force },
        } => config_generate(output_path, force).await,

        #[cfg(feature = "tui")]
        Commands::Tui => Err(CliError::CommandError(
            "TUI mode is started by the runtime, not as a CLI command".to_string(),
        )),
    }
}
