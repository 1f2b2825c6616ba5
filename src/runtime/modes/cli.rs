//! CLI mode
//!
//! Runs the single parsed command against the service context.

use tracing::debug;

use crate::cli::Commands;
use crate::client::ServiceContext;
use crate::interfaces::cli::CliError;

/// Run CLI mode
pub async fn run_cli(ctx: &ServiceContext, command: Commands) -> Result<(), CliError> {
    debug!("Running CLI command: {:?}", command);
    crate::interfaces::cli::run_cli_command(ctx, command).await
}
