//! Profile command

use colored::Colorize;

use super::session::require_session;
use crate::client::ServiceContext;
use crate::interfaces::cli::CliError;
use crate::session::Route;

pub async fn update_profile(ctx: &ServiceContext) -> Result<(), CliError> {
    let session = require_session(ctx, Route::Settings).await?;
    let outcome = ctx.profile().update(Some(&session)).await;
    if outcome.success {
        println!("{} {}", "✓".bold().green(), outcome.message);
        Ok(())
    } else {
        Err(CliError::CommandError(outcome.message))
    }
}
