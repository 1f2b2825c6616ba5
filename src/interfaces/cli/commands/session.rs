//! Login, logout and whoami commands

use std::str::FromStr;

use colored::Colorize;

use crate::client::ServiceContext;
use crate::interfaces::cli::CliError;
use crate::session::{GuardDecision, OAuthProvider, Route, Session};

pub async fn login(
    ctx: &ServiceContext,
    provider: &str,
    session: Option<String>,
) -> Result<(), CliError> {
    let provider = OAuthProvider::from_str(provider).map_err(CliError::ParseError)?;

    let Some(token) = session else {
        let url = ctx.guard().login_url(provider);
        println!(
            "{} Open this URL in a browser to log in with {}:",
            "ℹ".bold().blue(),
            provider.as_ref().cyan()
        );
        println!("  {}", url.blue().underline());
        println!();
        println!(
            "Then copy the {} cookie and run:",
            ctx.config().api.session_cookie.yellow()
        );
        println!("  {}", "shorty login --session <value>".dimmed());
        return Ok(());
    };

    let session = ctx.guard().login_with_token(&token).await?;
    println!(
        "{} Logged in as {}",
        "✓".bold().green(),
        session.display_name().cyan()
    );
    Ok(())
}

pub fn logout(ctx: &ServiceContext) -> Result<(), CliError> {
    ctx.guard().logout()?;
    println!("{} Logged out", "✓".bold().green());
    Ok(())
}

pub async fn whoami(ctx: &ServiceContext) -> Result<(), CliError> {
    let session = require_session(ctx, Route::Home).await?;
    println!("{}", "Logged in as:".bold());
    println!("  {} {}", "username:".dimmed(), session.username.cyan());
    if let Some(ref email) = session.email {
        println!("  {} {}", "email:".dimmed(), email.cyan());
    }
    Ok(())
}

/// Run the guard for `route`; a redirect becomes an auth error
pub(super) async fn require_session(
    ctx: &ServiceContext,
    route: Route,
) -> Result<Session, CliError> {
    match ctx.guard().activate(route).await {
        GuardDecision::Allow {
            session: Some(session),
            ..
        } => Ok(session),
        _ => Err(CliError::AuthError(
            "Please log in first. Run `shorty login`.".to_string(),
        )),
    }
}
