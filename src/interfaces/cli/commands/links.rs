//! Link commands: shorten, list, delete, copy

use colored::Colorize;

use super::session::require_session;
use crate::client::ServiceContext;
use crate::flows::analytics::MSG_LOGIN_FIRST;
use crate::flows::create::feedback_message;
use crate::flows::{AliasMode, AnalyticsView, CreateForm};
use crate::interfaces::cli::CliError;
use crate::session::Route;

pub async fn shorten(
    ctx: &ServiceContext,
    url: String,
    alias: Option<String>,
) -> Result<(), CliError> {
    let mut form = CreateForm::new();
    form.destination_url = url;
    if let Some(alias) = alias {
        form.alias_mode = AliasMode::Custom;
        form.custom_alias = alias;
    }
    // 先校验，避免无效输入也去查询身份
    form.validate()?;

    let session = require_session(ctx, Route::CreateUrl).await?;
    match ctx.creation().submit(&mut form, Some(&session)).await {
        Ok(created) => {
            println!("{} {}", "✓".bold().green(), created.message);
            match created.short_url {
                Some(short_url) => println!("  {}", short_url.blue().underline()),
                None => println!("  {}", "(no short URL in response)".dimmed()),
            }
            Ok(())
        }
        Err(e) => Err(CliError::ApiError(feedback_message(&e))),
    }
}

pub async fn list_links(ctx: &ServiceContext) -> Result<(), CliError> {
    let view = ctx.analytics().load().await;
    print_view(ctx, &view)
}

pub async fn delete_link(ctx: &ServiceContext, short_code: &str) -> Result<(), CliError> {
    require_session(ctx, Route::Analytics).await?;
    let outcome = ctx.analytics().delete(short_code).await;

    if outcome.deleted {
        println!(
            "{} Deleted short link: {}",
            "✓".bold().green(),
            short_code.cyan()
        );
    }
    // 无论删除成功与否都展示重新拉取后的列表
    print_view(ctx, &outcome.view)?;

    match outcome.message {
        Some(message) => Err(CliError::CommandError(message)),
        None => Ok(()),
    }
}

pub fn copy_link(ctx: &ServiceContext, short_code: &str) -> Result<(), CliError> {
    let notice = ctx.analytics().copy(short_code)?;
    println!("{} {}", "✓".bold().green(), notice.message);
    println!("  {}", notice.short_url.blue().underline());
    Ok(())
}

fn print_view(ctx: &ServiceContext, view: &AnalyticsView) -> Result<(), CliError> {
    match view {
        AnalyticsView::Loading => Ok(()),
        AnalyticsView::Error(message) if message == MSG_LOGIN_FIRST => {
            Err(CliError::AuthError(format!("{} Run `shorty login`.", message)))
        }
        AnalyticsView::Error(message) => Err(CliError::ApiError(message.clone())),
        AnalyticsView::Empty => {
            println!("{} No short links found", "ℹ".bold().blue());
            Ok(())
        }
        AnalyticsView::Populated(links) => {
            println!("{}", "Your short links:".bold().green());
            println!();
            for link in links {
                println!(
                    "  {} -> {} {}",
                    ctx.analytics().short_url(&link.short_code).cyan(),
                    link.original_url.blue().underline(),
                    format!("(clicks: {})", link.clicks).dimmed().cyan()
                );
            }
            println!();
            println!(
                "{} Total {} short links",
                "ℹ".bold().blue(),
                links.len().to_string().green()
            );
            Ok(())
        }
    }
}
