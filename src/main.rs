use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use std::sync::Arc;
use tracing::{debug, warn};

use shorty::cli::Cli;
use shorty::client::ServiceContext;
use shorty::config::init_config;
use shorty::runtime::modes::{self, Mode};
use shorty::system::init_logging;

#[tokio::main]
async fn main() -> Result<()> {
    // .env 中的 SHORTY__* 变量参与配置覆盖
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let mode = modes::detect_mode(&cli);

    let config = match init_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e.format_colored());
            std::process::exit(1);
        }
    };

    // 日志 guard 需要活到 main 结束，否则缓冲的日志会丢失
    let _log_guard =
        init_logging(&config.logging, modes::log_target(&mode)).context("Failed to init logging")?;
    debug!("Configuration loaded, mode: {:?}", mode);

    let hold = modes::clipboard_hold(&mode, &config);
    let ctx = ServiceContext::from_config(Arc::clone(&config), hold)
        .context("Failed to build service context")?;

    match mode {
        #[cfg(feature = "tui")]
        Mode::Tui => {
            if let Err(e) = modes::run_tui(ctx).await {
                warn!("TUI exited with error: {}", e);
                eprintln!("TUI error: {}", e);
                std::process::exit(1);
            }
        }
        #[cfg(feature = "cli")]
        Mode::Cli => {
            let Some(command) = cli.command else {
                Cli::command().print_help()?;
                return Ok(());
            };
            if let Err(e) = modes::run_cli(&ctx, command).await {
                eprintln!("{}", e.format_colored());
                std::process::exit(1);
            }
        }
        Mode::Help => {
            Cli::command().print_help()?;
        }
    }

    Ok(())
}
