//! TUI mode
//!
//! This module contains the TUI (Terminal User Interface) mode startup logic.
//! It delegates to the actual TUI implementation.

use tracing::info;

use crate::client::ServiceContext;

/// Run TUI mode
pub async fn run_tui(ctx: ServiceContext) -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting TUI against {}", ctx.config().api.base_url);
    crate::interfaces::tui::run_tui(ctx).await
}
