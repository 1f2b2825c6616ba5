//! Terminal User Interface (TUI) module
//!
//! Login, Home, Create URL, Analytics and Settings screens over the shared
//! flows. The loop stays single-threaded: backend requests run as tasks and
//! report back through a channel, so a spinner can render while they are
//! outstanding.

use std::io;
use std::time::Instant;

use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    crossterm::{
        event::{self, Event, KeyEventKind},
        execute,
        terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
    },
};
use tracing::{error, info};

mod app;
mod constants;
mod event_handler;
mod ui;

use crate::client::ServiceContext;
use crate::session::Route;
use app::App;
use constants::TICK_RATE;
use ui::ui;

/// Run the TUI application
pub async fn run_tui(ctx: ServiceContext) -> Result<(), Box<dyn std::error::Error>> {
    if let Err(e) = ctx.guard().restore() {
        error!("Ignoring unreadable session store: {}", e);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stderr = io::stderr();
    execute!(stderr, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stderr);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(ctx);
    app.navigate(Route::Home);
    let res = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }
    info!("TUI closed");

    Ok(())
}

/// Main application loop
async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stderr>>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if event::poll(TICK_RATE)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && event_handler::handle_key_event(app, key)?
        {
            return Ok(());
        }

        app.drain_events();
        app.sync_session();
        app.tick(Instant::now());

        // 让出执行权，后台请求任务得以推进
        tokio::task::yield_now().await;
    }
}
