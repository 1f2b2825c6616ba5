// UI submodules
mod analytics;
mod common;
mod create_url;
mod dialogs;
mod home;
mod login;
mod settings;
pub mod widgets;

pub use analytics::draw_analytics_screen;
pub use common::{draw_footer, draw_status_bar, draw_title_bar};
pub use create_url::draw_create_url_screen;
pub use dialogs::{draw_delete_confirm, draw_exiting_screen};
pub use home::draw_home_screen;
pub use login::draw_login_screen;
pub use settings::draw_settings_screen;

use super::app::{App, CurrentScreen};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::{Block, BorderType, Borders, Paragraph},
};

/// Main UI rendering entry point
pub fn ui(frame: &mut Frame, app: &mut App) {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(10),   // Main content
            Constraint::Length(3), // Status
            Constraint::Length(2), // Footer
        ])
        .split(frame.area());

    draw_title_bar(frame, app, main_chunks[0]);

    if app.checking {
        // 守卫检查完成前不渲染受保护的内容
        let checking = Paragraph::new("Checking session...")
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded),
            );
        frame.render_widget(checking, main_chunks[1]);
    } else {
        match app.current_screen {
            CurrentScreen::Login => draw_login_screen(frame, app, main_chunks[1]),
            CurrentScreen::Home => draw_home_screen(frame, app, main_chunks[1]),
            CurrentScreen::CreateUrl => draw_create_url_screen(frame, app, main_chunks[1]),
            CurrentScreen::Analytics => draw_analytics_screen(frame, app, main_chunks[1]),
            CurrentScreen::Settings => draw_settings_screen(frame, app, main_chunks[1]),
        }
    }

    if let Some(ref code) = app.confirm_delete {
        draw_delete_confirm(frame, code, main_chunks[1]);
    }
    if app.exiting {
        draw_exiting_screen(frame, main_chunks[1]);
    }

    draw_status_bar(frame, app, main_chunks[2]);
    draw_footer(frame, app, main_chunks[3]);
}
