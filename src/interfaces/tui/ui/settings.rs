use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::interfaces::tui::app::App;

pub fn draw_settings_screen(frame: &mut Frame, app: &App, area: Rect) {
    let mut text = vec![Line::from("")];
    match &app.session {
        Some(session) => {
            text.push(Line::from(Span::styled(
                "Logged in as:",
                Style::default().fg(Color::DarkGray),
            )));
            text.push(Line::from(Span::styled(
                session.display_name(),
                Style::default().fg(Color::Cyan).bold(),
            )));
            text.push(Line::from(vec![
                Span::styled("Username: ", Style::default().fg(Color::DarkGray)),
                Span::styled(session.username.as_str(), Style::default().fg(Color::White)),
            ]));
            text.push(Line::from(vec![
                Span::styled("Session since: ", Style::default().fg(Color::DarkGray)),
                Span::styled(
                    session
                        .established_at
                        .format("%Y-%m-%d %H:%M:%S UTC")
                        .to_string(),
                    Style::default().fg(Color::White),
                ),
            ]));
        }
        None => text.push(Line::from(Span::styled(
            "No session",
            Style::default().fg(Color::DarkGray),
        ))),
    }

    text.push(Line::from(""));
    let update_label = if app.profile_pending {
        "Updating profile..."
    } else {
        "[u] Update profile"
    };
    text.push(Line::from(Span::styled(
        update_label,
        Style::default().fg(Color::Green),
    )));
    text.push(Line::from(Span::styled(
        "[l] Logout",
        Style::default().fg(Color::Red),
    )));

    let settings = Paragraph::new(text).block(
        Block::default()
            .title(" Settings ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(settings, area);
}
