use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::interfaces::tui::app::App;

pub fn draw_home_screen(frame: &mut Frame, app: &App, area: Rect) {
    let greeting = match &app.session {
        Some(session) => format!("Welcome, {}", session.display_name()),
        None => "Welcome".to_string(),
    };

    let entry = |key: &'static str, label: &'static str, color: Color| {
        Line::from(vec![
            Span::styled(format!("[{}] ", key), Style::default().fg(color).bold()),
            Span::styled(label, Style::default().fg(Color::White)),
        ])
    };

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            greeting,
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        entry("c", "Create a short URL", Color::Green),
        entry("a", "Your links and click counts", Color::Cyan),
        entry("s", "Settings", Color::Yellow),
    ];

    let home = Paragraph::new(text).alignment(Alignment::Center).block(
        Block::default()
            .title(" Home ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(home, area);
}
