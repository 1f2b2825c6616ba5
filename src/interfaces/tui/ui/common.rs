use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::interfaces::tui::app::{App, CurrentScreen};

/// Draw title bar with version and identity
pub fn draw_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let identity = match &app.session {
        Some(session) => Span::styled(
            format!("Logged in as {} ", session.display_name()),
            Style::default().fg(Color::Yellow),
        ),
        None => Span::styled("Not logged in ", Style::default().fg(Color::DarkGray)),
    };

    let title_text = vec![Line::from(vec![
        Span::styled("Shorty TUI", Style::default().fg(Color::Cyan).bold()),
        Span::styled(
            format!(" v{} ", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled("| ", Style::default().fg(Color::DarkGray)),
        identity,
    ])];

    let title = Paragraph::new(title_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .alignment(Alignment::Center);

    frame.render_widget(title, area);
}

/// Draw status bar
pub fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let (status_text, status_style) = if !app.error_message.is_empty() {
        (
            format!("[ERROR] {}", app.error_message),
            Style::default().fg(Color::White).bg(Color::Red).bold(),
        )
    } else if !app.status_message.is_empty() {
        (
            format!("[SUCCESS] {}", app.status_message),
            Style::default().fg(Color::Black).bg(Color::Green).bold(),
        )
    } else if app.checking {
        (
            "Checking session...".to_string(),
            Style::default().fg(Color::Yellow),
        )
    } else {
        ("Ready".to_string(), Style::default().fg(Color::Cyan))
    };

    let status = Paragraph::new(status_text)
        .style(status_style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
        .alignment(Alignment::Center);

    frame.render_widget(status, area);
}

/// Draw footer with keyboard shortcuts
pub fn draw_footer(frame: &mut Frame, app: &App, area: Rect) {
    let shortcuts = if app.exiting || app.confirm_delete.is_some() {
        vec![("y", "Yes", Color::Green), ("n", "No", Color::Red)]
    } else {
        match app.current_screen {
            CurrentScreen::Login => vec![
                ("Tab", "Provider", Color::Cyan),
                ("Enter", "Log in", Color::Green),
                ("Esc", "Quit", Color::Magenta),
            ],
            CurrentScreen::Home => vec![
                ("c", "Create URL", Color::Green),
                ("a", "Analytics", Color::Cyan),
                ("s", "Settings", Color::Yellow),
                ("q", "Quit", Color::Magenta),
            ],
            CurrentScreen::CreateUrl => vec![
                ("Tab", "Switch Field", Color::Cyan),
                ("Ctrl+T", "Alias Mode", Color::Yellow),
                ("Enter", "Shorten", Color::Green),
                ("Ctrl+R", "Reset", Color::Magenta),
                ("Esc", "Back", Color::Red),
            ],
            CurrentScreen::Analytics => vec![
                ("Up/Down", "Navigate", Color::Cyan),
                ("y", "Copy", Color::Green),
                ("d", "Delete", Color::Red),
                ("r", "Refresh", Color::Yellow),
                ("n", "New", Color::Green),
                ("Esc", "Back", Color::Magenta),
            ],
            CurrentScreen::Settings => vec![
                ("u", "Update Profile", Color::Green),
                ("l", "Logout", Color::Red),
                ("Esc", "Back", Color::Magenta),
            ],
        }
    };

    let mut spans = Vec::new();
    for (i, (key, desc, color)) in shortcuts.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(
            format!("[{}]", key),
            Style::default().fg(*color).bold(),
        ));
        spans.push(Span::styled(
            format!(" {}", desc),
            Style::default().fg(Color::White),
        ));
    }

    let footer = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);

    frame.render_widget(footer, area);
}
