use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use super::widgets::InputField;
use crate::flows::{AliasMode, FeedbackStatus};
use crate::interfaces::tui::app::{App, CreateField};
use crate::interfaces::tui::constants::colors;

pub fn draw_create_url_screen(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Create Short URL ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(colors::PRIMARY));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // URL
            Constraint::Length(1), // Alias mode
            Constraint::Length(3), // Custom alias
            Constraint::Length(1),
            Constraint::Min(3), // Feedback
        ])
        .split(inner);

    let pending = app.form.is_pending();

    InputField::new("Destination URL", &app.form.destination_url)
        .active(app.create_field == CreateField::Url)
        .disabled(pending)
        .placeholder("https://example.com/very/long/url")
        .render(frame, chunks[0]);

    let mode_span = |mode: AliasMode, label: &'static str| {
        if app.form.alias_mode == mode {
            Span::styled(
                format!("(•) {}", label),
                Style::default().fg(colors::WARNING).bold(),
            )
        } else {
            Span::styled(format!("( ) {}", label), Style::default().fg(colors::MUTED))
        }
    };
    let modes = Line::from(vec![
        Span::styled("Alias: ", Style::default().fg(Color::White)),
        mode_span(AliasMode::Generated, "Generated"),
        Span::raw("   "),
        mode_span(AliasMode::Custom, "Custom"),
    ]);
    frame.render_widget(Paragraph::new(modes), chunks[1]);

    if app.form.alias_mode == AliasMode::Custom {
        InputField::new("Custom alias", &app.form.custom_alias)
            .active(app.create_field == CreateField::Alias)
            .disabled(pending)
            .placeholder("my-link")
            .render(frame, chunks[2]);
    }

    frame.render_widget(
        Paragraph::new(feedback_lines(app)).wrap(Wrap { trim: true }),
        chunks[4],
    );
}

fn feedback_lines(app: &App) -> Vec<Line<'_>> {
    if app.form.is_pending() {
        return vec![Line::from(Span::styled(
            "Shortening...",
            Style::default().fg(colors::WARNING),
        ))];
    }

    let feedback = app.form.feedback();
    let color = match feedback.status {
        FeedbackStatus::None => return Vec::new(),
        FeedbackStatus::Success => colors::SUCCESS,
        FeedbackStatus::Error => colors::ERROR,
    };

    let mut lines = vec![Line::from(Span::styled(
        feedback.message.as_str(),
        Style::default().fg(color).bold(),
    ))];
    if let Some(ref short_url) = feedback.short_url {
        lines.push(Line::from(vec![
            Span::styled("Short URL: ", Style::default().fg(Color::White)),
            Span::styled(
                short_url.as_str(),
                Style::default().fg(Color::Blue).add_modifier(Modifier::UNDERLINED),
            ),
        ]));
    }
    lines
}
