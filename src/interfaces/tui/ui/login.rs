use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};
use strum::IntoEnumIterator;

use super::widgets::InputField;
use crate::interfaces::tui::app::App;
use crate::session::OAuthProvider;

pub fn draw_login_screen(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Providers
            Constraint::Length(5), // Login URL
            Constraint::Length(3), // Token input
            Constraint::Min(0),
        ])
        .split(area);

    let mut provider_spans = vec![Span::styled(
        "Provider: ",
        Style::default().fg(Color::DarkGray),
    )];
    for provider in OAuthProvider::iter() {
        let style = if provider == app.login.provider {
            Style::default().fg(Color::Black).bg(Color::Cyan).bold()
        } else {
            Style::default().fg(Color::Cyan)
        };
        provider_spans.push(Span::styled(format!(" {} ", provider.as_ref()), style));
        provider_spans.push(Span::raw(" "));
    }
    let providers = Paragraph::new(Line::from(provider_spans)).block(
        Block::default()
            .title(" Log in ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(providers, chunks[0]);

    let instructions = vec![
        Line::from(Span::styled(
            "Open this URL in a browser and finish the login:",
            Style::default().fg(Color::White),
        )),
        Line::from(Span::styled(
            app.login_url(),
            Style::default().fg(Color::Blue).add_modifier(Modifier::UNDERLINED),
        )),
        Line::from(Span::styled(
            format!(
                "Then paste the value of the '{}' cookie below.",
                app.ctx.config().api.session_cookie
            ),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(
        Paragraph::new(instructions).wrap(Wrap { trim: true }),
        chunks[1],
    );

    let title = if app.login.pending {
        "Session token (verifying...)"
    } else {
        "Session token"
    };
    InputField::new(title, &app.login.token_input)
        .active(true)
        .masked()
        .disabled(app.login.pending)
        .placeholder("paste session cookie value")
        .render(frame, chunks[2]);
}
