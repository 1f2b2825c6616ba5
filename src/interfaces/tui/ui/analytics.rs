use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Row, Table},
};

use crate::flows::AnalyticsView;
use crate::interfaces::tui::app::App;
use crate::interfaces::tui::constants::{URL_TRUNCATE_LENGTH, colors, truncate};

pub fn draw_analytics_screen(frame: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(1)])
        .split(area);

    let block = Block::default()
        .title(" Your Links ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(colors::PRIMARY));

    match &app.analytics.view {
        AnalyticsView::Loading => draw_centered(frame, chunks[0], block, "Loading...", colors::WARNING),
        AnalyticsView::Error(message) => {
            let message = message.clone();
            draw_centered(frame, chunks[0], block, &message, colors::ERROR)
        }
        AnalyticsView::Empty => draw_centered(
            frame,
            chunks[0],
            block,
            "No short links yet. Press [n] to create one.",
            colors::MUTED,
        ),
        AnalyticsView::Populated(links) => {
            let rows: Vec<Row> = links
                .iter()
                .map(|link| {
                    let copied = app.analytics.notice_for(&link.short_code).is_some();
                    let code_style = if copied {
                        Style::default().fg(colors::SUCCESS).bold()
                    } else {
                        Style::default().fg(Color::Cyan)
                    };
                    Row::new(vec![
                        Span::styled(link.short_code.clone(), code_style),
                        Span::styled(
                            truncate(&link.original_url, URL_TRUNCATE_LENGTH),
                            Style::default().fg(Color::White),
                        ),
                        Span::styled(link.clicks.to_string(), Style::default().fg(Color::Yellow)),
                    ])
                })
                .collect();

            let header = Row::new(vec!["Code", "Original URL", "Clicks"]).style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            );

            let table = Table::new(
                rows,
                [
                    Constraint::Length(16),
                    Constraint::Min(20),
                    Constraint::Length(8),
                ],
            )
            .header(header)
            .block(block)
            .row_highlight_style(
                Style::default()
                    .bg(colors::HIGHLIGHT_BG)
                    .fg(colors::HIGHLIGHT_FG),
            )
            .highlight_symbol("▶ ");

            frame.render_stateful_widget(table, chunks[0], &mut app.table_state);
        }
    }

    let hint = match (&app.analytics.notice, &app.analytics.action_message) {
        (Some(notice), _) => Line::from(vec![
            Span::styled(notice.message.as_str(), Style::default().fg(colors::SUCCESS)),
            Span::styled(
                format!(" {}", notice.short_url),
                Style::default().fg(colors::MUTED),
            ),
        ]),
        (None, Some(message)) => Line::from(Span::styled(
            message.as_str(),
            Style::default().fg(colors::ERROR),
        )),
        (None, None) => Line::from(""),
    };
    frame.render_widget(Paragraph::new(hint), chunks[1]);
}

fn draw_centered(frame: &mut Frame, area: Rect, block: Block, text: &str, color: Color) {
    let paragraph = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(text, Style::default().fg(color).bold())),
    ])
    .alignment(Alignment::Center)
    .block(block);
    frame.render_widget(paragraph, area);
}
