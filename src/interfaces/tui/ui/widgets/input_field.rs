//! 通用输入框组件
//!
//! 用于表单中的文本输入，支持激活状态高亮、占位符和遮蔽显示

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::interfaces::tui::constants::colors;

/// 输入框组件
///
/// ```rust,ignore
/// InputField::new("Destination URL", &app.form.destination_url)
///     .active(true)
///     .placeholder("https://example.com/very/long/url")
///     .render(frame, area);
/// ```
pub struct InputField<'a> {
    title: &'a str,
    value: &'a str,
    is_active: bool,
    placeholder: Option<&'a str>,
    masked: bool,
    disabled: bool,
}

impl<'a> InputField<'a> {
    pub fn new(title: &'a str, value: &'a str) -> Self {
        Self {
            title,
            value,
            is_active: false,
            placeholder: None,
            masked: false,
            disabled: false,
        }
    }

    pub fn active(mut self, active: bool) -> Self {
        self.is_active = active;
        self
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    /// 遮蔽输入（会话令牌）
    pub fn masked(mut self) -> Self {
        self.masked = true;
        self
    }

    /// 提交进行中时禁用
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    fn display_value(&self) -> (String, Style) {
        if self.value.is_empty() {
            let text = self.placeholder.unwrap_or("").to_string();
            return (text, Style::default().fg(colors::MUTED));
        }
        let text = if self.masked {
            "•".repeat(self.value.chars().count())
        } else {
            self.value.to_string()
        };
        let style = if self.disabled {
            Style::default().fg(colors::MUTED)
        } else {
            Style::default().fg(Color::White)
        };
        (text, style)
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let border_color = if self.disabled {
            colors::MUTED
        } else if self.is_active {
            colors::WARNING
        } else {
            colors::PRIMARY
        };
        let title = if self.is_active && !self.disabled {
            format!(" {} ◀ ", self.title)
        } else {
            format!(" {} ", self.title)
        };

        let (text, style) = self.display_value();
        let cursor = if self.is_active && !self.disabled {
            "▏"
        } else {
            ""
        };

        let input = Paragraph::new(format!("{}{}", text, cursor))
            .style(style)
            .block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(border_color)),
            );
        frame.render_widget(input, area);
    }
}
