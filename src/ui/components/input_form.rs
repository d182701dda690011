//! 任务输入区：内容输入框 + 日期输入框

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::Focus;
use crate::theme::ThemeColors;

/// 输入区高度（带边框）
pub const INPUT_FORM_HEIGHT: u16 = 3;

/// 日期输入框宽度
const DATE_FIELD_WIDTH: u16 = 20;

/// 渲染输入区
pub fn render(
    frame: &mut Frame,
    area: Rect,
    text: &str,
    date: &str,
    focus: Focus,
    colors: &ThemeColors,
) {
    let [text_area, date_area] =
        Layout::horizontal([Constraint::Fill(1), Constraint::Length(DATE_FIELD_WIDTH)])
            .areas(area);

    render_field(
        frame,
        text_area,
        " Task ",
        text,
        "What needs to be done?",
        focus == Focus::Text,
        colors,
    );
    render_field(
        frame,
        date_area,
        " Due ",
        date,
        "YYYY-MM-DD",
        focus == Focus::Date,
        colors,
    );
}

fn render_field(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    value: &str,
    placeholder: &str,
    focused: bool,
    colors: &ThemeColors,
) {
    let border_color = if focused { colors.highlight } else { colors.border };
    let block = Block::default()
        .title(title)
        .title_style(Style::default().fg(if focused { colors.highlight } else { colors.muted }))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let mut spans = vec![Span::raw(" ")];
    if value.is_empty() && !focused {
        spans.push(Span::styled(placeholder.to_string(), Style::default().fg(colors.muted)));
    } else {
        spans.push(Span::styled(value.to_string(), Style::default().fg(colors.text)));
    }
    if focused {
        spans.push(Span::styled("█", Style::default().fg(colors.highlight))); // 光标
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}
