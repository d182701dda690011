use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::model::Filter;
use crate::theme::ThemeColors;

/// 渲染空状态（提示文字垂直居中）
pub fn render(frame: &mut Frame, area: Rect, filter: Filter, colors: &ThemeColors) {
    let block = Block::default()
        .borders(Borders::LEFT | Borders::RIGHT)
        .border_style(Style::default().fg(colors.border));

    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    let lines = vec![
        Line::from(Span::styled(
            get_hint_text(filter),
            Style::default().fg(colors.muted),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Type a task and press ", Style::default().fg(colors.text)),
            Span::styled(
                " Enter ",
                Style::default()
                    .fg(colors.highlight)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
    ];

    let height = lines.len() as u16;
    let y_offset = inner_area.height.saturating_sub(height) / 2;
    let centered_area = Rect {
        x: inner_area.x,
        y: inner_area.y + y_offset,
        width: inner_area.width,
        height: height.min(inner_area.height),
    };

    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        centered_area,
    );
}

fn get_hint_text(filter: Filter) -> &'static str {
    match filter {
        Filter::All => "No tasks yet",
        Filter::Active => "Nothing left to do",
        Filter::Completed => "No completed tasks",
    }
}
