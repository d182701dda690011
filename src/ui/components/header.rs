use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::theme::ThemeColors;

/// Header 总高度：边框 + 标题行
pub const HEADER_HEIGHT: u16 = 2;

/// 渲染顶部标题栏（名称 + 任务统计）
pub fn render(
    frame: &mut Frame,
    area: Rect,
    active_count: usize,
    completed_count: usize,
    colors: &ThemeColors,
) {
    let block = Block::default()
        .borders(Borders::TOP | Borders::LEFT | Borders::RIGHT)
        .border_style(Style::default().fg(colors.border));

    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    let stats = format!("{} active / {} done ", active_count, completed_count);
    let [left_area, right_area] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(stats.chars().count() as u16),
    ])
    .areas(inner_area);

    let title = Paragraph::new(Span::styled(
        " taskpad",
        Style::default()
            .fg(colors.title)
            .add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(title, left_area);

    let right = Paragraph::new(Span::styled(stats, Style::default().fg(colors.muted)));
    frame.render_widget(right, right_area);
}
