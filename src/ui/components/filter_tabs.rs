use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::model::Filter;
use crate::theme::ThemeColors;

/// 渲染过滤 Tab 栏（同一时间只有一个高亮）
pub fn render(frame: &mut Frame, area: Rect, current: Filter, colors: &ThemeColors) {
    let filters = Filter::all();

    let mut spans = Vec::new();
    spans.push(Span::raw("   "));

    for (i, filter) in filters.iter().enumerate() {
        let label = format!("  {} {}  ", i + 1, filter.label());

        if *filter == current {
            spans.push(Span::styled(
                label,
                Style::default()
                    .fg(colors.tab_active_fg)
                    .bg(colors.tab_active_bg)
                    .add_modifier(Modifier::BOLD),
            ));
        } else {
            spans.push(Span::styled(label, Style::default().fg(colors.muted)));
        }

        if i < filters.len() - 1 {
            spans.push(Span::raw("  "));
        }
    }

    let block = Block::default()
        .borders(Borders::LEFT | Borders::RIGHT | Borders::BOTTOM)
        .border_style(Style::default().fg(colors.border));

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}
