use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::Focus;
use crate::theme::ThemeColors;

/// 渲染底部快捷键提示栏
pub fn render(frame: &mut Frame, area: Rect, focus: Focus, has_items: bool, colors: &ThemeColors) {
    let shortcuts = get_shortcuts(focus, has_items);

    let mut spans = Vec::new();
    spans.push(Span::raw("  "));

    for (i, (key, desc)) in shortcuts.iter().enumerate() {
        spans.push(Span::styled(
            *key,
            Style::default()
                .fg(colors.highlight)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format!(" {}", desc),
            Style::default().fg(colors.muted),
        ));

        if i < shortcuts.len() - 1 {
            spans.push(Span::raw("   "));
        }
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.border));

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn get_shortcuts(focus: Focus, has_items: bool) -> Vec<(&'static str, &'static str)> {
    match focus {
        Focus::Text | Focus::Date => vec![
            ("Enter", "add"),
            ("Tab", "next field"),
            ("Esc", "list"),
        ],
        Focus::List => {
            if has_items {
                vec![
                    ("Space", "toggle"),
                    ("d", "delete"),
                    ("1-3", "filter"),
                    ("a", "add"),
                    ("?", "help"),
                    ("q", "quit"),
                ]
            } else {
                vec![("1-3", "filter"), ("a", "add"), ("?", "help"), ("q", "quit")]
            }
        }
    }
}
