use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};

use crate::model::Task;
use crate::theme::ThemeColors;

use super::truncate;

/// 渲染任务列表
///
/// 每次都根据可见任务重新构建全部行。
pub fn render(
    frame: &mut Frame,
    area: Rect,
    tasks: &[&Task],
    selected_index: Option<usize>,
    list_focused: bool,
    colors: &ThemeColors,
) {
    // 文本列可用宽度：总宽 - 边框 - 选择器 - 复选框 - 日期 - 列间距
    let text_width = (area.width as usize).saturating_sub(2 + 2 + 4 + 8 + 3).max(4);

    let rows: Vec<Row> = tasks
        .iter()
        .enumerate()
        .map(|(i, task)| {
            let is_selected = selected_index == Some(i);
            let selector = if is_selected && list_focused { "❯" } else { " " };

            let (checkbox, checkbox_style) = if task.completed {
                ("[x]", Style::default().fg(colors.done))
            } else {
                ("[ ]", Style::default().fg(colors.muted))
            };

            let text_style = if task.completed {
                Style::default()
                    .fg(colors.muted)
                    .add_modifier(Modifier::CROSSED_OUT)
            } else {
                Style::default().fg(colors.text)
            };

            let date = task.date_label().unwrap_or_default();

            Row::new(vec![
                Cell::from(selector).style(Style::default().fg(colors.highlight)),
                Cell::from(checkbox).style(checkbox_style),
                Cell::from(truncate(&task.text, text_width)).style(text_style),
                Cell::from(date).style(Style::default().fg(colors.due)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(2), // 选择器
        Constraint::Length(4), // 复选框
        Constraint::Fill(1),   // 任务内容
        Constraint::Length(8), // 日期
    ];

    let border_color = if list_focused { colors.highlight } else { colors.border };
    let table = Table::new(rows, widths)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::RIGHT)
                .border_style(Style::default().fg(border_color)),
        )
        .row_highlight_style(
            Style::default()
                .bg(colors.bg_secondary)
                .add_modifier(Modifier::BOLD),
        );

    let mut table_state = TableState::default();
    table_state.select(selected_index);

    frame.render_stateful_widget(table, area, &mut table_state);
}
