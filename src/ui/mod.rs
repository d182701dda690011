pub mod components;

use ratatui::{
    layout::{Constraint, Layout},
    style::Style,
    widgets::{Block, Widget},
    Frame,
};

use crate::app::{App, Focus};

use components::{
    alert_dialog, empty_state, filter_tabs, footer, header, help_panel, input_form, task_list,
    toast,
};

/// 渲染主界面
///
/// 每帧都从 `App` 状态完整重建，不做增量更新。
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let colors = &app.colors;

    // 填充整个背景
    Block::default()
        .style(Style::default().bg(colors.bg))
        .render(area, frame.buffer_mut());

    let [header_area, input_area, tabs_area, list_area, footer_area] = Layout::vertical([
        Constraint::Length(header::HEADER_HEIGHT),
        Constraint::Length(input_form::INPUT_FORM_HEIGHT),
        Constraint::Length(2),
        Constraint::Fill(1),
        Constraint::Length(3),
    ])
    .areas(area);

    header::render(
        frame,
        header_area,
        app.store.active_count(),
        app.store.completed_count(),
        colors,
    );

    input_form::render(
        frame,
        input_area,
        &app.text_input,
        &app.date_input,
        app.focus,
        colors,
    );

    filter_tabs::render(frame, tabs_area, app.filter, colors);

    let visible = app.visible();
    if visible.is_empty() {
        empty_state::render(frame, list_area, app.filter, colors);
    } else {
        task_list::render(
            frame,
            list_area,
            &visible,
            app.list_state.selected(),
            app.focus == Focus::List,
            colors,
        );
    }

    footer::render(frame, footer_area, app.focus, !visible.is_empty(), colors);

    // 浮层：帮助 < Toast < 提示弹窗
    if app.show_help {
        help_panel::render(frame, colors);
    }

    if let Some(ref toast) = app.toast {
        toast::render(frame, &toast.message, colors);
    }

    if let Some(ref message) = app.alert {
        alert_dialog::render(frame, message, colors);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::test_app;
    use crate::model::Filter;
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();

        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_render_tasks_and_dates() {
        let mut app = test_app();
        app.store.add("Buy milk", "").unwrap();
        app.store.add("Dentist", "2024-03-05").unwrap();
        app.clamp_selection();

        let screen = draw(&app);
        assert!(screen.contains("Buy milk"));
        assert!(screen.contains("Dentist"));
        assert!(screen.contains("Mar 5"));
        assert!(screen.contains("2 active / 0 done"));
    }

    #[test]
    fn test_render_rebuilds_for_filter() {
        let mut app = test_app();
        let id = app.store.add("Buy milk", "").unwrap();
        app.store.add("Walk dog", "").unwrap();
        app.store.toggle(id);

        app.set_filter(Filter::Active);
        let screen = draw(&app);
        assert!(!screen.contains("Buy milk"));
        assert!(screen.contains("Walk dog"));

        app.set_filter(Filter::Completed);
        let screen = draw(&app);
        assert!(screen.contains("Buy milk"));
        assert!(!screen.contains("Walk dog"));
    }

    #[test]
    fn test_render_empty_and_alert() {
        let mut app = test_app();
        let screen = draw(&app);
        assert!(screen.contains("No tasks yet"));

        app.submit_task();
        let screen = draw(&app);
        assert!(screen.contains("Please enter a task!"));
    }
}
