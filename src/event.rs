use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{App, Focus};
use crate::model::Filter;

/// 处理事件，返回 true 表示应该继续运行
pub fn handle_events(app: &mut App) -> io::Result<bool> {
    // 更新 Toast 状态
    app.update_toast();

    // 轮询事件（100ms 超时）
    if event::poll(Duration::from_millis(100))? {
        if let Event::Key(key) = event::read()? {
            // 只处理按下事件
            if key.kind != KeyEventKind::Press {
                return Ok(true);
            }
            handle_key(app, key);
        }
    }

    Ok(!app.should_quit)
}

pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ctrl+C 任何状态下都退出
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return;
    }

    // 提示弹窗：阻塞其他输入，直到关闭
    if app.alert.is_some() {
        handle_alert_key(app, key);
        return;
    }

    // 帮助面板
    if app.show_help {
        handle_help_key(app, key);
        return;
    }

    if app.focus.is_input() {
        handle_input_key(app, key);
    } else {
        handle_list_key(app, key);
    }
}

fn handle_alert_key(app: &mut App, key: KeyEvent) {
    if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
        app.dismiss_alert();
    }
}

fn handle_help_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => app.show_help = false,
        _ => {}
    }
}

/// 处理输入框（任务内容 / 日期）的键盘事件
fn handle_input_key(app: &mut App, key: KeyEvent) {
    match key.code {
        // 提交，等同于点击添加按钮
        KeyCode::Enter => app.submit_task(),

        KeyCode::Tab => app.focus_next(),
        KeyCode::BackTab => app.focus_prev(),

        // 离开输入框
        KeyCode::Esc => app.set_focus(Focus::List),

        KeyCode::Backspace => app.delete_char(),

        KeyCode::Char(c) => app.input_char(c),

        _ => {}
    }
}

/// 处理任务列表的键盘事件
fn handle_list_key(app: &mut App, key: KeyEvent) {
    match key.code {
        // 退出
        KeyCode::Char('q') => app.quit(),

        // 导航
        KeyCode::Char('j') | KeyCode::Down => app.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.select_previous(),

        // 完成 / 取消完成
        KeyCode::Char(' ') | KeyCode::Char('x') | KeyCode::Enter => app.toggle_selected(),

        // 删除
        KeyCode::Char('d') | KeyCode::Delete => app.delete_selected(),

        // 过滤
        KeyCode::Char('1') => app.set_filter(Filter::All),
        KeyCode::Char('2') => app.set_filter(Filter::Active),
        KeyCode::Char('3') => app.set_filter(Filter::Completed),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('f') => app.next_filter(),
        KeyCode::Left | KeyCode::Char('h') => app.prev_filter(),

        // 回到输入框
        KeyCode::Char('a') | KeyCode::Char('i') => app.set_focus(Focus::Text),
        KeyCode::Tab => app.focus_next(),
        KeyCode::BackTab => app.focus_prev(),

        KeyCode::Char('t') | KeyCode::Char('T') => app.cycle_theme(),
        KeyCode::Char('?') => app.toggle_help(),

        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::test_app;

    fn press(app: &mut App, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_enter_adds_task() {
        let mut app = test_app();
        type_str(&mut app, "Buy milk");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.store.len(), 1);
        assert_eq!(app.store.tasks()[0].text, "Buy milk");
        assert!(app.text_input.is_empty());
        assert_eq!(app.focus, Focus::Text);
    }

    #[test]
    fn test_enter_from_date_field_adds_task() {
        let mut app = test_app();
        type_str(&mut app, "Dentist");
        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "2024-03-05");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.store.len(), 1);
        assert_eq!(
            app.store.tasks()[0].date_label().as_deref(),
            Some("Mar 5")
        );
        assert_eq!(app.focus, Focus::Text);
    }

    #[test]
    fn test_alert_blocks_input_until_dismissed() {
        let mut app = test_app();
        press(&mut app, KeyCode::Enter);
        assert!(app.alert.is_some());

        // 弹窗期间的字符输入被忽略
        type_str(&mut app, "abc");
        assert!(app.text_input.is_empty());
        assert!(app.alert.is_some());

        press(&mut app, KeyCode::Esc);
        assert!(app.alert.is_none());
        type_str(&mut app, "abc");
        assert_eq!(app.text_input, "abc");
    }

    #[test]
    fn test_list_keys() {
        let mut app = test_app();
        type_str(&mut app, "one");
        press(&mut app, KeyCode::Enter);
        type_str(&mut app, "two");
        press(&mut app, KeyCode::Enter);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.focus, Focus::List);

        press(&mut app, KeyCode::Char('k'));
        press(&mut app, KeyCode::Char(' '));
        assert!(app.store.tasks()[0].completed);

        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.filter, Filter::Active);
        assert_eq!(app.visible().len(), 1);

        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.filter, Filter::Completed);
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.store.len(), 1);
        assert_eq!(app.store.tasks()[0].text, "two");

        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.focus, Focus::Text);
    }

    #[test]
    fn test_q_in_text_field_is_input() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit);
        assert_eq!(app.text_input, "q");

        app.set_focus(Focus::List);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_help_panel() {
        let mut app = test_app();
        app.set_focus(Focus::List);
        press(&mut app, KeyCode::Char('?'));
        assert!(app.show_help);

        // 帮助面板打开时不处理列表按键
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.filter, Filter::All);

        press(&mut app, KeyCode::Esc);
        assert!(!app.show_help);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut app = test_app();
        handle_key(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(app.should_quit);
    }
}
