/// 截断字符串到指定最大长度，超出部分用省略号替代
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        format!("{}…", s.chars().take(max_len - 1).collect::<String>())
    }
}

pub mod alert_dialog;
pub mod empty_state;
pub mod filter_tabs;
pub mod footer;
pub mod header;
pub mod help_panel;
pub mod input_form;
pub mod task_list;
pub mod toast;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exactly10!", 10), "exactly10!");
        assert_eq!(truncate("a longer task text", 8), "a longe…");
        assert_eq!(truncate("买牛奶和面包", 4), "买牛奶…");
    }
}
