use std::path::PathBuf;
use std::time::{Duration, Instant};

use ratatui::widgets::ListState;

use crate::model::{Filter, Task, TaskId, TaskStore};
use crate::storage::config::{self, Config};
use crate::storage::KeyValueStorage;
use crate::theme::{get_theme_colors, Theme, ThemeColors};

/// 界面使用的任务存储（持久化实现可注入）
pub type Store = TaskStore<Box<dyn KeyValueStorage>>;

/// 日期输入最大长度 (YYYY-MM-DD)
const DATE_INPUT_MAX: usize = 10;

/// Toast 消息
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub expires_at: Instant,
}

impl Toast {
    pub fn new(message: impl Into<String>, duration: Duration) -> Self {
        Self {
            message: message.into(),
            expires_at: Instant::now() + duration,
        }
    }

    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// 当前获得输入焦点的区域
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// 任务内容输入框
    #[default]
    Text,
    /// 日期输入框
    Date,
    /// 任务列表
    List,
}

impl Focus {
    pub fn next(&self) -> Self {
        match self {
            Focus::Text => Focus::Date,
            Focus::Date => Focus::List,
            Focus::List => Focus::Text,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Focus::Text => Focus::List,
            Focus::Date => Focus::Text,
            Focus::List => Focus::Date,
        }
    }

    /// 是否在输入框中
    pub fn is_input(&self) -> bool {
        matches!(self, Focus::Text | Focus::Date)
    }
}

/// 全局应用状态
pub struct App {
    /// 是否应该退出
    pub should_quit: bool,
    /// 任务列表
    pub store: Store,
    /// 当前过滤条件
    pub filter: Filter,
    /// 输入焦点
    pub focus: Focus,
    /// 任务内容输入
    pub text_input: String,
    /// 日期输入 (YYYY-MM-DD)
    pub date_input: String,
    /// 可见列表的选择状态
    pub list_state: ListState,
    /// 阻塞式提示弹窗，显示期间只响应关闭按键
    pub alert: Option<String>,
    /// Toast 提示
    pub toast: Option<Toast>,
    /// 是否显示帮助面板
    pub show_help: bool,
    /// 当前主题
    pub theme: Theme,
    /// 当前颜色方案
    pub colors: ThemeColors,
    config: Config,
    /// 配置保存目录，None 时不写配置（测试）
    data_dir: Option<PathBuf>,
}

impl App {
    pub fn new(store: Store, config: Config, data_dir: Option<PathBuf>) -> Self {
        let theme = Theme::from_name(&config.theme.name);

        let mut app = Self {
            should_quit: false,
            store,
            filter: Filter::default(),
            focus: Focus::default(),
            text_input: String::new(),
            date_input: String::new(),
            list_state: ListState::default(),
            alert: None,
            toast: None,
            show_help: false,
            theme,
            colors: get_theme_colors(theme),
            config,
            data_dir,
        };
        app.clamp_selection();
        app
    }

    /// 当前过滤条件下的可见任务（每次渲染重新计算）
    pub fn visible(&self) -> Vec<&Task> {
        self.store.visible(self.filter)
    }

    /// 当前选中任务的 ID
    pub fn selected_task_id(&self) -> Option<TaskId> {
        let index = self.list_state.selected()?;
        self.visible().get(index).map(|t| t.id)
    }

    // ========== 任务操作 ==========

    /// 提交输入框内容，创建新任务
    pub fn submit_task(&mut self) {
        match self.store.add(&self.text_input, &self.date_input) {
            Ok(id) => {
                self.text_input.clear();
                self.date_input.clear();
                self.focus = Focus::Text;
                self.select_task(id);
            }
            Err(e) if e.is_user_facing() => {
                tracing::debug!("Add rejected: {}", e);
                self.alert = Some(e.to_string());
            }
            Err(e) => {
                tracing::warn!("Add failed: {}", e);
                self.show_toast(format!("Add failed: {}", e));
            }
        }
    }

    /// 切换选中任务的完成状态
    pub fn toggle_selected(&mut self) {
        let Some(id) = self.selected_task_id() else {
            return;
        };
        self.store.toggle(id);
        self.clamp_selection();
    }

    /// 删除选中任务
    pub fn delete_selected(&mut self) {
        let Some(id) = self.selected_task_id() else {
            return;
        };
        let text = self.store.get(id).map(|t| t.text.clone());
        if self.store.delete(id) {
            if let Some(text) = text {
                self.show_toast(format!("Deleted: {}", text));
            }
        }
        self.clamp_selection();
    }

    // ========== 过滤 ==========

    pub fn set_filter(&mut self, filter: Filter) {
        if self.filter == filter {
            return;
        }
        self.filter = filter;
        self.list_state.select(None);
        self.clamp_selection();
    }

    pub fn next_filter(&mut self) {
        self.set_filter(self.filter.next());
    }

    pub fn prev_filter(&mut self) {
        self.set_filter(self.filter.prev());
    }

    // ========== 列表选择 ==========

    /// 选中下一项
    pub fn select_next(&mut self) {
        let list_len = self.visible().len();
        if list_len == 0 {
            return;
        }
        let current = self.list_state.selected().unwrap_or(0);
        self.list_state.select(Some((current + 1) % list_len));
    }

    /// 选中上一项
    pub fn select_previous(&mut self) {
        let list_len = self.visible().len();
        if list_len == 0 {
            return;
        }
        let current = self.list_state.selected().unwrap_or(0);
        let prev = if current == 0 { list_len - 1 } else { current - 1 };
        self.list_state.select(Some(prev));
    }

    /// 保证选中项落在可见列表范围内
    pub fn clamp_selection(&mut self) {
        let list_len = self.visible().len();
        let selected = match (list_len, self.list_state.selected()) {
            (0, _) => None,
            (_, None) => Some(0),
            (len, Some(i)) => Some(i.min(len - 1)),
        };
        self.list_state.select(selected);
    }

    /// 选中指定任务（不可见时只做范围修正）
    fn select_task(&mut self, id: TaskId) {
        let index = self.visible().iter().position(|t| t.id == id);
        if index.is_some() {
            self.list_state.select(index);
        } else {
            self.clamp_selection();
        }
    }

    // ========== 输入 ==========

    /// 当前输入框输入字符
    pub fn input_char(&mut self, c: char) {
        match self.focus {
            Focus::Text => self.text_input.push(c),
            Focus::Date => {
                if (c.is_ascii_digit() || c == '-') && self.date_input.len() < DATE_INPUT_MAX {
                    self.date_input.push(c);
                }
            }
            Focus::List => {}
        }
    }

    /// 当前输入框删除字符
    pub fn delete_char(&mut self) {
        match self.focus {
            Focus::Text => {
                self.text_input.pop();
            }
            Focus::Date => {
                self.date_input.pop();
            }
            Focus::List => {}
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    pub fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
    }

    // ========== 弹窗 / Toast / 主题 ==========

    /// 关闭提示弹窗，焦点回到任务输入框
    pub fn dismiss_alert(&mut self) {
        self.alert = None;
        self.focus = Focus::Text;
    }

    /// 显示 Toast 消息
    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast::new(message, Duration::from_secs(2)));
    }

    /// 更新 Toast 状态（清理过期的 Toast）
    pub fn update_toast(&mut self) {
        if let Some(ref toast) = self.toast {
            if toast.is_expired() {
                self.toast = None;
            }
        }
    }

    /// 切换到下一个主题并写入配置
    pub fn cycle_theme(&mut self) {
        self.theme = self.theme.next();
        self.colors = get_theme_colors(self.theme);
        self.config.theme.name = self.theme.label().to_string();

        if let Some(ref dir) = self.data_dir {
            if let Err(e) = config::save_config(dir, &self.config) {
                tracing::warn!("Failed to save theme: {}", e);
            }
        }
        self.show_toast(format!("Theme: {}", self.theme.label()));
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// 退出应用
    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}
