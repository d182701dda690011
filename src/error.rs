//! Taskpad 统一错误类型定义
//!
//! 使用 `thiserror` 库提供统一的错误处理。

use std::io;
use thiserror::Error;

/// Taskpad 错误类型
#[derive(Debug, Error)]
pub enum TaskpadError {
    /// I/O 错误（文件读写、目录操作等）
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON 解析/序列化错误
    #[error("JSON error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// TOML 解析错误
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// TOML 序列化错误
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// 任务内容为空（弹窗提示给用户）
    #[error("Please enter a task!")]
    EmptyText,

    /// 日期无法解析（弹窗提示给用户）
    #[error("Invalid date: {0} (expected YYYY-MM-DD)")]
    InvalidDate(String),

    /// 已有任务 ID 达到上限，无法再分配新 ID
    #[error("No task ids left after {0}")]
    IdsExhausted(i64),
}

/// Taskpad Result 类型别名
pub type Result<T> = std::result::Result<T, TaskpadError>;

impl TaskpadError {
    /// 创建 InvalidDate 错误
    pub fn invalid_date(input: impl Into<String>) -> Self {
        Self::InvalidDate(input.into())
    }

    /// 是否为需要直接展示给用户的输入错误
    pub fn is_user_facing(&self) -> bool {
        matches!(self, Self::EmptyText | Self::InvalidDate(_))
    }
}
