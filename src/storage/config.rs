//! 应用配置持久化

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::{ensure_dir, load_toml, save_toml};
use crate::error::{Result, TaskpadError};

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub theme: ThemeConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub log: LogConfig,
}

/// 主题配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ThemeConfig {
    pub name: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: "Dark".to_string(),
        }
    }
}

/// 存储配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageConfig {
    /// 任务列表使用的存储 key
    #[serde(default = "default_storage_key")]
    pub key: String,
}

fn default_storage_key() -> String {
    "tasks".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            key: default_storage_key(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogConfig {
    /// RUST_LOG 未设置时使用的过滤级别
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// 获取配置文件路径
fn config_path(data_dir: &Path) -> PathBuf {
    data_dir.join("config.toml")
}

/// 加载配置（不存在或格式错误则返回默认值）
///
/// 配置在日志初始化之前读取，读取失败的原因随默认值一起返回，由调用方记录。
pub fn load_config(data_dir: &Path) -> (Config, Option<TaskpadError>) {
    let path = config_path(data_dir);
    if !path.exists() {
        return (Config::default(), None);
    }
    match load_toml(&path) {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    }
}

/// 保存配置
pub fn save_config(data_dir: &Path, config: &Config) -> Result<()> {
    ensure_dir(data_dir)?;
    save_toml(&config_path(data_dir), config)
}
