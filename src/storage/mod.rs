pub mod config;
pub mod kv;

use std::io;
use std::path::{Path, PathBuf};

use crate::error::Result;

pub use kv::FileStorage;
#[cfg(test)]
pub use kv::MemoryStorage;

/// 本地 key-value 存储
///
/// 每个 key 对应一整块字符串值，读写都是整体替换，没有部分更新。
pub trait KeyValueStorage {
    /// 读取 key 对应的值，不存在返回 `None`
    fn get_item(&self, key: &str) -> io::Result<Option<String>>;

    /// 覆盖写入 key 对应的值
    fn set_item(&mut self, key: &str, value: &str) -> io::Result<()>;
}

impl<T: KeyValueStorage + ?Sized> KeyValueStorage for Box<T> {
    fn get_item(&self, key: &str) -> io::Result<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> io::Result<()> {
        (**self).set_item(key, value)
    }
}

/// 获取默认数据目录 ~/.taskpad/
pub fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".taskpad")
}

/// 确保目录存在并返回路径
pub fn ensure_dir(path: &Path) -> io::Result<PathBuf> {
    std::fs::create_dir_all(path)?;
    Ok(path.to_path_buf())
}

/// 从 TOML 文件加载反序列化数据
pub fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// 将数据序列化后保存到 TOML 文件
pub fn save_toml<T: serde::Serialize>(path: &Path, data: &T) -> Result<()> {
    let content = toml::to_string_pretty(data)?;
    std::fs::write(path, content)?;
    Ok(())
}
