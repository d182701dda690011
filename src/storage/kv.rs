//! 基于文件的 key-value 存储
//!
//! 布局: {data_dir}/storage/{key}.json，一个 key 一个文件。

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[cfg(test)]
use std::collections::HashMap;

use super::KeyValueStorage;

/// 文件存储（每个 key 写入 storage 目录下的独立文件）
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// 在数据目录下打开存储，目录不存在时延迟到第一次写入再创建
    pub fn new(data_dir: &Path) -> Self {
        Self {
            root: data_dir.join("storage"),
        }
    }

    /// key 对应的文件路径
    pub fn item_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", sanitize_key(key)))
    }
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> io::Result<Option<String>> {
        let path = self.item_path(key);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> io::Result<()> {
        fs::create_dir_all(&self.root)?;

        // 先写临时文件再 rename，避免写到一半留下截断的文件
        let path = self.item_path(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)
    }
}

/// key 转换为安全的文件名
fn sanitize_key(key: &str) -> String {
    let name: String = key
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if name.is_empty() {
        "_".to_string()
    } else {
        name
    }
}

/// 内存存储，测试用
#[cfg(test)]
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
    /// 为 true 时所有写入都失败
    pub fail_writes: bool,
}

#[cfg(test)]
impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(key: &str, value: &str) -> Self {
        let mut storage = Self::default();
        storage.items.insert(key.to_string(), value.to_string());
        storage
    }
}

#[cfg(test)]
impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> io::Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> io::Result<()> {
        if self.fail_writes {
            return Err(io::Error::new(io::ErrorKind::Other, "write disabled"));
        }
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
