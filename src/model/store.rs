//! 任务列表存储
//!
//! 内存中的任务列表是唯一状态来源，每次变更后整体写回 key-value 存储。
//! 写入失败只记录日志，不影响内存中的变更。

use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{Result, TaskpadError};
use crate::storage::KeyValueStorage;

use super::task::{parse_due_date, visible_tasks, Filter, Task, TaskId};

/// 当前毫秒时间戳
fn now_millis() -> TaskId {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as TaskId)
        .unwrap_or_default()
}

/// 任务列表 + 持久化
pub struct TaskStore<S: KeyValueStorage> {
    tasks: Vec<Task>,
    storage: S,
    key: String,
    /// 最近分配的 ID，保证同一毫秒内连续添加也不会重复
    last_id: TaskId,
    clock: fn() -> TaskId,
}

impl<S: KeyValueStorage> TaskStore<S> {
    /// 从存储加载任务列表（不存在或格式错误时为空列表）
    pub fn load(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let tasks = match read_tasks(&storage, &key) {
            Ok(Some(tasks)) => {
                tracing::info!("Loaded {} tasks from '{}'", tasks.len(), key);
                tasks
            }
            Ok(None) => {
                tracing::info!("No stored tasks under '{}', starting empty", key);
                Vec::new()
            }
            Err(e) => {
                tracing::warn!("Stored tasks under '{}' unusable, starting empty: {}", key, e);
                Vec::new()
            }
        };

        let last_id = tasks.iter().map(|t| t.id).max().unwrap_or(0);

        Self {
            tasks,
            storage,
            key,
            last_id,
            clock: now_millis,
        }
    }

    /// 添加任务，返回新任务 ID
    ///
    /// `text` 去除首尾空白后不能为空；`date` 为原始输入，空白表示无日期。
    /// 校验失败时列表保持不变。
    pub fn add(&mut self, text: &str, date: &str) -> Result<TaskId> {
        let text = text.trim();
        if text.is_empty() {
            return Err(TaskpadError::EmptyText);
        }
        let date = parse_due_date(date)?;

        let id = self.next_id()?;
        self.tasks.push(Task::new(id, text, date));
        tracing::debug!(id, "Added task");

        self.persist();
        Ok(id)
    }

    /// 切换任务完成状态，ID 不存在时不做任何事
    pub fn toggle(&mut self, id: TaskId) -> bool {
        let mut found = false;
        for task in self.tasks.iter_mut().filter(|t| t.id == id) {
            task.completed = !task.completed;
            found = true;
        }
        tracing::debug!(id, found, "Toggled task");

        self.persist();
        found
    }

    /// 删除任务，ID 不存在时不做任何事
    pub fn delete(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        let found = self.tasks.len() != before;
        tracing::debug!(id, found, "Deleted task");

        self.persist();
        found
    }

    /// 当前过滤条件下的可见任务
    pub fn visible(&self, filter: Filter) -> Vec<&Task> {
        visible_tasks(&self.tasks, filter)
    }

    #[cfg(test)]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// 未完成任务数
    pub fn active_count(&self) -> usize {
        self.tasks.iter().filter(|t| !t.completed).count()
    }

    /// 已完成任务数
    pub fn completed_count(&self) -> usize {
        self.tasks.len() - self.active_count()
    }

    #[cfg(test)]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    #[cfg(test)]
    pub fn set_clock(&mut self, clock: fn() -> TaskId) {
        self.clock = clock;
    }

    /// 分配新 ID：当前时间，若不大于上一个 ID 则顺延
    fn next_id(&mut self) -> Result<TaskId> {
        let floor = self
            .last_id
            .checked_add(1)
            .ok_or(TaskpadError::IdsExhausted(self.last_id))?;
        let id = (self.clock)().max(floor);
        self.last_id = id;
        Ok(id)
    }

    /// 整体写回存储（失败只记录日志）
    fn persist(&mut self) {
        if let Err(e) = self.write_tasks() {
            tracing::warn!("Failed to save tasks to '{}': {}", self.key, e);
        }
    }

    fn write_tasks(&mut self) -> Result<()> {
        let content = serde_json::to_string(&self.tasks)?;
        self.storage.set_item(&self.key, &content)?;
        Ok(())
    }
}

/// 读取并解析存储中的任务列表
fn read_tasks<S: KeyValueStorage>(storage: &S, key: &str) -> Result<Option<Vec<Task>>> {
    let Some(content) = storage.get_item(key)? else {
        return Ok(None);
    };
    Ok(Some(serde_json::from_str(&content)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileStorage, MemoryStorage};
    use chrono::NaiveDate;

    const KEY: &str = "tasks";

    fn empty_store() -> TaskStore<MemoryStorage> {
        TaskStore::load(MemoryStorage::new(), KEY)
    }

    fn fixed_clock() -> TaskId {
        1_700_000_000_000
    }

    #[test]
    fn test_add_appends_task() {
        let mut store = empty_store();
        let id = store.add("  Buy milk  ", "").unwrap();

        assert_eq!(store.len(), 1);
        let task = store.get(id).unwrap();
        assert_eq!(task.text, "Buy milk");
        assert_eq!(task.date, None);
        assert!(!task.completed);
    }

    #[test]
    fn test_add_with_date() {
        let mut store = empty_store();
        let id = store.add("Dentist", "2024-03-05").unwrap();
        assert_eq!(
            store.get(id).unwrap().date,
            NaiveDate::from_ymd_opt(2024, 3, 5)
        );
        assert_eq!(store.get(id).unwrap().date_label().as_deref(), Some("Mar 5"));
    }

    #[test]
    fn test_add_empty_text_rejected() {
        let mut store = empty_store();
        store.add("keep", "").unwrap();

        assert!(matches!(store.add("", ""), Err(TaskpadError::EmptyText)));
        assert!(matches!(store.add("   \t", "2024-01-01"), Err(TaskpadError::EmptyText)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_add_invalid_date_rejected() {
        let mut store = empty_store();
        assert!(matches!(
            store.add("Task", "31/12/2024"),
            Err(TaskpadError::InvalidDate(_))
        ));
        assert!(store.is_empty());
        assert_eq!(store.storage().get_item(KEY).unwrap(), None);
    }

    #[test]
    fn test_ids_unique_within_same_tick() {
        let mut store = empty_store();
        store.set_clock(fixed_clock);

        let a = store.add("a", "").unwrap();
        let b = store.add("b", "").unwrap();
        let c = store.add("c", "").unwrap();

        assert_eq!(a, fixed_clock());
        assert!(a < b && b < c);
    }

    #[test]
    fn test_ids_continue_after_loaded_max() {
        let json = r#"[{"id":9000000000000,"text":"future","date":"","completed":false}]"#;
        let mut store = TaskStore::load(MemoryStorage::with_item(KEY, json), KEY);
        store.set_clock(fixed_clock);

        let id = store.add("next", "").unwrap();
        assert_eq!(id, 9_000_000_000_001);
    }

    #[test]
    fn test_add_after_max_id_fails_without_change() {
        let json = format!(r#"[{{"id":{},"text":"x","date":"","completed":false}}]"#, i64::MAX);
        let mut store = TaskStore::load(MemoryStorage::with_item(KEY, &json), KEY);
        store.set_clock(fixed_clock);

        let err = store.add("next", "").unwrap_err();
        assert!(matches!(err, TaskpadError::IdsExhausted(id) if id == i64::MAX));
        assert_eq!(store.len(), 1);
        assert_eq!(store.storage().get_item(KEY).unwrap().as_deref(), Some(json.as_str()));
    }

    #[test]
    fn test_toggle_flips_only_target() {
        let mut store = empty_store();
        let a = store.add("a", "").unwrap();
        let b = store.add("b", "").unwrap();

        assert!(store.toggle(a));
        assert!(store.get(a).unwrap().completed);
        assert!(!store.get(b).unwrap().completed);

        assert!(store.toggle(a));
        assert!(!store.get(a).unwrap().completed);
    }

    #[test]
    fn test_toggle_missing_is_noop() {
        let mut store = empty_store();
        store.add("a", "").unwrap();
        let before = store.tasks().to_vec();

        assert!(!store.toggle(42));
        assert_eq!(store.tasks(), &before[..]);
    }

    #[test]
    fn test_delete() {
        let mut store = empty_store();
        let a = store.add("a", "").unwrap();
        let b = store.add("b", "").unwrap();
        let c = store.add("c", "").unwrap();

        assert!(store.delete(b));
        let ids: Vec<TaskId> = store.tasks().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![a, c]);

        assert!(!store.delete(b));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_every_mutation_persists() {
        let mut store = empty_store();
        let id = store.add("a", "").unwrap();
        let saved = store.storage().get_item(KEY).unwrap().unwrap();
        assert!(saved.contains("\"completed\":false"));

        store.toggle(id);
        let saved = store.storage().get_item(KEY).unwrap().unwrap();
        assert!(saved.contains("\"completed\":true"));

        store.delete(id);
        assert_eq!(store.storage().get_item(KEY).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_write_failure_keeps_memory_state() {
        let mut storage = MemoryStorage::new();
        storage.fail_writes = true;
        let mut store = TaskStore::load(storage, KEY);

        let id = store.add("a", "").unwrap();
        assert!(store.toggle(id));
        assert_eq!(store.len(), 1);
        assert!(store.get(id).unwrap().completed);
    }

    #[test]
    fn test_malformed_storage_loads_empty() {
        for bad in ["not json", "null", "{\"id\":1}", ""] {
            let store = TaskStore::load(MemoryStorage::with_item(KEY, bad), KEY);
            assert!(store.is_empty(), "expected empty for {:?}", bad);
        }
    }

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();

        let mut store = TaskStore::load(FileStorage::new(dir.path()), KEY);
        let a = store.add("Buy milk", "").unwrap();
        store.add("Dentist", "2024-03-05").unwrap();
        store.add("Call mom", "2024-12-24").unwrap();
        store.toggle(a);
        let expected = store.tasks().to_vec();

        let reloaded = TaskStore::load(FileStorage::new(dir.path()), KEY);
        assert_eq!(reloaded.tasks(), &expected[..]);
    }

    #[test]
    fn test_counts() {
        let mut store = empty_store();
        let a = store.add("a", "").unwrap();
        store.add("b", "").unwrap();
        store.toggle(a);

        assert_eq!(store.active_count(), 1);
        assert_eq!(store.completed_count(), 1);
    }

    #[test]
    fn test_buy_milk_walkthrough() {
        let mut store = empty_store();
        let id = store.add("Buy milk", "").unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.tasks()[0].text, "Buy milk");
        assert!(!store.tasks()[0].completed);

        store.toggle(id);
        assert!(store.tasks()[0].completed);

        assert!(store.visible(Filter::Active).is_empty());
        let completed = store.visible(Filter::Completed);
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].id, id);
        assert_eq!(store.visible(Filter::All).len(), 1);
    }
}
