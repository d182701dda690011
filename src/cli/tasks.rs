//! list / add / toggle / delete 子命令实现

use std::io::{self, Write};

use crate::error::Result;
use crate::model::{Filter, Task, TaskId, TaskStore};
use crate::storage::KeyValueStorage;

/// 单行输出格式: "[x] <id>  <text>  (Mar 5)"
fn format_line(task: &Task) -> String {
    let checkbox = if task.completed { "[x]" } else { "[ ]" };
    match task.date_label() {
        Some(date) => format!("{} {}  {}  ({})", checkbox, task.id, task.text, date),
        None => format!("{} {}  {}", checkbox, task.id, task.text),
    }
}

/// 打印过滤后的任务
pub fn list<S: KeyValueStorage>(
    store: &TaskStore<S>,
    filter: Filter,
    out: &mut impl Write,
) -> io::Result<()> {
    for task in store.visible(filter) {
        writeln!(out, "{}", format_line(task))?;
    }
    Ok(())
}

/// 添加任务并打印新 ID
pub fn add<S: KeyValueStorage>(
    store: &mut TaskStore<S>,
    text: &str,
    date: &str,
    out: &mut impl Write,
) -> Result<TaskId> {
    let id = store.add(text, date)?;
    writeln!(out, "{}", id)?;
    Ok(id)
}

/// 切换完成状态，ID 不存在时只打印提示
pub fn toggle<S: KeyValueStorage>(
    store: &mut TaskStore<S>,
    id: TaskId,
    out: &mut impl Write,
) -> io::Result<()> {
    if store.toggle(id) {
        if let Some(task) = store.get(id) {
            writeln!(out, "{}", format_line(task))?;
        }
    } else {
        writeln!(out, "No task with id {}", id)?;
    }
    Ok(())
}

/// 删除任务，ID 不存在时只打印提示
pub fn delete<S: KeyValueStorage>(
    store: &mut TaskStore<S>,
    id: TaskId,
    out: &mut impl Write,
) -> io::Result<()> {
    let text = store.get(id).map(|t| t.text.clone());
    match (store.delete(id), text) {
        (true, Some(text)) => writeln!(out, "Deleted: {}", text),
        _ => writeln!(out, "No task with id {}", id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TaskpadError;
    use crate::storage::MemoryStorage;

    fn output(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_add_and_list() {
        let mut store = TaskStore::load(MemoryStorage::new(), "tasks");
        let mut out = Vec::new();
        let milk = add(&mut store, "Buy milk", "", &mut out).unwrap();
        add(&mut store, "Dentist", "2024-03-05", &mut out).unwrap();
        assert!(output(out).starts_with(&milk.to_string()));

        let mut out = Vec::new();
        list(&store, Filter::All, &mut out).unwrap();
        let text = output(out);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], format!("[ ] {}  Buy milk", milk));
        assert!(lines[1].ends_with("Dentist  (Mar 5)"));
    }

    #[test]
    fn test_add_empty_fails() {
        let mut store = TaskStore::load(MemoryStorage::new(), "tasks");
        let mut out = Vec::new();
        let err = add(&mut store, "  ", "", &mut out).unwrap_err();
        assert!(matches!(err, TaskpadError::EmptyText));
        assert!(out.is_empty());
        assert!(store.is_empty());
    }

    #[test]
    fn test_toggle_and_filter() {
        let mut store = TaskStore::load(MemoryStorage::new(), "tasks");
        let id = store.add("Buy milk", "").unwrap();

        let mut out = Vec::new();
        toggle(&mut store, id, &mut out).unwrap();
        assert_eq!(output(out), format!("[x] {}  Buy milk\n", id));

        let mut out = Vec::new();
        list(&store, Filter::Active, &mut out).unwrap();
        assert!(out.is_empty());

        let mut out = Vec::new();
        list(&store, Filter::Completed, &mut out).unwrap();
        assert_eq!(output(out).lines().count(), 1);
    }

    #[test]
    fn test_missing_id_is_noop() {
        let mut store = TaskStore::load(MemoryStorage::new(), "tasks");
        store.add("keep", "").unwrap();

        let mut out = Vec::new();
        toggle(&mut store, 1, &mut out).unwrap();
        delete(&mut store, 1, &mut out).unwrap();
        assert_eq!(output(out), "No task with id 1\nNo task with id 1\n");
        assert_eq!(store.len(), 1);
        assert!(!store.tasks()[0].completed);
    }

    #[test]
    fn test_delete() {
        let mut store = TaskStore::load(MemoryStorage::new(), "tasks");
        let id = store.add("Buy milk", "").unwrap();

        let mut out = Vec::new();
        delete(&mut store, id, &mut out).unwrap();
        assert_eq!(output(out), "Deleted: Buy milk\n");
        assert!(store.is_empty());
    }
}
