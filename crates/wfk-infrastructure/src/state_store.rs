//! File-backed [`StateStore`]: one workspace directory per task, holding
//! `tool_state.json`, `task.json`, and an append-only `scratchpad.md`.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Serialize;

use wfk_domain::entities::{Task, WorkflowState};
use wfk_domain::error::{Error, Result};
use wfk_domain::ports::StateStore;

use crate::atomic_file::{remove_atomic, write_atomic};

/// Persists tasks and workflow state under `<root>/<task_id>/{tool_state.json,task.json}`.
pub struct FileStateStore {
    root: PathBuf,
}

impl FileStateStore {
    /// Build a store rooted at `root`. The directory need not exist yet;
    /// it is created on first write.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn task_dir(&self, task_id: &str) -> PathBuf {
        self.root.join(task_id)
    }

    fn tool_state_path(&self, task_id: &str) -> PathBuf {
        self.task_dir(task_id).join("tool_state.json")
    }

    fn task_path(&self, task_id: &str) -> PathBuf {
        self.task_dir(task_id).join("task.json")
    }

    /// Path of the human-readable scratchpad for `task_id`. Kernel-owned
    /// files are `tool_state.json`/`task.json`; the scratchpad is
    /// append-only and its rendering failures are isolated from the
    /// transition path (see `append_scratchpad`).
    #[must_use]
    pub fn scratchpad_path(&self, task_id: &str) -> PathBuf {
        self.task_dir(task_id).join("scratchpad.md")
    }

    /// Append `entry` to the task's scratchpad. Failures are logged, never
    /// propagated: the scratchpad is diagnostic, not part of kernel state.
    pub fn append_scratchpad(&self, task_id: &str, entry: &str) {
        let path = self.scratchpad_path(task_id);
        if let Some(dir) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(dir) {
                tracing::warn!(error = %e, "failed to create scratchpad directory");
                return;
            }
        }
        use std::io::Write as _;
        let result = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .and_then(|mut f| writeln!(f, "{entry}"));
        if let Err(e) = result {
            tracing::warn!(error = %e, path = %path.display(), "failed to append scratchpad entry");
        }
    }
}

fn to_sorted_pretty_json<T: Serialize>(value: &T) -> Result<String> {
    let as_value = serde_json::to_value(value).map_err(|e| Error::PersistenceCorrupted {
        path: "<in-memory>".to_owned(),
        source: e,
    })?;
    let mut s = serde_json::to_string_pretty(&as_value).map_err(|e| Error::PersistenceCorrupted {
        path: "<in-memory>".to_owned(),
        source: e,
    })?;
    s.push('\n');
    Ok(s)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }
    let raw = std::fs::read_to_string(path).map_err(|e| Error::io(format!("reading {}", path.display()), e))?;
    let value = serde_json::from_str(&raw).map_err(|e| Error::PersistenceCorrupted {
        path: path.display().to_string(),
        source: e,
    })?;
    Ok(Some(value))
}

#[async_trait]
impl StateStore for FileStateStore {
    async fn get_task(&self, task_id: &str) -> Result<Option<Task>> {
        read_json(&self.task_path(task_id))
    }

    async fn put_task(&self, task: &Task) -> Result<()> {
        let json = to_sorted_pretty_json(task)?;
        write_atomic(&self.task_path(&task.task_id), json.as_bytes())
    }

    async fn list_tasks(&self) -> Result<Vec<Task>> {
        let mut tasks = Vec::new();
        if !self.root.exists() {
            return Ok(tasks);
        }
        let entries = std::fs::read_dir(&self.root).map_err(|e| Error::io(format!("listing {}", self.root.display()), e))?;
        for entry in entries {
            let entry = entry.map_err(|e| Error::io("reading directory entry", e))?;
            if !entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
                continue;
            }
            let task_id = entry.file_name().to_string_lossy().into_owned();
            if let Some(task) = read_json::<Task>(&self.task_path(&task_id))? {
                tasks.push(task);
            }
        }
        Ok(tasks)
    }

    async fn get_workflow_state(&self, task_id: &str, tool_name: &str) -> Result<Option<WorkflowState>> {
        let state: Option<WorkflowState> = read_json(&self.tool_state_path(task_id))?;
        Ok(state.filter(|s| s.tool_name == tool_name))
    }

    async fn put_workflow_state(&self, state: &WorkflowState) -> Result<()> {
        let json = to_sorted_pretty_json(state)?;
        write_atomic(&self.tool_state_path(&state.task_id), json.as_bytes())
    }

    async fn delete_workflow_state(&self, task_id: &str, _tool_name: &str) -> Result<()> {
        remove_atomic(&self.tool_state_path(task_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use wfk_domain::entities::TaskStatus;

    fn sample_task(task_id: &str) -> Task {
        Task {
            task_id: task_id.to_owned(),
            title: "Title".to_owned(),
            context: "Context".to_owned(),
            implementation_details: String::new(),
            acceptance_criteria: vec!["done".to_owned()],
            status: TaskStatus::New,
            created_at: "2026-01-01T00:00:00Z".to_owned(),
            updated_at: "2026-01-01T00:00:00Z".to_owned(),
        }
    }

    #[tokio::test]
    async fn put_then_get_task_round_trips() {
        let dir = tempdir().unwrap();
        let store = FileStateStore::new(dir.path());
        let task = sample_task("t1");
        store.put_task(&task).await.unwrap();
        let loaded = store.get_task("t1").await.unwrap().unwrap();
        assert_eq!(loaded.task_id, "t1");
    }

    #[tokio::test]
    async fn get_missing_task_returns_none() {
        let dir = tempdir().unwrap();
        let store = FileStateStore::new(dir.path());
        assert!(store.get_task("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn workflow_state_round_trips_and_deletes() {
        let dir = tempdir().unwrap();
        let store = FileStateStore::new(dir.path());
        let state = WorkflowState::new("t1", "plan_task", "discovery", "2026-01-01T00:00:00Z");
        store.put_workflow_state(&state).await.unwrap();
        let loaded = store.get_workflow_state("t1", "plan_task").await.unwrap().unwrap();
        assert_eq!(loaded.current_state, "discovery");

        assert!(store.get_workflow_state("t1", "implement_task").await.unwrap().is_none());

        store.delete_workflow_state("t1", "plan_task").await.unwrap();
        assert!(store.get_workflow_state("t1", "plan_task").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_tasks_finds_every_persisted_task() {
        let dir = tempdir().unwrap();
        let store = FileStateStore::new(dir.path());
        store.put_task(&sample_task("a")).await.unwrap();
        store.put_task(&sample_task("b")).await.unwrap();
        let mut ids: Vec<_> = store.list_tasks().await.unwrap().into_iter().map(|t| t.task_id).collect();
        ids.sort();
        assert_eq!(ids, vec!["a".to_owned(), "b".to_owned()]);
    }

    #[tokio::test]
    async fn corrupted_json_reports_persistence_corrupted() {
        let dir = tempdir().unwrap();
        let store = FileStateStore::new(dir.path());
        std::fs::create_dir_all(dir.path().join("bad")).unwrap();
        std::fs::write(dir.path().join("bad").join("task.json"), b"{ not json").unwrap();
        let err = store.get_task("bad").await.unwrap_err();
        assert!(matches!(err, Error::PersistenceCorrupted { .. }));
    }
}
