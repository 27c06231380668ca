//! Port for crash-safe persistence of tasks and workflow state (component C1).

use async_trait::async_trait;

use crate::entities::{Task, WorkflowState};
use crate::error::Result;

/// Persists [`Task`] and [`WorkflowState`] records. Implementations must
/// make every `put_*` call atomic: a concurrent reader, or a process crash
/// mid-write, must only ever observe the prior value or the new one, never a
/// partially written one.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Load a task by id, if one has been persisted.
    async fn get_task(&self, task_id: &str) -> Result<Option<Task>>;

    /// Atomically persist `task`, replacing any prior record for its id.
    async fn put_task(&self, task: &Task) -> Result<()>;

    /// List every persisted task, in no particular order.
    async fn list_tasks(&self) -> Result<Vec<Task>>;

    /// Load the active workflow instance for `(task_id, tool_name)`, if one exists.
    async fn get_workflow_state(
        &self,
        task_id: &str,
        tool_name: &str,
    ) -> Result<Option<WorkflowState>>;

    /// Atomically persist `state`, replacing any prior instance for the same
    /// `(task_id, tool_name)` pair. This is the commit point of the
    /// prepare/commit protocol: callers must have finished all fallible
    /// computation (schema validation, transition resolution) before calling
    /// this, since the write itself must not fail for a business reason.
    async fn put_workflow_state(&self, state: &WorkflowState) -> Result<()>;

    /// Remove the active workflow instance for `(task_id, tool_name)`, e.g.
    /// once a lifecycle stage reaches its terminal state and its record is
    /// folded into the task's status instead of kept as a live instance.
    async fn delete_workflow_state(&self, task_id: &str, tool_name: &str) -> Result<()>;
}
