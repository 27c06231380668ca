//! Port for sourcing task descriptions from outside the kernel.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::define_string_enum;
use crate::error::Result;

define_string_enum! {
    /// Caller-supplied priority hint, purely informational to the kernel.
    pub enum TaskPriority {
        /// Lowest priority.
        Low,
        /// Default priority when unspecified by the source.
        Medium,
        /// Highest priority.
        High,
    }
}

/// The read-only description of a task as sourced externally, before the
/// kernel wraps it in a [`crate::entities::Task`] with lifecycle status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskDescriptor {
    /// Stable identifier for the task.
    pub task_id: String,
    /// Short human-readable title.
    pub title: String,
    /// Free-form description of what the task requires.
    pub context: String,
    /// Additional implementation guidance, if the source provides any.
    #[serde(default)]
    pub implementation_details: String,
    /// Acceptance criteria the finished task must satisfy.
    pub acceptance_criteria: Vec<String>,
    /// Optional priority hint from the source.
    pub priority: Option<TaskPriority>,
}

/// Source of task descriptions. Adapters implement this over whatever
/// backing store holds task definitions (flat files, an issue tracker, ...).
#[async_trait]
pub trait TaskProvider: Send + Sync {
    /// Fetch one task by id. Returns [`crate::error::Error::TaskNotFound`] if
    /// no such task is known to the source.
    async fn get_task(&self, task_id: &str) -> Result<TaskDescriptor>;

    /// List every task the source considers ready to enter the lifecycle
    /// (i.e. not already completed or excluded by the source's own rules).
    async fn list_ready_tasks(&self) -> Result<Vec<TaskDescriptor>>;
}
