//! Task entity: the unit of work the workflow kernel drives through its lifecycle.

use serde::{Deserialize, Serialize};

use crate::define_string_enum;

define_string_enum! {
    /// Lifecycle status of a [`Task`]. Advanced only by the dispatcher, on
    /// terminal-state completion of a workflow tool (see the terminal-status
    /// map in the tool dispatcher).
    pub enum TaskStatus {
        /// Task has been created but no workflow has touched it yet.
        New,
        /// `plan_task` has an active workflow for this task.
        Planning,
        /// `plan_task` reached `verified`; ready for `implement_task`.
        ReadyForImpl,
        /// `implement_task` has an active workflow for this task.
        InProgress,
        /// `implement_task` reached `verified`; ready for `review_task`.
        ReadyForReview,
        /// `review_task` has an active workflow for this task.
        InReview,
        /// `review_task` reached `verified`; ready for `test_task`.
        ReadyForTesting,
        /// `test_task` has an active workflow for this task.
        InTesting,
        /// `test_task` reached `verified`; ready for `finalize_task`.
        ReadyForFinalization,
        /// `finalize_task` reached `verified`; the task's lifecycle is complete.
        Done,
    }
}

/// A single task carried through the workflow lifecycle.
///
/// The descriptive fields (`title`, `context`, `acceptance_criteria`,
/// `implementation_details`) are immutable and sourced externally by a
/// [`crate::ports::TaskProvider`]; only `status` is mutated, and only by the
/// dispatcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Stable identifier for the task.
    pub task_id: String,
    /// Short human-readable title.
    pub title: String,
    /// Free-form description of what the task requires.
    pub context: String,
    /// Additional implementation guidance, if any was supplied by the source.
    #[serde(default)]
    pub implementation_details: String,
    /// Acceptance criteria the finished task must satisfy.
    pub acceptance_criteria: Vec<String>,
    /// Current lifecycle status.
    pub status: TaskStatus,
    /// RFC 3339 UTC timestamp the task record was created.
    pub created_at: String,
    /// RFC 3339 UTC timestamp the task record was last updated.
    pub updated_at: String,
}

impl Task {
    /// Build a brand-new task in `TaskStatus::New` from a descriptor, stamping
    /// both timestamps to `now`.
    #[must_use]
    pub fn new(descriptor: &crate::ports::TaskDescriptor, now: &str) -> Self {
        Self {
            task_id: descriptor.task_id.clone(),
            title: descriptor.title.clone(),
            context: descriptor.context.clone(),
            implementation_details: descriptor.implementation_details.clone(),
            acceptance_criteria: descriptor.acceptance_criteria.clone(),
            status: TaskStatus::New,
            created_at: now.to_owned(),
            updated_at: now.to_owned(),
        }
    }

    /// Advance `status`, bumping `updated_at`.
    pub fn advance(&mut self, status: TaskStatus, now: &str) {
        self.status = status;
        self.updated_at = now.to_owned();
    }

    /// Pre-formatted Markdown bullet list of acceptance criteria, for the
    /// prompt builder's `acceptance_criteria` variable.
    #[must_use]
    pub fn acceptance_criteria_bullets(&self) -> String {
        self.acceptance_criteria
            .iter()
            .map(|c| format!("- {c}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
