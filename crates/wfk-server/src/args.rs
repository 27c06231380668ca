//! Argument structs for each exposed tool. Each one derives [`schemars::JsonSchema`]
//! so `rmcp` can publish its input schema; field docs become the schema's
//! per-field descriptions.

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;

/// Enter (or re-enter) a tool's workflow for a task.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct TaskIdArgs {
    /// Identifier of the task to operate on.
    pub task_id: String,
}

/// Submit the current work-state artifact for review.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct SubmitWorkArgs {
    /// Identifier of the task whose active workflow is being advanced.
    pub task_id: String,
    /// The artifact to validate against the active state's schema and
    /// persist. Shape depends on which tool and state are active.
    pub artifact: Value,
}

/// Resolve the active review state.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ProvideReviewArgs {
    /// Identifier of the task whose active review is being resolved.
    pub task_id: String,
    /// `true` to approve and advance, `false` to request revision.
    pub is_approved: bool,
    /// Reviewer feedback, stored on the workflow state when requesting
    /// revision. Ignored when `is_approved` is `true`.
    #[serde(default)]
    pub feedback_notes: Option<String>,
}

/// Scan for the next task to work on. Takes no fields; present so the tool
/// still has a (trivially empty) generated input schema.
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct GetNextTaskArgs {}

/// Record completion of one subtask without transitioning the workflow.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct MarkSubtaskCompleteArgs {
    /// Identifier of the task whose `implement_task` workflow is active.
    pub task_id: String,
    /// Identifier of the subtask that was completed.
    pub subtask_id: String,
}
