//! `WorkflowState`: the mutable FSM cursor for one active `(task_id, tool_name)` pair.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A freeform value stored in a workflow's context store: either a validated
/// artifact (stored as JSON) or a plain string note (e.g. reviewer feedback).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ContextValue {
    /// A validated, normalized artifact.
    Artifact(serde_json::Value),
    /// A freeform note.
    Note(String),
}

/// One active workflow instance for a task. At most one exists per
/// `(task_id, tool_name)` pair; see invariant 1 of the data model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkflowState {
    /// Task this workflow belongs to.
    pub task_id: String,
    /// Workflow tool driving this instance (`plan_task`, `implement_task`, ...).
    pub tool_name: String,
    /// Current FSM state name, e.g. `discovery` or `review_discovery`.
    pub current_state: String,
    /// Accumulating map of prior-phase artifacts and notes. Keys are
    /// conventionally `"<state>_artifact"` and `"feedback_notes"`.
    #[serde(default)]
    pub context_store: BTreeMap<String, ContextValue>,
    /// RFC 3339 UTC creation timestamp.
    pub created_at: String,
    /// RFC 3339 UTC timestamp of the most recent transition.
    pub updated_at: String,
}

impl WorkflowState {
    /// Start a new workflow instance in its initial state.
    #[must_use]
    pub fn new(task_id: impl Into<String>, tool_name: impl Into<String>, initial_state: impl Into<String>, now: &str) -> Self {
        Self {
            task_id: task_id.into(),
            tool_name: tool_name.into(),
            current_state: initial_state.into(),
            context_store: BTreeMap::new(),
            created_at: now.to_owned(),
            updated_at: now.to_owned(),
        }
    }

    /// Move to a new state, bumping `updated_at`.
    pub fn transition_to(&mut self, state: impl Into<String>, now: &str) {
        self.current_state = state.into();
        self.updated_at = now.to_owned();
    }

    /// Store a validated artifact under `<state>_artifact`.
    pub fn store_artifact(&mut self, state: &str, artifact: serde_json::Value) {
        self.context_store
            .insert(format!("{state}_artifact"), ContextValue::Artifact(artifact));
    }

    /// Fetch a previously stored artifact for `state`, if any.
    #[must_use]
    pub fn artifact_for(&self, state: &str) -> Option<&serde_json::Value> {
        match self.context_store.get(&format!("{state}_artifact")) {
            Some(ContextValue::Artifact(v)) => Some(v),
            _ => None,
        }
    }

    /// Store reviewer feedback notes, overwriting any prior value.
    pub fn set_feedback_notes(&mut self, notes: impl Into<String>) {
        self.context_store
            .insert("feedback_notes".to_owned(), ContextValue::Note(notes.into()));
    }

    /// Fetch the most recently set reviewer feedback notes, if any.
    #[must_use]
    pub fn feedback_notes(&self) -> Option<&str> {
        match self.context_store.get("feedback_notes") {
            Some(ContextValue::Note(n)) => Some(n.as_str()),
            _ => None,
        }
    }

    /// Append a completed subtask id reported via `mark_subtask_complete`.
    pub fn append_completed_subtask(&mut self, subtask_id: impl Into<String>) {
        let key = "completed_subtasks";
        let entry = self
            .context_store
            .entry(key.to_owned())
            .or_insert_with(|| ContextValue::Artifact(serde_json::Value::Array(Vec::new())));
        if let ContextValue::Artifact(serde_json::Value::Array(items)) = entry {
            items.push(serde_json::Value::String(subtask_id.into()));
        }
    }

    /// Whether `current_state` names a review state (`review_<state>`).
    #[must_use]
    pub fn is_review_state(&self) -> bool {
        self.current_state.starts_with("review_")
    }
}
