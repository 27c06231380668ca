//! Builds the closed set of template variables recognized by the prompt
//! builder, from a task and the workflow state about to be (or just)
//! rendered.

use std::collections::HashMap;

use wfk_domain::entities::{Task, WorkflowState};

/// Build the variable map for rendering the prompt at `state.current_state`.
///
/// `artifact_json` is populated from the most recently stored artifact for
/// the work state under review, when `state` is a review state; it is empty
/// otherwise. `feedback` is populated from `state`'s stored feedback notes,
/// if any were set by a prior `request_revision`.
#[must_use]
pub fn build(task: &Task, state: &WorkflowState) -> HashMap<String, String> {
    let mut vars = HashMap::new();
    vars.insert("task_id".to_owned(), task.task_id.clone());
    vars.insert("tool_name".to_owned(), state.tool_name.clone());
    vars.insert("current_state".to_owned(), state.current_state.clone());
    vars.insert("task_title".to_owned(), task.title.clone());
    vars.insert("task_context".to_owned(), task.context.clone());
    vars.insert(
        "implementation_details".to_owned(),
        task.implementation_details.clone(),
    );
    vars.insert(
        "acceptance_criteria".to_owned(),
        task.acceptance_criteria_bullets(),
    );

    let artifact_json = wfk_domain::fsm::work_state_of_review(&state.current_state)
        .and_then(|work_state| state.artifact_for(work_state))
        .map(|v| serde_json::to_string_pretty(v).unwrap_or_default())
        .unwrap_or_default();
    vars.insert("artifact_json".to_owned(), artifact_json);

    vars.insert(
        "feedback".to_owned(),
        state.feedback_notes().unwrap_or_default().to_owned(),
    );

    vars
}
