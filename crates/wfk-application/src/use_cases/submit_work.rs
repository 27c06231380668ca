//! `submit_work(task_id, artifact)`: validate and commit a work-state artifact.

use serde_json::Value;

use wfk_domain::error::{Error, Result};
use wfk_domain::fsm::{self, Trigger};
use wfk_domain::schema;

use crate::envelope::RpcResponse;
use crate::kernel::Kernel;
use crate::time::now_rfc3339;

use super::support::{find_active_workflow, load_task, render_prompt};

/// Validate `artifact` against the schema for the active workflow's current
/// state, transition to `review_<state>`, and return the next prompt.
pub async fn submit_work(kernel: &Kernel, task_id: &str, artifact: Value) -> Result<RpcResponse> {
    let _guard = kernel.lock_task(task_id).await;

    let mut state = find_active_workflow(kernel, task_id).await?;
    let span = tracing::info_span!(
        "submit_work",
        tool_name = %state.tool_name,
        task_id,
        trigger = "submit_work"
    );
    let _enter = span.enter();

    if state.is_review_state() {
        return Err(Error::InvalidTransition {
            current_state: state.current_state.clone(),
            trigger: "submit_work".to_owned(),
            legal_triggers: fsm::legal_triggers(&state.tool_name, &state.current_state)
                .into_iter()
                .map(str::to_owned)
                .collect(),
        });
    }
    let current_state = state.current_state.clone();

    let artifact_schema = schema::schema_for(&state.tool_name, &current_state).ok_or_else(|| Error::Internal {
        message: format!("no artifact schema declared for ({}, {current_state})", state.tool_name),
    })?;
    let normalized = schema::validate(artifact_schema, &artifact).map_err(Error::Validation)?;

    let next = fsm::next_state(&state.tool_name, &current_state, Trigger::Submit, &state.context_store)?;

    // Prepare: build the hypothetical next state and render its prompt
    // before committing anything.
    let now = now_rfc3339();
    let mut prepared = state.clone();
    prepared.store_artifact(&current_state, normalized.clone());
    prepared.transition_to(next, &now);

    let task = load_task(kernel, task_id).await?;
    let prompt = render_prompt(kernel, &task, &prepared)?;

    // Commit.
    state.store_artifact(&current_state, normalized);
    state.transition_to(prepared.current_state.clone(), &now);
    kernel.state_store.put_workflow_state(&state).await?;

    tracing::debug!(next_state = %state.current_state, "submitted artifact and advanced");
    Ok(RpcResponse::success(
        format!("submitted '{current_state}' artifact, now in '{}'", state.current_state),
        prompt,
    ))
}
