//! `mark_subtask_complete(task_id, subtask_id)`: record incremental progress
//! without a state transition.

use wfk_domain::error::{Error, Result};

use crate::envelope::RpcResponse;
use crate::kernel::Kernel;
use crate::time::now_rfc3339;

use super::support::find_active_workflow;

/// Append `subtask_id` to the active `implement_task` workflow's completed
/// subtask list. Valid only while `implement_task` is in its `dispatching`
/// state; does not transition the workflow.
pub async fn mark_subtask_complete(kernel: &Kernel, task_id: &str, subtask_id: &str) -> Result<RpcResponse> {
    let _guard = kernel.lock_task(task_id).await;

    let mut state = find_active_workflow(kernel, task_id).await?;
    let span = tracing::info_span!(
        "mark_subtask_complete",
        tool_name = %state.tool_name,
        task_id,
        trigger = "mark_subtask_complete"
    );
    let _enter = span.enter();
    if state.tool_name != "implement_task" || state.current_state != "dispatching" {
        return Err(Error::InvalidTransition {
            current_state: state.current_state.clone(),
            trigger: "mark_subtask_complete".to_owned(),
            legal_triggers: Vec::new(),
        });
    }

    state.append_completed_subtask(subtask_id);
    state.updated_at = now_rfc3339();
    kernel.state_store.put_workflow_state(&state).await?;

    tracing::debug!(subtask_id, "recorded subtask completion");
    Ok(RpcResponse {
        status: crate::envelope::RpcStatus::Success,
        message: format!("recorded completion of subtask '{subtask_id}'"),
        next_prompt: None,
        data: None,
    })
}
