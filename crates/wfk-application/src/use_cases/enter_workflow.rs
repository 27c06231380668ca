//! `plan_task` / `implement_task` / `review_task` / `test_task` /
//! `finalize_task`: idempotent entry into a tool's workflow.

use wfk_domain::entities::WorkflowState;
use wfk_domain::error::{Error, Result};
use wfk_domain::fsm;

use crate::envelope::RpcResponse;
use crate::kernel::Kernel;
use crate::time::now_rfc3339;

use super::support::{in_progress_status_for, load_or_create_task, render_prompt};

/// Enter (or re-enter) `tool_name`'s workflow for `task_id`.
///
/// Re-entry on an existing `WorkflowState` is a pure read: no state change,
/// the prompt for the already-current state is simply rebuilt.
pub async fn enter_workflow(kernel: &Kernel, tool_name: &str, task_id: &str) -> Result<RpcResponse> {
    let _guard = kernel.lock_task(task_id).await;
    let span = tracing::info_span!("enter_workflow", tool_name, task_id, trigger = "entry");
    let _enter = span.enter();

    let initial = fsm::spec_for(tool_name)
        .and_then(|spec| spec.work_states.first().copied())
        .ok_or_else(|| Error::Internal {
            message: format!("no workflow spec declared for tool '{tool_name}'"),
        })?;

    let task = load_or_create_task(kernel, task_id).await?;

    let existing = kernel.state_store.get_workflow_state(task_id, tool_name).await?;
    let state = match existing {
        Some(state) => state,
        None => {
            let now = now_rfc3339();
            let fresh = WorkflowState::new(task_id, tool_name, initial, &now);
            let prompt = render_prompt(kernel, &task, &fresh)?;

            kernel.state_store.put_workflow_state(&fresh).await?;
            if let Some(status) = in_progress_status_for(tool_name)? {
                let mut task = task.clone();
                task.advance(status, &now);
                kernel.state_store.put_task(&task).await?;
            }
            tracing::debug!("created new workflow state in initial state '{initial}'");
            return Ok(RpcResponse::success(
                format!("entered {tool_name} at state '{initial}'"),
                prompt,
            ));
        }
    };

    let prompt = render_prompt(kernel, &task, &state)?;
    Ok(RpcResponse::success(
        format!("resumed {tool_name} at state '{}'", state.current_state),
        prompt,
    ))
}
