//! `provide_review(task_id, is_approved, feedback_notes)`: resolve a review state.

use wfk_domain::error::{Error, Result};
use wfk_domain::fsm::{self, Trigger, TERMINAL_STATE};

use crate::envelope::RpcResponse;
use crate::kernel::Kernel;
use crate::time::now_rfc3339;

use super::support::{find_active_workflow, load_task, render_prompt, terminal_status_for};

/// Resolve the active review state: approve (advancing, possibly to the
/// tool's terminal state) or request revision (returning to the work state
/// under review).
pub async fn provide_review(
    kernel: &Kernel,
    task_id: &str,
    is_approved: bool,
    feedback_notes: Option<String>,
) -> Result<RpcResponse> {
    let _guard = kernel.lock_task(task_id).await;

    let mut state = find_active_workflow(kernel, task_id).await?;
    let trigger = if is_approved {
        Trigger::AiApprove
    } else {
        Trigger::RequestRevision
    };
    let span = tracing::info_span!(
        "provide_review",
        tool_name = %state.tool_name,
        task_id,
        trigger = ?trigger
    );
    let _enter = span.enter();

    if !state.is_review_state() {
        return Err(Error::InvalidTransition {
            current_state: state.current_state.clone(),
            trigger: "provide_review".to_owned(),
            legal_triggers: fsm::legal_triggers(&state.tool_name, &state.current_state)
                .into_iter()
                .map(str::to_owned)
                .collect(),
        });
    }

    let next = fsm::next_state(&state.tool_name, &state.current_state, trigger, &state.context_store)?;
    let now = now_rfc3339();

    if !is_approved {
        if let Some(notes) = &feedback_notes {
            state.set_feedback_notes(notes.clone());
        }
    }

    if next == TERMINAL_STATE {
        let mut task = load_task(kernel, task_id).await?;

        let mut prepared = state.clone();
        prepared.transition_to(TERMINAL_STATE, &now);
        let prompt = render_prompt(kernel, &task, &prepared)?;

        let new_status = terminal_status_for(&state.tool_name)?;
        task.advance(new_status, &now);

        // Write the task's advanced status first, then delete the workflow
        // state: a crash between the two leaves the task advanced with the
        // workflow state still at `review_<terminal>`, a condition recovery
        // detects and completes on next access.
        kernel.state_store.put_task(&task).await?;
        kernel.state_store.delete_workflow_state(task_id, &state.tool_name).await?;

        tracing::info!(new_status = %new_status, "terminal transition reached, task advanced");
        return Ok(RpcResponse::success(
            format!("{} reached terminal state; task is now {new_status}", state.tool_name),
            prompt,
        ));
    }

    state.transition_to(next, &now);
    let task = load_task(kernel, task_id).await?;
    let prompt = render_prompt(kernel, &task, &state)?;
    kernel.state_store.put_workflow_state(&state).await?;

    tracing::debug!(next_state = %state.current_state, "review resolved");
    Ok(RpcResponse::success(
        format!("review resolved, now in '{}'", state.current_state),
        prompt,
    ))
}
