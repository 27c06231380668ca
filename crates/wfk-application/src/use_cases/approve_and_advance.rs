//! `approve_and_advance(task_id)`: approve the current review and, if that
//! reached the tool's terminal state, immediately enter the next tool's
//! workflow.

use wfk_domain::error::{Error, Result};
use wfk_domain::fsm;

use crate::envelope::{RpcResponse, RpcStatus};
use crate::kernel::Kernel;

use super::enter_workflow::enter_workflow;
use super::provide_review::provide_review;
use super::support::find_active_workflow;

/// The tool that follows `tool_name` in the lifecycle, if any.
fn next_tool_after(tool_name: &str) -> Option<&'static str> {
    let position = fsm::TOOL_LIFECYCLE_ORDER.iter().position(|t| *t == tool_name)?;
    fsm::TOOL_LIFECYCLE_ORDER.get(position + 1).copied()
}

/// Approve the active review state. Fails fast, without committing the
/// approval, if this review is not the tool's last one (approving it would
/// not reach `verified`) or if the next tool already has a workflow
/// instance further along than its initial state.
pub async fn approve_and_advance(kernel: &Kernel, task_id: &str) -> Result<RpcResponse> {
    let state = find_active_workflow(kernel, task_id).await?;
    let next_on_approve = fsm::next_state(
        &state.tool_name,
        &state.current_state,
        fsm::Trigger::AiApprove,
        &state.context_store,
    )?;
    if next_on_approve != fsm::TERMINAL_STATE {
        return Err(Error::Precondition {
            message: format!(
                "approving '{}' would move to '{next_on_approve}', not this tool's terminal state; use provide_review instead",
                state.current_state
            ),
        });
    }

    let Some(next_tool) = next_tool_after(&state.tool_name) else {
        let response = provide_review(kernel, task_id, true, None).await?;
        return Ok(response);
    };

    if let Some(existing) = kernel.state_store.get_workflow_state(task_id, next_tool).await? {
        let initial = fsm::spec_for(next_tool).and_then(|spec| spec.work_states.first().copied());
        if Some(existing.current_state.as_str()) != initial {
            return Err(Error::Precondition {
                message: format!(
                    "'{next_tool}' already has a workflow in progress at state '{}'",
                    existing.current_state
                ),
            });
        }
    }

    let approval = provide_review(kernel, task_id, true, None).await?;
    if approval.status != RpcStatus::Success {
        return Ok(approval);
    }

    enter_workflow(kernel, next_tool, task_id).await
}
