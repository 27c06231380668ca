//! Shared helpers used by more than one use case.

use wfk_domain::entities::{Task, TaskStatus, WorkflowState};
use wfk_domain::error::{Error, Result};
use wfk_domain::fsm;

use crate::kernel::Kernel;
use crate::time::now_rfc3339;

/// Load `task_id`, failing with [`Error::TaskNotFound`] if it has never been
/// persisted (it should always have been, by the time any dispatcher entry
/// beyond the workflow-initiating ones is reached).
pub(crate) async fn load_task(kernel: &Kernel, task_id: &str) -> Result<Task> {
    kernel
        .state_store
        .get_task(task_id)
        .await?
        .ok_or_else(|| Error::TaskNotFound {
            task_id: task_id.to_owned(),
        })
}

/// Load `task_id`'s persisted record, materializing one from the task
/// provider's descriptor on first contact. Used only by the
/// workflow-initiating entry points, which are the sole place a task is
/// allowed to spring into existence.
pub(crate) async fn load_or_create_task(kernel: &Kernel, task_id: &str) -> Result<Task> {
    if let Some(task) = kernel.state_store.get_task(task_id).await? {
        return Ok(task);
    }
    let descriptor = kernel.task_provider.get_task(task_id).await?;
    let task = Task::new(&descriptor, &now_rfc3339());
    kernel.state_store.put_task(&task).await?;
    Ok(task)
}

/// Find the single active `WorkflowState` for `task_id`, searching every
/// declared tool in lifecycle order. At most one is ever active at a time
/// (see the data model's uniqueness invariant on `(task_id, tool_name)`).
pub(crate) async fn find_active_workflow(kernel: &Kernel, task_id: &str) -> Result<WorkflowState> {
    for tool_name in fsm::TOOL_LIFECYCLE_ORDER {
        if let Some(state) = kernel.state_store.get_workflow_state(task_id, tool_name).await? {
            return Ok(state);
        }
    }
    Err(Error::NoActiveWorkflow {
        task_id: task_id.to_owned(),
        tool_name: "<none>".to_owned(),
    })
}

/// The `Task.status` a task advances to once `tool_name` reaches `verified`.
pub(crate) fn terminal_status_for(tool_name: &str) -> Result<TaskStatus> {
    match tool_name {
        "plan_task" => Ok(TaskStatus::ReadyForImpl),
        "implement_task" => Ok(TaskStatus::ReadyForReview),
        "review_task" => Ok(TaskStatus::ReadyForTesting),
        "test_task" => Ok(TaskStatus::ReadyForFinalization),
        "finalize_task" => Ok(TaskStatus::Done),
        other => Err(Error::Internal {
            message: format!("no terminal-status mapping declared for tool '{other}'"),
        }),
    }
}

/// The status a task is given the moment a tool's workflow is first entered,
/// marking that tool's phase as actively in progress. `None` means entering
/// this tool leaves `Task.status` unchanged (`finalize_task`: the task is
/// already `READY_FOR_FINALIZATION` from the prior terminal transition, and
/// the declared status set has no dedicated "finalizing" status).
pub(crate) fn in_progress_status_for(tool_name: &str) -> Result<Option<TaskStatus>> {
    match tool_name {
        "plan_task" => Ok(Some(TaskStatus::Planning)),
        "implement_task" => Ok(Some(TaskStatus::InProgress)),
        "review_task" => Ok(Some(TaskStatus::InReview)),
        "test_task" => Ok(Some(TaskStatus::InTesting)),
        "finalize_task" => Ok(None),
        other => Err(Error::Internal {
            message: format!("no in-progress status mapping declared for tool '{other}'"),
        }),
    }
}

/// Render the prompt for `state`'s current state, using `task` to populate
/// the closed template variable set.
pub(crate) fn render_prompt(kernel: &Kernel, task: &Task, state: &WorkflowState) -> Result<String> {
    let vars = crate::prompt_vars::build(task, state);
    kernel
        .template_loader
        .render(&state.tool_name, &state.current_state, &vars)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rstest::rstest]
    #[case("plan_task", TaskStatus::ReadyForImpl)]
    #[case("implement_task", TaskStatus::ReadyForReview)]
    #[case("review_task", TaskStatus::ReadyForTesting)]
    #[case("test_task", TaskStatus::ReadyForFinalization)]
    #[case("finalize_task", TaskStatus::Done)]
    fn terminal_status_matches_the_next_tool_in_lifecycle_order(#[case] tool_name: &str, #[case] expected: TaskStatus) {
        assert_eq!(terminal_status_for(tool_name).unwrap(), expected);
    }

    #[rstest::rstest]
    #[case("plan_task", Some(TaskStatus::Planning))]
    #[case("implement_task", Some(TaskStatus::InProgress))]
    #[case("review_task", Some(TaskStatus::InReview))]
    #[case("test_task", Some(TaskStatus::InTesting))]
    #[case("finalize_task", None)]
    fn in_progress_status_matches_the_active_tool(#[case] tool_name: &str, #[case] expected: Option<TaskStatus>) {
        assert_eq!(in_progress_status_for(tool_name).unwrap(), expected);
    }

    #[test]
    fn unknown_tool_name_is_an_internal_error() {
        assert!(terminal_status_for("no_such_tool").is_err());
        assert!(in_progress_status_for("no_such_tool").is_err());
    }
}
