//! `get_next_task()`: read-only scan for the highest-priority eligible task.

use serde_json::json;

use wfk_domain::entities::TaskStatus;
use wfk_domain::error::Result;
use wfk_domain::ports::{TaskDescriptor, TaskPriority};

use crate::envelope::RpcResponse;
use crate::kernel::Kernel;

fn priority_rank(priority: Option<TaskPriority>) -> u8 {
    match priority {
        Some(TaskPriority::High) => 2,
        Some(TaskPriority::Medium) | None => 1,
        Some(TaskPriority::Low) => 0,
    }
}

/// Scan the task provider's ready tasks, excluding any already `Done`, and
/// return the highest-priority one. Returns `choices_required` if more than
/// one task ties for the top priority rank.
pub async fn get_next_task(kernel: &Kernel) -> Result<RpcResponse> {
    let descriptors = kernel.task_provider.list_ready_tasks().await?;

    let mut eligible = Vec::new();
    for descriptor in descriptors {
        let status = kernel
            .state_store
            .get_task(&descriptor.task_id)
            .await?
            .map(|t| t.status)
            .unwrap_or(TaskStatus::New);
        if status != TaskStatus::Done {
            eligible.push((descriptor, status));
        }
    }

    let Some(top_rank) = eligible.iter().map(|(d, _)| priority_rank(d.priority)).max() else {
        return Ok(RpcResponse {
            status: crate::envelope::RpcStatus::Error,
            message: "no eligible tasks available".to_owned(),
            next_prompt: None,
            data: None,
        });
    };

    let top: Vec<(TaskDescriptor, TaskStatus)> = eligible
        .into_iter()
        .filter(|(d, _)| priority_rank(d.priority) == top_rank)
        .collect();

    if top.len() == 1 {
        let (descriptor, status) = &top[0];
        return Ok(RpcResponse::success_with_data(
            format!("selected task '{}'", descriptor.task_id),
            json!({
                "task_id": descriptor.task_id,
                "title": descriptor.title,
                "status": status,
            }),
        ));
    }

    let choices: Vec<_> = top
        .iter()
        .map(|(d, status)| json!({"task_id": d.task_id, "title": d.title, "status": status}))
        .collect();
    Ok(RpcResponse::choices_required(
        format!("{} tasks tie for the top priority", top.len()),
        json!(choices),
    ))
}
