//! The MCP-exposed surface: one tool per dispatcher entry point, each a
//! thin wrapper translating `Parameters<Args>` into a use-case call and the
//! resulting [`RpcResponse`] into a [`CallToolResult`].

use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo};
use rmcp::{tool, tool_handler, tool_router, ErrorData, ServerHandler};

use wfk_application::envelope::RpcResponse;
use wfk_application::Kernel;

use crate::args::{
    GetNextTaskArgs, MarkSubtaskCompleteArgs, ProvideReviewArgs, SubmitWorkArgs, TaskIdArgs,
};

/// Serializes `response` to the JSON text content every tool call returns.
/// The envelope (not the MCP transport layer) carries success/error/choices
/// discrimination, so every well-formed dispatcher call returns `Ok`.
fn envelope_result(response: RpcResponse) -> Result<CallToolResult, ErrorData> {
    let text = serde_json::to_string(&response).unwrap_or_else(|e| {
        format!(r#"{{"status":"error","message":"failed to serialize response: {e}"}}"#)
    });
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

fn error_result(err: &wfk_domain::error::Error) -> Result<CallToolResult, ErrorData> {
    envelope_result(RpcResponse::error(err))
}

/// The MCP server: one `Kernel` shared across every tool call.
#[derive(Clone)]
pub struct WorkflowKernelServer {
    kernel: Arc<Kernel>,
    tool_router: ToolRouter<WorkflowKernelServer>,
}

#[tool_router]
impl WorkflowKernelServer {
    /// Build a server around a shared kernel.
    #[must_use]
    pub fn new(kernel: Arc<Kernel>) -> Self {
        Self {
            kernel,
            tool_router: Self::tool_router(),
        }
    }

    /// Enter (or re-enter) `plan_task`'s workflow for a task.
    #[tool(description = "Enter or resume a task's planning workflow (discovery through validation)")]
    async fn plan_task(&self, Parameters(args): Parameters<TaskIdArgs>) -> Result<CallToolResult, ErrorData> {
        match wfk_application::use_cases::enter_workflow(&self.kernel, "plan_task", &args.task_id).await {
            Ok(response) => envelope_result(response),
            Err(e) => error_result(&e),
        }
    }

    /// Enter (or re-enter) `implement_task`'s workflow for a task.
    #[tool(description = "Enter or resume a task's implementation workflow (dispatching subtasks)")]
    async fn implement_task(&self, Parameters(args): Parameters<TaskIdArgs>) -> Result<CallToolResult, ErrorData> {
        match wfk_application::use_cases::enter_workflow(&self.kernel, "implement_task", &args.task_id).await {
            Ok(response) => envelope_result(response),
            Err(e) => error_result(&e),
        }
    }

    /// Enter (or re-enter) `review_task`'s workflow for a task.
    #[tool(description = "Enter or resume a task's code review workflow")]
    async fn review_task(&self, Parameters(args): Parameters<TaskIdArgs>) -> Result<CallToolResult, ErrorData> {
        match wfk_application::use_cases::enter_workflow(&self.kernel, "review_task", &args.task_id).await {
            Ok(response) => envelope_result(response),
            Err(e) => error_result(&e),
        }
    }

    /// Enter (or re-enter) `test_task`'s workflow for a task.
    #[tool(description = "Enter or resume a task's testing workflow")]
    async fn test_task(&self, Parameters(args): Parameters<TaskIdArgs>) -> Result<CallToolResult, ErrorData> {
        match wfk_application::use_cases::enter_workflow(&self.kernel, "test_task", &args.task_id).await {
            Ok(response) => envelope_result(response),
            Err(e) => error_result(&e),
        }
    }

    /// Enter (or re-enter) `finalize_task`'s workflow for a task.
    #[tool(description = "Enter or resume a task's finalization workflow")]
    async fn finalize_task(&self, Parameters(args): Parameters<TaskIdArgs>) -> Result<CallToolResult, ErrorData> {
        match wfk_application::use_cases::enter_workflow(&self.kernel, "finalize_task", &args.task_id).await {
            Ok(response) => envelope_result(response),
            Err(e) => error_result(&e),
        }
    }

    /// Submit the current work-state artifact for review.
    #[tool(description = "Validate and persist the artifact for the task's active work state, advancing to review")]
    async fn submit_work(&self, Parameters(args): Parameters<SubmitWorkArgs>) -> Result<CallToolResult, ErrorData> {
        match wfk_application::use_cases::submit_work(&self.kernel, &args.task_id, args.artifact).await {
            Ok(response) => envelope_result(response),
            Err(e) => error_result(&e),
        }
    }

    /// Resolve the active review state.
    #[tool(description = "Approve or request revision of the task's active review state")]
    async fn provide_review(&self, Parameters(args): Parameters<ProvideReviewArgs>) -> Result<CallToolResult, ErrorData> {
        match wfk_application::use_cases::provide_review(&self.kernel, &args.task_id, args.is_approved, args.feedback_notes).await {
            Ok(response) => envelope_result(response),
            Err(e) => error_result(&e),
        }
    }

    /// Approve the active review and, if that reaches the tool's terminal
    /// state, immediately enter the next tool's workflow.
    #[tool(description = "Approve the active review and advance straight into the next lifecycle tool")]
    async fn approve_and_advance(&self, Parameters(args): Parameters<TaskIdArgs>) -> Result<CallToolResult, ErrorData> {
        match wfk_application::use_cases::approve_and_advance(&self.kernel, &args.task_id).await {
            Ok(response) => envelope_result(response),
            Err(e) => error_result(&e),
        }
    }

    /// Record completion of one subtask without transitioning the workflow.
    #[tool(description = "Record completion of a single dispatched subtask during implementation")]
    async fn mark_subtask_complete(
        &self,
        Parameters(args): Parameters<MarkSubtaskCompleteArgs>,
    ) -> Result<CallToolResult, ErrorData> {
        match wfk_application::use_cases::mark_subtask_complete(&self.kernel, &args.task_id, &args.subtask_id).await {
            Ok(response) => envelope_result(response),
            Err(e) => error_result(&e),
        }
    }

    /// Scan for the highest-priority eligible task.
    #[tool(description = "Return the highest-priority task that is ready to start and not yet done")]
    async fn get_next_task(&self, Parameters(_args): Parameters<GetNextTaskArgs>) -> Result<CallToolResult, ErrorData> {
        match wfk_application::use_cases::get_next_task(&self.kernel).await {
            Ok(response) => envelope_result(response),
            Err(e) => error_result(&e),
        }
    }
}

#[tool_handler]
impl ServerHandler for WorkflowKernelServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "workflow-kernel".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            instructions: Some(
                "Drives an AI coding agent through a disciplined plan -> implement -> review -> \
                 test -> finalize lifecycle. Call plan_task to begin; submit_work and \
                 provide_review advance the active state; approve_and_advance chains review \
                 approval straight into the next tool."
                    .to_owned(),
            ),
        }
    }
}
