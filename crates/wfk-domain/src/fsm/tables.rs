//! Per-tool workflow specifications: the ordered work states and terminal
//! state each tool declares. The FSM engine (`super::engine`) generates the
//! review-cycle pairs and full transition table from these at lookup time.

/// The declared shape of one workflow tool: its ordered work states and the
/// terminal state name reached after the last state's review is approved.
#[derive(Debug, Clone, Copy)]
pub struct WorkflowSpec {
    /// Tool name, e.g. `plan_task`.
    pub tool_name: &'static str,
    /// Ordered work states. Each `S` is paired with a generated `review_S`.
    pub work_states: &'static [&'static str],
    /// Terminal state name reached once the last work state's review is approved.
    pub terminal: &'static str,
}

/// Canonical terminal state name shared by every workflow tool.
pub const TERMINAL_STATE: &str = "verified";

const PLAN_TASK_STATES: &[&str] = &[
    "discovery",
    "clarification",
    "contracts",
    "implementation_plan",
    "validation",
];
const IMPLEMENT_TASK_STATES: &[&str] = &["dispatching"];
const REVIEW_TASK_STATES: &[&str] = &["reviewing"];
const TEST_TASK_STATES: &[&str] = &["testing"];
const FINALIZE_TASK_STATES: &[&str] = &["finalizing"];

const SPECS: &[WorkflowSpec] = &[
    WorkflowSpec {
        tool_name: "plan_task",
        work_states: PLAN_TASK_STATES,
        terminal: TERMINAL_STATE,
    },
    WorkflowSpec {
        tool_name: "implement_task",
        work_states: IMPLEMENT_TASK_STATES,
        terminal: TERMINAL_STATE,
    },
    WorkflowSpec {
        tool_name: "review_task",
        work_states: REVIEW_TASK_STATES,
        terminal: TERMINAL_STATE,
    },
    WorkflowSpec {
        tool_name: "test_task",
        work_states: TEST_TASK_STATES,
        terminal: TERMINAL_STATE,
    },
    WorkflowSpec {
        tool_name: "finalize_task",
        work_states: FINALIZE_TASK_STATES,
        terminal: TERMINAL_STATE,
    },
];

/// Look up the declared spec for `tool_name`.
#[must_use]
pub fn spec_for(tool_name: &str) -> Option<&'static WorkflowSpec> {
    SPECS.iter().find(|s| s.tool_name == tool_name)
}

/// The full ordered list of every declared tool name, in lifecycle order.
pub const TOOL_LIFECYCLE_ORDER: &[&str] = &[
    "plan_task",
    "implement_task",
    "review_task",
    "test_task",
    "finalize_task",
];

/// The `review_<state>` name for a given work state.
#[must_use]
pub fn review_state_name(work_state: &str) -> String {
    format!("review_{work_state}")
}

/// Strip the `review_` prefix from a review state name, if present.
#[must_use]
pub fn work_state_of_review(state: &str) -> Option<&str> {
    state.strip_prefix("review_")
}
