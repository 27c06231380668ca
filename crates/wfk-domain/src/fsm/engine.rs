//! The transition engine: given a tool's declared [`WorkflowSpec`], a current
//! state, a trigger, and the workflow's accumulated context, compute the next
//! state or reject the trigger as illegal.

use std::collections::BTreeMap;

use crate::entities::ContextValue;
use crate::error::{Error, Result};

use super::tables::{self, WorkflowSpec};

/// The three triggers the dispatcher can fire against a workflow instance.
/// `submit_work` always fires [`Trigger::Submit`]; `provide_review` fires
/// either [`Trigger::AiApprove`] or [`Trigger::RequestRevision`] depending on
/// the reviewer artifact's `approved` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Work submitted from a work state; advances to `review_<state>`.
    Submit,
    /// Reviewer approved; advances past the review state.
    AiApprove,
    /// Reviewer requested changes; returns to the work state under review.
    RequestRevision,
}

impl Trigger {
    fn as_str(self) -> &'static str {
        match self {
            Trigger::Submit => "submit_work",
            Trigger::AiApprove => "ai_approve",
            Trigger::RequestRevision => "request_revision",
        }
    }
}

/// Compute the state `tool_name` moves to when `trigger` fires from
/// `current_state`, given the workflow's current context store (consulted
/// only for the declared complexity-bypass routing after `clarification`).
///
/// Returns [`Error::InvalidTransition`] if `trigger` is not legal from
/// `current_state`, and [`Error::Internal`] if `tool_name` is not a declared
/// workflow tool.
pub fn next_state(
    tool_name: &str,
    current_state: &str,
    trigger: Trigger,
    context_store: &BTreeMap<String, ContextValue>,
) -> Result<String> {
    let spec = tables::spec_for(tool_name).ok_or_else(|| Error::Internal {
        message: format!("no workflow spec declared for tool '{tool_name}'"),
    })?;

    if let Some(work_state) = tables::work_state_of_review(current_state) {
        return resolve_review_state(spec, work_state, trigger, current_state, context_store);
    }

    if spec.work_states.contains(&current_state) {
        return resolve_work_state(spec, current_state, trigger);
    }

    Err(Error::InvalidTransition {
        current_state: current_state.to_owned(),
        trigger: trigger.as_str().to_owned(),
        legal_triggers: Vec::new(),
    })
}

fn resolve_work_state(spec: &WorkflowSpec, current_state: &str, trigger: Trigger) -> Result<String> {
    match trigger {
        Trigger::Submit => Ok(tables::review_state_name(current_state)),
        _ => Err(Error::InvalidTransition {
            current_state: current_state.to_owned(),
            trigger: trigger.as_str().to_owned(),
            legal_triggers: vec![Trigger::Submit.as_str().to_owned()],
        }),
    }
}

fn resolve_review_state(
    spec: &WorkflowSpec,
    work_state: &str,
    trigger: Trigger,
    current_state: &str,
    context_store: &BTreeMap<String, ContextValue>,
) -> Result<String> {
    match trigger {
        Trigger::RequestRevision => Ok(work_state.to_owned()),
        Trigger::AiApprove => Ok(next_after_approval(spec, work_state, context_store)),
        Trigger::Submit => Err(Error::InvalidTransition {
            current_state: current_state.to_owned(),
            trigger: trigger.as_str().to_owned(),
            legal_triggers: vec![
                Trigger::AiApprove.as_str().to_owned(),
                Trigger::RequestRevision.as_str().to_owned(),
            ],
        }),
    }
}

/// The state reached once `work_state`'s review is approved.
///
/// Declares the one piece of routing that depends on workflow context rather
/// than pure position in the tool's state list: `plan_task`'s `clarification`
/// review skips straight to `implementation_plan` when the task's recorded
/// discovery complexity is `LOW`, bypassing `contracts` entirely. Every other
/// transition is the plain "next declared work state, or the tool's terminal
/// state if this was the last one" rule.
fn next_after_approval(
    spec: &WorkflowSpec,
    work_state: &str,
    context_store: &BTreeMap<String, ContextValue>,
) -> String {
    if spec.tool_name == "plan_task" && work_state == "clarification" && is_low_complexity(context_store) {
        return "implementation_plan".to_owned();
    }

    let Some(index) = spec.work_states.iter().position(|s| *s == work_state) else {
        return spec.terminal.to_owned();
    };
    match spec.work_states.get(index + 1) {
        Some(next) => (*next).to_owned(),
        None => spec.terminal.to_owned(),
    }
}

fn is_low_complexity(context_store: &BTreeMap<String, ContextValue>) -> bool {
    matches!(
        context_store.get("discovery_artifact"),
        Some(ContextValue::Artifact(value)) if value.get("complexity").and_then(|v| v.as_str()) == Some("LOW")
    )
}

/// The triggers legal from `current_state`, for error reporting and for
/// building `list_ready_tasks`-style introspection responses.
#[must_use]
pub fn legal_triggers(tool_name: &str, current_state: &str) -> Vec<&'static str> {
    let Some(spec) = tables::spec_for(tool_name) else {
        return Vec::new();
    };
    if tables::work_state_of_review(current_state).is_some() {
        vec![Trigger::AiApprove.as_str(), Trigger::RequestRevision.as_str()]
    } else if spec.work_states.contains(&current_state) {
        vec![Trigger::Submit.as_str()]
    } else {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ctx_with_complexity(level: &str) -> BTreeMap<String, ContextValue> {
        let mut m = BTreeMap::new();
        m.insert(
            "discovery_artifact".to_owned(),
            ContextValue::Artifact(json!({"complexity": level})),
        );
        m
    }

    #[test]
    fn submit_from_work_state_moves_to_review() {
        let next = next_state("plan_task", "discovery", Trigger::Submit, &BTreeMap::new()).unwrap();
        assert_eq!(next, "review_discovery");
    }

    #[test]
    fn approval_from_last_review_state_reaches_terminal() {
        let next = next_state("plan_task", "review_validation", Trigger::AiApprove, &BTreeMap::new()).unwrap();
        assert_eq!(next, tables::TERMINAL_STATE);
    }

    #[test]
    fn revision_returns_to_work_state() {
        let next = next_state("plan_task", "review_contracts", Trigger::RequestRevision, &BTreeMap::new()).unwrap();
        assert_eq!(next, "contracts");
    }

    #[test]
    fn low_complexity_bypasses_contracts() {
        let next = next_state(
            "plan_task",
            "review_clarification",
            Trigger::AiApprove,
            &ctx_with_complexity("LOW"),
        )
        .unwrap();
        assert_eq!(next, "implementation_plan");
    }

    #[test]
    fn high_complexity_goes_through_contracts() {
        let next = next_state(
            "plan_task",
            "review_clarification",
            Trigger::AiApprove,
            &ctx_with_complexity("HIGH"),
        )
        .unwrap();
        assert_eq!(next, "contracts");
    }

    #[test]
    fn submit_is_illegal_from_review_state() {
        let err = next_state("plan_task", "review_discovery", Trigger::Submit, &BTreeMap::new()).unwrap_err();
        assert!(matches!(err, Error::InvalidTransition { .. }));
    }

    #[test]
    fn unknown_tool_is_internal_error() {
        let err = next_state("no_such_tool", "discovery", Trigger::Submit, &BTreeMap::new()).unwrap_err();
        assert!(matches!(err, Error::Internal { .. }));
    }
}
