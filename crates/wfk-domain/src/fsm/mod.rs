//! The finite-state machine driving every workflow tool (component C3).
//!
//! Each tool declares an ordered list of work states in [`tables`]; this
//! module generates the `review_<state>` pairing and the approve/revise/
//! submit transition rules uniformly from that list, so adding a tool never
//! requires hand-writing a new transition table.

mod engine;
mod tables;

pub use engine::{legal_triggers, next_state, Trigger};
pub use tables::{
    review_state_name, spec_for, work_state_of_review, WorkflowSpec, TERMINAL_STATE,
    TOOL_LIFECYCLE_ORDER,
};

/// The initial state a brand-new workflow instance for `tool_name` starts in.
#[must_use]
pub fn initial_state(tool_name: &str) -> Option<&'static str> {
    tables::spec_for(tool_name).and_then(|spec| spec.work_states.first().copied())
}
