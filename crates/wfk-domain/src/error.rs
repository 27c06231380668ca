//! Error handling types for the workflow kernel.

use thiserror::Error;

/// Result type alias for operations that can fail.
pub type Result<T> = std::result::Result<T, Error>;

/// A single field-level validation failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("field '{field}': {reason}")]
pub struct FieldError {
    /// Dotted path to the offending field (e.g. `subtasks[0].subtask_id`).
    pub field: String,
    /// Human-readable reason the field failed validation.
    pub reason: String,
}

impl FieldError {
    /// Construct a new field error.
    #[must_use]
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Main error type for the workflow kernel.
#[derive(Error, Debug)]
pub enum Error {
    /// Submitted artifact failed schema validation.
    #[error("artifact failed validation: {0:?}")]
    Validation(Vec<FieldError>),

    /// The requested trigger is not legal from the current state.
    #[error("invalid transition: trigger '{trigger}' is not legal in state '{current_state}' (legal triggers: {legal_triggers:?})")]
    InvalidTransition {
        /// State the workflow was in when the trigger was attempted.
        current_state: String,
        /// Trigger that was attempted.
        trigger: String,
        /// Triggers that would have been legal.
        legal_triggers: Vec<String>,
    },

    /// The operation requires an active `WorkflowState` that does not exist.
    #[error("no active workflow for task '{task_id}' tool '{tool_name}'")]
    NoActiveWorkflow {
        /// Task the caller asked about.
        task_id: String,
        /// Tool the caller asked about.
        tool_name: String,
    },

    /// A prompt template file could not be found.
    #[error("template missing: {path}")]
    TemplateMissing {
        /// Path that was expected to exist.
        path: String,
    },

    /// A prompt template contained disallowed syntax or unknown variables.
    #[error("template malformed at {path}: {reason}")]
    TemplateMalformed {
        /// Path of the offending template.
        path: String,
        /// Reason the template was rejected.
        reason: String,
    },

    /// On-disk JSON state could not be parsed; requires manual intervention.
    #[error("persisted state at {path} is corrupted: {source}")]
    PersistenceCorrupted {
        /// Path of the corrupted file.
        path: String,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// A requested task could not be found by the task provider.
    #[error("task not found: {task_id}")]
    TaskNotFound {
        /// The task id that was not found.
        task_id: String,
    },

    /// Transient filesystem failure. Caller may retry; no state was mutated.
    #[error("I/O error: {message}")]
    Io {
        /// Description of the operation that failed.
        message: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Configuration is missing or invalid.
    #[error("configuration error: {message}")]
    Configuration {
        /// Description of the configuration problem.
        message: String,
    },

    /// A convenience operation's precondition was not met (e.g.
    /// `approve_and_advance` called when the current tool has not yet
    /// reached `verified`, or the next tool already has a conflicting
    /// workflow instance). Distinct from `InvalidTransition`: the trigger
    /// itself is legal, but the surrounding business rule forbids it.
    #[error("precondition not met: {message}")]
    Precondition {
        /// Description of the unmet precondition.
        message: String,
    },

    /// Internal invariant violation. Should never surface in normal operation.
    #[error("internal error: {message}")]
    Internal {
        /// Description of the invariant that was violated.
        message: String,
    },
}

impl Error {
    /// Wrap a std::io::Error with a human-readable description of the operation.
    #[must_use]
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }
}
