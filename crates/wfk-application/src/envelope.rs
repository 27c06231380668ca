//! The structured response envelope every dispatcher entry point returns.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use wfk_domain::error::Error;

/// Outcome discriminant of a dispatcher call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RpcStatus {
    /// Operation committed; `next_prompt` carries the instruction for the caller.
    Success,
    /// No state change; `message` describes the cause.
    Error,
    /// Multiple eligible choices exist; `data` carries them for the caller to pick from.
    ChoicesRequired,
}

/// The response returned by every dispatcher entry point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcResponse {
    /// Outcome of the call.
    pub status: RpcStatus,
    /// Human-readable summary.
    pub message: String,
    /// The next instruction for the caller, when `status == Success`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_prompt: Option<String>,
    /// Structured payload, shape depends on the entry point.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl RpcResponse {
    /// Build a `success` envelope carrying `next_prompt`.
    #[must_use]
    pub fn success(message: impl Into<String>, next_prompt: impl Into<String>) -> Self {
        Self {
            status: RpcStatus::Success,
            message: message.into(),
            next_prompt: Some(next_prompt.into()),
            data: None,
        }
    }

    /// Build a `success` envelope carrying structured `data` but no prompt
    /// (read-only queries such as `get_next_task`).
    #[must_use]
    pub fn success_with_data(message: impl Into<String>, data: Value) -> Self {
        Self {
            status: RpcStatus::Success,
            message: message.into(),
            next_prompt: None,
            data: Some(data),
        }
    }

    /// Build an `error` envelope from a domain error.
    #[must_use]
    pub fn error(err: &Error) -> Self {
        Self {
            status: RpcStatus::Error,
            message: err.to_string(),
            next_prompt: None,
            data: None,
        }
    }

    /// Build a `choices_required` envelope carrying the candidate choices.
    #[must_use]
    pub fn choices_required(message: impl Into<String>, choices: Value) -> Self {
        Self {
            status: RpcStatus::ChoicesRequired,
            message: message.into(),
            next_prompt: None,
            data: Some(choices),
        }
    }
}
