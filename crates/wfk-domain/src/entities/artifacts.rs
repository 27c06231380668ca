//! Typed artifact shapes.
//!
//! These mirror the declarative schemas in [`crate::schema`] one-to-one and
//! exist for callers that want a strongly-typed view after an artifact has
//! already passed registry validation; the registry itself validates against
//! the declarative [`crate::schema::ArtifactSchema`], not against these
//! derives, because the schema (not the Rust type) is the contract surface
//! artifacts are checked against.

use serde::{Deserialize, Serialize};

/// Estimated implementation complexity, reported by the discovery phase.
/// Gates the `contracts` bypass in `plan_task` (see the FSM tables).
///
/// Unlike most domain enums this one is wire-represented in
/// `SCREAMING_SNAKE_CASE` (`LOW`/`MEDIUM`/`HIGH`), matching the canonical
/// enum normalization the artifact registry applies to submitted values.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::AsRefStr,
    Serialize,
    Deserialize,
    schemars::JsonSchema,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Complexity {
    /// Small, well-understood change.
    Low,
    /// Moderate scope or unknowns.
    Medium,
    /// Large scope, significant unknowns, or cross-cutting change.
    High,
}

/// `discovery` state artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextDiscoveryArtifact {
    /// Narrative summary of what was discovered while exploring the codebase.
    pub findings: String,
    /// Open questions surfaced during discovery.
    #[serde(default)]
    pub questions: Vec<String>,
    /// Files the implementation is expected to touch.
    pub files_to_modify: Vec<String>,
    /// Estimated complexity; gates the `contracts` bypass.
    pub complexity: Complexity,
    /// Free-form key/value notes captured during discovery.
    #[serde(default)]
    pub implementation_context: std::collections::BTreeMap<String, String>,
}

/// `clarification` state artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClarificationArtifact {
    /// Transcript of the clarifying dialogue with the task source.
    pub clarification_dialogue: String,
    /// Decisions reached during clarification.
    #[serde(default)]
    pub decisions: Vec<String>,
    /// Constraints discovered during clarification, beyond the original acceptance criteria.
    #[serde(default)]
    pub additional_constraints: Vec<String>,
}

/// `contracts` state artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractDesignArtifact {
    /// Description of the interfaces/contracts being introduced or changed.
    pub interface_design: String,
    /// Named contracts defined by this design.
    #[serde(default)]
    pub contracts_defined: Vec<String>,
    /// Supporting design notes.
    #[serde(default)]
    pub design_notes: Vec<String>,
}

/// One subtask entry within an [`ImplementationPlanArtifact`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubtaskEntry {
    /// Stable identifier for the subtask.
    pub subtask_id: String,
    /// Human-readable description of the subtask.
    pub description: String,
}

/// `implementation_plan` state artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImplementationPlanArtifact {
    /// Narrative implementation plan.
    pub implementation_plan: String,
    /// Ordered subtasks the plan decomposes into.
    pub subtasks: Vec<SubtaskEntry>,
    /// Risks identified for this plan.
    #[serde(default)]
    pub risks: Vec<String>,
}

/// `validation` state artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationArtifact {
    /// Summary of the validation performed against the plan.
    pub validation_summary: String,
    /// Whether the plan is ready to move into implementation.
    pub ready_for_implementation: bool,
    /// Issues found during validation, if any.
    #[serde(default)]
    pub issues_found: Vec<String>,
}

/// `dispatching` state artifact (terminal submission for `implement_task`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImplementationManifestArtifact {
    /// Summary of the work performed.
    pub summary: String,
    /// Subtask ids completed, corroborating `mark_subtask_complete` calls.
    #[serde(default)]
    pub completed_subtasks: Vec<String>,
    /// Notes for the upcoming `test_task` phase.
    pub testing_notes: String,
}

/// `reviewing` state artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewArtifact {
    /// Summary of the review.
    pub summary: String,
    /// Whether the reviewed work is approved.
    pub approved: bool,
    /// Itemized feedback.
    #[serde(default)]
    pub feedback: Vec<String>,
}

/// `testing` state artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestResultArtifact {
    /// The command that was run.
    pub command: String,
    /// The command's exit code.
    pub exit_code: i64,
    /// Captured stdout/stderr.
    pub output: String,
}

/// `finalizing` state artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinalizationArtifact {
    /// 40-character hex commit hash.
    pub commit_hash: String,
    /// Pull request URL.
    pub pull_request_url: String,
}
