//! Static schema registry: `(tool_name, state) -> ArtifactSchema`.

use std::collections::HashMap;
use std::sync::LazyLock;

use super::types::{ArtifactSchema, FieldSchema, FieldType};

const COMPLEXITY_VALUES: &[&str] = &["LOW", "MEDIUM", "HIGH"];

static SUBTASK_ENTRY_FIELDS: &[FieldSchema] = &[
    FieldSchema::required("subtask_id", FieldType::Str),
    FieldSchema::required("description", FieldType::Str),
];

static CONTEXT_DISCOVERY_FIELDS: &[FieldSchema] = &[
    FieldSchema::required("findings", FieldType::Str),
    FieldSchema::optional("questions", FieldType::ListOf(Box::new(FieldType::Str))),
    FieldSchema::required(
        "files_to_modify",
        FieldType::ListOf(Box::new(FieldType::Str)),
    ),
    FieldSchema::required("complexity", FieldType::Enum(COMPLEXITY_VALUES)),
    FieldSchema::optional("implementation_context", FieldType::MapOfStr),
];

static CLARIFICATION_FIELDS: &[FieldSchema] = &[
    FieldSchema::required("clarification_dialogue", FieldType::Str),
    FieldSchema::optional("decisions", FieldType::ListOf(Box::new(FieldType::Str))),
    FieldSchema::optional(
        "additional_constraints",
        FieldType::ListOf(Box::new(FieldType::Str)),
    ),
];

static CONTRACT_DESIGN_FIELDS: &[FieldSchema] = &[
    FieldSchema::required("interface_design", FieldType::Str),
    FieldSchema::optional(
        "contracts_defined",
        FieldType::ListOf(Box::new(FieldType::Str)),
    ),
    FieldSchema::optional("design_notes", FieldType::ListOf(Box::new(FieldType::Str))),
];

static IMPLEMENTATION_PLAN_FIELDS: &[FieldSchema] = &[
    FieldSchema::required("implementation_plan", FieldType::Str),
    FieldSchema::required(
        "subtasks",
        FieldType::ListOf(Box::new(FieldType::Object(SUBTASK_ENTRY_FIELDS))),
    ),
    FieldSchema::optional("risks", FieldType::ListOf(Box::new(FieldType::Str))),
];

static VALIDATION_FIELDS: &[FieldSchema] = &[
    FieldSchema::required("validation_summary", FieldType::Str),
    FieldSchema::required("ready_for_implementation", FieldType::Bool),
    FieldSchema::optional("issues_found", FieldType::ListOf(Box::new(FieldType::Str))),
];

static IMPLEMENTATION_MANIFEST_FIELDS: &[FieldSchema] = &[
    FieldSchema::required("summary", FieldType::Str),
    FieldSchema::optional(
        "completed_subtasks",
        FieldType::ListOf(Box::new(FieldType::Str)),
    ),
    FieldSchema::required("testing_notes", FieldType::Str),
];

static REVIEW_FIELDS: &[FieldSchema] = &[
    FieldSchema::required("summary", FieldType::Str),
    FieldSchema::required("approved", FieldType::Bool),
    FieldSchema::optional("feedback", FieldType::ListOf(Box::new(FieldType::Str))),
];

static TEST_RESULT_FIELDS: &[FieldSchema] = &[
    FieldSchema::required("command", FieldType::Str),
    FieldSchema::required("exit_code", FieldType::Int),
    FieldSchema::required("output", FieldType::Str),
];

static FINALIZATION_FIELDS: &[FieldSchema] = &[
    FieldSchema::required("commit_hash", FieldType::Str)
        .with_pattern("^[0-9a-fA-F]{40}$"),
    FieldSchema::required("pull_request_url", FieldType::Str)
        .with_pattern(r"^https?://\S+$"),
];

/// Registry of every `(tool_name, state) -> ArtifactSchema` pair the kernel
/// recognizes. Built once, lazily, and never mutated afterwards.
static REGISTRY: LazyLock<HashMap<(&'static str, &'static str), ArtifactSchema>> =
    LazyLock::new(|| {
        let mut map = HashMap::new();
        map.insert(
            ("plan_task", "discovery"),
            ArtifactSchema {
                name: "ContextDiscoveryArtifact",
                fields: CONTEXT_DISCOVERY_FIELDS,
            },
        );
        map.insert(
            ("plan_task", "clarification"),
            ArtifactSchema {
                name: "ClarificationArtifact",
                fields: CLARIFICATION_FIELDS,
            },
        );
        map.insert(
            ("plan_task", "contracts"),
            ArtifactSchema {
                name: "ContractDesignArtifact",
                fields: CONTRACT_DESIGN_FIELDS,
            },
        );
        map.insert(
            ("plan_task", "implementation_plan"),
            ArtifactSchema {
                name: "ImplementationPlanArtifact",
                fields: IMPLEMENTATION_PLAN_FIELDS,
            },
        );
        map.insert(
            ("plan_task", "validation"),
            ArtifactSchema {
                name: "ValidationArtifact",
                fields: VALIDATION_FIELDS,
            },
        );
        map.insert(
            ("implement_task", "dispatching"),
            ArtifactSchema {
                name: "ImplementationManifestArtifact",
                fields: IMPLEMENTATION_MANIFEST_FIELDS,
            },
        );
        map.insert(
            ("review_task", "reviewing"),
            ArtifactSchema {
                name: "ReviewArtifact",
                fields: REVIEW_FIELDS,
            },
        );
        map.insert(
            ("test_task", "testing"),
            ArtifactSchema {
                name: "TestResultArtifact",
                fields: TEST_RESULT_FIELDS,
            },
        );
        map.insert(
            ("finalize_task", "finalizing"),
            ArtifactSchema {
                name: "FinalizationArtifact",
                fields: FINALIZATION_FIELDS,
            },
        );
        map
    });

/// Look up the schema governing artifacts submitted while `tool_name` is in
/// `state`. Returns `None` if `state` never accepts an artifact submission
/// (i.e. it is a review state, or not a declared work state at all).
#[must_use]
pub fn schema_for(tool_name: &str, state: &str) -> Option<&'static ArtifactSchema> {
    REGISTRY.get(&(tool_name, state))
}
