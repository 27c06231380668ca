//! Core business entities with identity.

mod artifacts;
mod task;
mod workflow_state;

pub use artifacts::{
    ClarificationArtifact, Complexity, ContextDiscoveryArtifact, ContractDesignArtifact,
    FinalizationArtifact, ImplementationManifestArtifact, ImplementationPlanArtifact,
    ReviewArtifact, SubtaskEntry, TestResultArtifact, ValidationArtifact,
};
pub use task::{Task, TaskStatus};
pub use workflow_state::{ContextValue, WorkflowState};
