//! Declarative artifact schemas and the validation/normalization logic that
//! checks submitted JSON against them (component C2, the Artifact Registry).

mod registry;
mod types;
mod validate;

pub use registry::schema_for;
pub use types::{ArtifactSchema, FieldSchema, FieldType};
pub use validate::validate;
