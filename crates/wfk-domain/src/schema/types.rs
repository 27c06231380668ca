//! Declarative artifact schema model.
//!
//! Schemas are plain data, not derive macros on the typed artifact structs in
//! [`crate::entities`] — the registry (C2) validates raw JSON submitted over
//! the RPC surface against this data before anything is deserialized into a
//! typed shape, so the contract a caller sees is this schema, not Rust trait
//! bounds.

/// Logical field type recognized by the artifact registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    /// UTF-8 string.
    Str,
    /// Signed integer.
    Int,
    /// Boolean.
    Bool,
    /// One of a fixed set of canonical strings (case-folded on normalization).
    Enum(&'static [&'static str]),
    /// A JSON array whose elements all match the inner type.
    ListOf(Box<FieldType>),
    /// A JSON object of string keys to string values.
    MapOfStr,
    /// A nested object matching a named set of fields.
    Object(&'static [FieldSchema]),
}

/// Declarative constraints and typing for one field of an artifact.
#[derive(Debug, Clone)]
pub struct FieldSchema {
    /// Field name as it appears in the submitted JSON object.
    pub name: &'static str,
    /// Expected logical type.
    pub field_type: FieldType,
    /// Whether the field must be present.
    pub required: bool,
    /// Minimum string length, when `field_type` is [`FieldType::Str`].
    pub min_length: Option<usize>,
    /// Regex the value must match, when `field_type` is [`FieldType::Str`].
    pub pattern: Option<&'static str>,
}

impl FieldSchema {
    /// Build a required field with no extra constraints.
    #[must_use]
    pub const fn required(name: &'static str, field_type: FieldType) -> Self {
        Self {
            name,
            field_type,
            required: true,
            min_length: None,
            pattern: None,
        }
    }

    /// Build an optional field with no extra constraints.
    #[must_use]
    pub const fn optional(name: &'static str, field_type: FieldType) -> Self {
        Self {
            name,
            field_type,
            required: false,
            min_length: None,
            pattern: None,
        }
    }

    /// Attach a minimum length constraint (only meaningful for `Str` fields).
    #[must_use]
    pub const fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = Some(min_length);
        self
    }

    /// Attach a regex pattern constraint (only meaningful for `Str` fields).
    #[must_use]
    pub const fn with_pattern(mut self, pattern: &'static str) -> Self {
        self.pattern = Some(pattern);
        self
    }
}

/// The full declarative schema for one `(tool_name, state)` artifact.
#[derive(Debug, Clone)]
pub struct ArtifactSchema {
    /// Canonical artifact name (e.g. `ContextDiscoveryArtifact`).
    pub name: &'static str,
    /// Fields this artifact's top-level JSON object must/may contain.
    pub fields: &'static [FieldSchema],
}
