//! Port for loading and rendering the prompt templates returned to callers
//! at each workflow state (component C4).

use std::collections::HashMap;

use crate::error::Result;

/// Loads and renders the prompt template for a `(tool_name, state)` pair.
///
/// Templates are plain text with `${variable}` placeholders only — no
/// control-flow syntax (conditionals, loops) is permitted; implementations
/// must reject templates that contain any at load time, per the kernel's
/// separation between the dispatcher's own business logic and the text a
/// caller receives.
pub trait TemplateLoader: Send + Sync {
    /// Render the template for `(tool_name, state)`, substituting every
    /// `${key}` placeholder found in `variables`.
    ///
    /// Returns [`crate::error::Error::TemplateMissing`] if no template is
    /// registered for the pair, and
    /// [`crate::error::Error::TemplateMalformed`] if the template contains
    /// disallowed syntax or references a variable not present in
    /// `variables`.
    fn render(
        &self,
        tool_name: &str,
        state: &str,
        variables: &HashMap<String, String>,
    ) -> Result<String>;
}
