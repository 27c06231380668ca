//! File-backed [`TemplateLoader`]: renders `${variable}` placeholders from
//! plain-text files under `<root>/<tool_name>/<state>.md`, rejecting any
//! template that smuggles in control-flow syntax.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::LazyLock;

use regex::Regex;

use wfk_domain::error::{Error, Result};
use wfk_domain::ports::TemplateLoader;

/// Forbidden control-flow delimiters: `{% %}` and `{{ }}`, the hallmarks of
/// a templating engine with conditionals/loops. Templates here carry only
/// plain `${name}` substitutions.
static FORBIDDEN_SYNTAX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{%|%\}|\{\{|\}\}").expect("static regex is valid"));

static VARIABLE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("static regex is valid"));

/// Renders prompt templates stored as plain Markdown files on disk.
pub struct FileTemplateLoader {
    root: PathBuf,
}

impl FileTemplateLoader {
    /// Build a loader rooted at `root` (a directory containing one
    /// subdirectory per tool name, each holding `<state>.md` files).
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn template_path(&self, tool_name: &str, state: &str) -> PathBuf {
        self.root.join(tool_name).join(format!("{state}.md"))
    }
}

impl TemplateLoader for FileTemplateLoader {
    fn render(&self, tool_name: &str, state: &str, variables: &HashMap<String, String>) -> Result<String> {
        let path = self.template_path(tool_name, state);
        let raw = std::fs::read_to_string(&path).map_err(|_| Error::TemplateMissing {
            path: path.display().to_string(),
        })?;

        if FORBIDDEN_SYNTAX.is_match(&raw) {
            return Err(Error::TemplateMalformed {
                path: path.display().to_string(),
                reason: "contains forbidden control-flow syntax ({%...%} or {{...}})".to_owned(),
            });
        }

        render_template(&raw, variables).map_err(|reason| Error::TemplateMalformed {
            path: path.display().to_string(),
            reason,
        })
    }
}

/// Substitute every `${name}` placeholder in `template` with its value from
/// `variables`, failing if a referenced name is not in the recognized set.
fn render_template(template: &str, variables: &HashMap<String, String>) -> std::result::Result<String, String> {
    let mut out = String::with_capacity(template.len());
    let mut last_end = 0;
    for captures in VARIABLE_PATTERN.captures_iter(template) {
        let m = captures.get(0).expect("group 0 always matches");
        let name = &captures[1];
        let Some(value) = variables.get(name) else {
            return Err(format!("unknown template variable '{name}'"));
        };
        out.push_str(&template[last_end..m.start()]);
        out.push_str(value);
        last_end = m.end();
    }
    out.push_str(&template[last_end..]);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect()
    }

    #[test]
    fn renders_known_variables() {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("plan_task")).unwrap();
        std::fs::write(
            dir.path().join("plan_task").join("discovery.md"),
            "Task ${task_id}: ${task_title}",
        )
        .unwrap();
        let loader = FileTemplateLoader::new(dir.path());
        let rendered = loader
            .render("plan_task", "discovery", &vars(&[("task_id", "t1"), ("task_title", "Fix bug")]))
            .unwrap();
        assert_eq!(rendered, "Task t1: Fix bug");
    }

    #[test]
    fn missing_template_is_hard_error() {
        let dir = tempdir().unwrap();
        let loader = FileTemplateLoader::new(dir.path());
        let err = loader.render("plan_task", "discovery", &HashMap::new()).unwrap_err();
        assert!(matches!(err, Error::TemplateMissing { .. }));
    }

    #[test]
    fn unknown_variable_is_hard_error() {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("plan_task")).unwrap();
        std::fs::write(dir.path().join("plan_task").join("discovery.md"), "${nonexistent}").unwrap();
        let loader = FileTemplateLoader::new(dir.path());
        let err = loader.render("plan_task", "discovery", &HashMap::new()).unwrap_err();
        assert!(matches!(err, Error::TemplateMalformed { .. }));
    }

    #[test]
    fn control_flow_syntax_is_rejected() {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("plan_task")).unwrap();
        std::fs::write(dir.path().join("plan_task").join("discovery.md"), "{% if x %}y{% endif %}").unwrap();
        let loader = FileTemplateLoader::new(dir.path());
        let err = loader.render("plan_task", "discovery", &HashMap::new()).unwrap_err();
        assert!(matches!(err, Error::TemplateMalformed { .. }));
    }
}
