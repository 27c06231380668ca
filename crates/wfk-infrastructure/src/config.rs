//! Layered configuration: compiled-in defaults → optional `kernel.toml` →
//! environment variables prefixed `WFK_`.

use std::path::PathBuf;

use figment::providers::{Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use wfk_domain::error::{Error, Result};

/// Output format for the binary's logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable compact lines.
    Compact,
    /// One JSON object per log line.
    Json,
}

impl Default for LogFormat {
    fn default() -> Self {
        Self::Compact
    }
}

/// The kernel's only required configuration, plus a handful of operational
/// knobs that do not affect kernel semantics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KernelConfig {
    /// Root directory under which each task's workspace is persisted.
    pub workspace_root: PathBuf,
    /// Root directory containing `<tool_name>/<state>.md` prompt templates.
    pub template_root: PathBuf,
    /// Root directory containing the Markdown task provider's `<task_id>.md` files.
    pub tasks_root: PathBuf,
    /// Log output format.
    #[serde(default)]
    pub log_format: LogFormat,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            workspace_root: PathBuf::from("./workspace"),
            template_root: PathBuf::from("./prompts"),
            tasks_root: PathBuf::from("./tasks"),
            log_format: LogFormat::default(),
        }
    }
}

impl KernelConfig {
    /// Load configuration, layering compiled-in defaults under an optional
    /// `kernel.toml` file and `WFK_`-prefixed environment variables, then
    /// validate the result.
    pub fn load(toml_path: Option<&std::path::Path>) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(KernelConfig::default()));

        let toml_path = toml_path
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("kernel.toml"));
        if toml_path.exists() {
            figment = figment.merge(Toml::file(&toml_path));
        }
        figment = figment.merge(figment::providers::Env::prefixed("WFK_"));

        let config: KernelConfig = figment.extract().map_err(|e| Error::Configuration {
            message: format!("failed to load configuration: {e}"),
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !self.template_root.exists() {
            return Err(Error::Configuration {
                message: format!("template_root '{}' does not exist", self.template_root.display()),
            });
        }
        if self.workspace_root.exists() && !self.workspace_root.is_dir() {
            return Err(Error::Configuration {
                message: format!("workspace_root '{}' exists and is not a directory", self.workspace_root.display()),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_serialize_round_trip() {
        let config = KernelConfig::default();
        assert_eq!(config.log_format, LogFormat::Compact);
    }

    #[test]
    fn validate_rejects_missing_template_root() {
        let config = KernelConfig {
            workspace_root: PathBuf::from("/tmp/does-not-matter"),
            template_root: PathBuf::from("/tmp/wfk-nonexistent-template-root"),
            tasks_root: PathBuf::from("/tmp/does-not-matter-either"),
            log_format: LogFormat::Compact,
        };
        assert!(config.validate().is_err());
    }

    #[rstest::rstest]
    #[case(true, true, true)]
    #[case(false, true, false)]
    #[case(true, false, false)]
    fn validate_checks_both_roots_independently(
        #[case] template_root_exists: bool,
        #[case] workspace_root_is_dir: bool,
        #[case] expected_valid: bool,
    ) {
        let templates = tempfile::tempdir().unwrap();
        let workspace = tempfile::tempdir().unwrap();

        let template_root = if template_root_exists {
            templates.path().to_path_buf()
        } else {
            templates.path().join("missing")
        };
        let workspace_root = if workspace_root_is_dir {
            workspace.path().to_path_buf()
        } else {
            let file_path = workspace.path().join("not-a-dir");
            std::fs::write(&file_path, b"not a directory").unwrap();
            file_path
        };

        let config = KernelConfig {
            workspace_root,
            template_root,
            tasks_root: workspace.path().join("tasks"),
            log_format: LogFormat::Compact,
        };
        assert_eq!(config.validate().is_ok(), expected_valid);
    }
}
