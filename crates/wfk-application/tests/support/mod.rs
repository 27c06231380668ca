//! Shared test scaffolding: a hand-written fake [`TaskProvider`] and a kernel
//! builder wiring the real file-backed adapters under a fresh temp directory.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tempfile::TempDir;

use wfk_application::Kernel;
use wfk_domain::error::{Error, Result};
use wfk_domain::ports::{TaskDescriptor, TaskPriority, TaskProvider};
use wfk_infrastructure::{FileStateStore, FileTemplateLoader};

/// An in-memory [`TaskProvider`] seeded with fixed descriptors, standing in
/// for a real task source so FSM behavior can be tested without a real
/// filesystem-backed task adapter.
pub struct FakeTaskProvider {
    tasks: HashMap<String, TaskDescriptor>,
}

impl FakeTaskProvider {
    pub fn new(tasks: Vec<TaskDescriptor>) -> Self {
        Self {
            tasks: tasks.into_iter().map(|t| (t.task_id.clone(), t)).collect(),
        }
    }
}

#[async_trait]
impl TaskProvider for FakeTaskProvider {
    async fn get_task(&self, task_id: &str) -> Result<TaskDescriptor> {
        self.tasks.get(task_id).cloned().ok_or_else(|| Error::TaskNotFound {
            task_id: task_id.to_owned(),
        })
    }

    async fn list_ready_tasks(&self) -> Result<Vec<TaskDescriptor>> {
        Ok(self.tasks.values().cloned().collect())
    }
}

pub fn descriptor(task_id: &str, title: &str) -> TaskDescriptor {
    TaskDescriptor {
        task_id: task_id.to_owned(),
        title: title.to_owned(),
        context: "context for ".to_owned() + title,
        implementation_details: String::new(),
        acceptance_criteria: vec!["A".to_owned(), "B".to_owned()],
        priority: Some(TaskPriority::Medium),
    }
}

/// A harness owning the temp directories backing a real `Kernel`, plus the
/// kernel itself. The `TempDir` guards must stay alive for the harness's
/// lifetime or the on-disk state they back disappears.
pub struct Harness {
    pub kernel: Kernel,
    _workspace: TempDir,
    _templates: TempDir,
}

/// `(tool_name, work_states)` for every declared tool, mirroring
/// `wfk_domain::fsm::tables` without depending on it directly.
const TOOL_WORK_STATES: &[(&str, &[&str])] = &[
    (
        "plan_task",
        &["discovery", "clarification", "contracts", "implementation_plan", "validation"],
    ),
    ("implement_task", &["dispatching"]),
    ("review_task", &["reviewing"]),
    ("test_task", &["testing"]),
    ("finalize_task", &["finalizing"]),
];

fn write_minimal_templates(root: &std::path::Path) {
    for (tool_name, work_states) in TOOL_WORK_STATES {
        let dir = root.join(tool_name);
        std::fs::create_dir_all(&dir).unwrap();
        let mut states: Vec<String> = work_states.iter().map(|s| (*s).to_owned()).collect();
        states.extend(work_states.iter().map(|s| format!("review_{s}")));
        states.push("verified".to_owned());
        for state in states {
            std::fs::write(
                dir.join(format!("{state}.md")),
                format!("task ${{task_id}} in state {state}: ${{artifact_json}} ${{feedback}}"),
            )
            .unwrap();
        }
    }
}

impl Harness {
    pub fn new(tasks: Vec<TaskDescriptor>) -> Self {
        let workspace = TempDir::new().unwrap();
        let templates = TempDir::new().unwrap();
        write_minimal_templates(templates.path());

        let state_store = Arc::new(FileStateStore::new(workspace.path()));
        let template_loader = Arc::new(FileTemplateLoader::new(templates.path()));
        let task_provider = Arc::new(FakeTaskProvider::new(tasks));

        Self {
            kernel: Kernel::new(state_store, template_loader, task_provider),
            _workspace: workspace,
            _templates: templates,
        }
    }

    /// The temp directory backing this harness's `FileStateStore`, for tests
    /// that need to inspect persisted state through a second store handle.
    pub fn workspace_path(&self) -> std::path::PathBuf {
        self._workspace.path().to_path_buf()
    }
}
