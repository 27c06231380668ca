//! The kernel: owns the three ports the use cases are built against, plus
//! the per-task lock registry that gives every dispatcher call
//! linearizability on a given `task_id`.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};
use wfk_domain::ports::{StateStore, TaskProvider, TemplateLoader};

/// Explicit kernel value injected into every dispatcher entry point, in
/// place of a singleton orchestrator or module-level mutable registries.
pub struct Kernel {
    pub(crate) state_store: Arc<dyn StateStore>,
    pub(crate) template_loader: Arc<dyn TemplateLoader>,
    pub(crate) task_provider: Arc<dyn TaskProvider>,
    task_locks: DashMap<String, Arc<Mutex<()>>>,
}

impl Kernel {
    /// Build a kernel from its three ports.
    #[must_use]
    pub fn new(
        state_store: Arc<dyn StateStore>,
        template_loader: Arc<dyn TemplateLoader>,
        task_provider: Arc<dyn TaskProvider>,
    ) -> Self {
        Self {
            state_store,
            template_loader,
            task_provider,
            task_locks: DashMap::new(),
        }
    }

    /// Acquire the exclusive lock for `task_id`, held for the duration of a
    /// single dispatcher call. Cross-task calls proceed concurrently;
    /// same-task calls serialize in acceptance order.
    pub(crate) async fn lock_task(&self, task_id: &str) -> OwnedMutexGuard<()> {
        let lock = self
            .task_locks
            .entry(task_id.to_owned())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        lock.lock_owned().await
    }
}
