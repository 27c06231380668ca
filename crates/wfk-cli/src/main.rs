//! Binary entry point: wires configuration, logging, the three ports, and
//! serves the workflow kernel's MCP tools over stdio.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use rmcp::transport::stdio;
use rmcp::ServiceExt;

use wfk_application::Kernel;
use wfk_infrastructure::{FileStateStore, FileTemplateLoader, KernelConfig};
use wfk_providers::MarkdownTaskProvider;
use wfk_server::WorkflowKernelServer;

/// Drives an AI coding agent through a disciplined plan/implement/review/test/finalize lifecycle.
#[derive(Debug, Parser)]
#[command(name = "wfk", version, about)]
struct Cli {
    /// Path to an optional `kernel.toml` configuration file.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = KernelConfig::load(cli.config.as_deref())?;
    wfk_infrastructure::logging::init_tracing(config.log_format);

    tracing::info!(
        workspace_root = %config.workspace_root.display(),
        template_root = %config.template_root.display(),
        tasks_root = %config.tasks_root.display(),
        "starting workflow kernel"
    );

    let state_store = Arc::new(FileStateStore::new(&config.workspace_root));
    let template_loader = Arc::new(FileTemplateLoader::new(&config.template_root));
    let task_provider = Arc::new(MarkdownTaskProvider::new(&config.tasks_root));

    let kernel = Arc::new(Kernel::new(state_store, template_loader, task_provider));
    let server = WorkflowKernelServer::new(kernel);

    let service = server.serve(stdio()).await?;
    service.waiting().await?;

    Ok(())
}
