//! MCP transport layer: wraps the application layer's use cases as tools on
//! an `rmcp` server, one tool per dispatcher entry point. Transport-agnostic;
//! the binary entry point decides which `rmcp` transport to serve over.

mod args;
mod server;

pub use server::WorkflowKernelServer;
