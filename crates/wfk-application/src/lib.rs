//! Application layer: the tool dispatcher's use cases, orchestrating the
//! domain ports (state store, template loader, task provider) behind the
//! kernel's per-task locking.

pub mod envelope;
pub mod kernel;
mod prompt_vars;
mod time;
pub mod use_cases;

pub use envelope::{RpcResponse, RpcStatus};
pub use kernel::Kernel;
