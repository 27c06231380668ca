//! Reference [`TaskProvider`](wfk_domain::ports::TaskProvider) adapters.

pub mod markdown;

pub use markdown::MarkdownTaskProvider;
