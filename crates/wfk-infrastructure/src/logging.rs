//! Global `tracing-subscriber` installation for the binary entry point.
//! Library crates never initialize a subscriber themselves.

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LogFormat;

/// Install a global tracing subscriber reading its filter from `RUST_LOG`
/// (default `info`), formatted per `format`.
pub fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match format {
        LogFormat::Compact => {
            fmt().with_env_filter(filter).compact().init();
        }
        LogFormat::Json => {
            fmt().with_env_filter(filter).json().init();
        }
    }
}
