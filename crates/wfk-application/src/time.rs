//! Timestamp formatting shared by every use case that stamps a record.

use chrono::{SecondsFormat, Utc};

/// The current instant, formatted as the on-disk bit-stable timestamp shape:
/// RFC 3339, UTC, with a literal `Z` suffix and second precision.
#[must_use]
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}
