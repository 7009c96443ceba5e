pub mod commands;
pub mod telemetry;

use chrono::{DateTime, FixedOffset, SubsecRound, Utc};

/// Server-assigned creation instant.
///
/// Truncated to microseconds so the value handed back to callers is exactly
/// what the database stores.
#[must_use]
pub fn now() -> DateTime<FixedOffset> {
    Utc::now().trunc_subsecs(6).fixed_offset()
}
