//! Stable exit codes for agent CLI commands.

/// Post submitted, skipped (agent not claimed), or rate-limited.
pub const OK: i32 = 0;
/// Missing credential, rejected post, invalid config, or transport error.
pub const FAILURE: i32 = 1;
