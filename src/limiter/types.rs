//! Decision response type

use serde::{Deserialize, Serialize};

/// Result of a single rate limit check
///
/// Invariants: on success `retry_after` is 0 and `remaining` is in
/// `[0, limit - 1]`; on rejection `remaining` is 0 and `retry_after` is the
/// estimated wait in milliseconds. `reset` is an absolute wall-clock instant
/// strictly in the future at the moment of return, by which the limiter will
/// have returned to a blank slate for the identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitResponse {
    /// Whether the event was admitted
    pub success: bool,
    /// The configured ceiling
    pub limit: i64,
    /// Admissions left in the current window
    pub remaining: i64,
    /// Milliseconds to wait before retrying; 0 when admitted
    pub retry_after: i64,
    /// Absolute instant in milliseconds when the window state has fully aged
    pub reset: i64,
}
