//! Rate limiting engines and facade
//!
//! The [`RateLimiter`] facade dispatches each call to one of two engines:
//! fixed window (plain `INCR` with a TTL) or weighted sliding window (a
//! single server-side script). Both are race-free when many processes target
//! the same identifier through the same store.

mod clock;
mod fixed;
#[allow(clippy::module_inception)]
mod limiter;
mod script;
mod sliding;
mod types;
mod utils;


// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use limiter::RateLimiter;
pub use script::SLIDING_WINDOW_SCRIPT;
pub use types::RateLimitResponse;
