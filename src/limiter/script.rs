//! Server-side sliding window script
//!
//! The read of both counters, the weighted computation, the admission
//! decision, the conditional increment, and the TTL refresh execute as one
//! indivisible unit inside the store. The arithmetic here is part of the
//! wire contract: existing counter keys written by other processes stay
//! compatible only if it is preserved verbatim.

/// Lua source of the sliding window decision.
///
/// Keys: the current window counter and the previous window counter.
/// Args: limit, now (ms), window (ms), increment.
/// Reply: `[remaining, 0]` on admission, `[-1, retry_after_ms]` on rejection.
pub const SLIDING_WINDOW_SCRIPT: &str = r#"
local current_key = KEYS[1]
local previous_key = KEYS[2]

local limit = tonumber(ARGV[1])
local now = tonumber(ARGV[2])
local window = tonumber(ARGV[3])
local increment = tonumber(ARGV[4])

local current_count = tonumber(redis.call('GET', current_key) or '0')
local previous_count = tonumber(redis.call('GET', previous_key) or '0')

local time_in_current = now % window
local time_remaining_previous = window - time_in_current
local weighted_previous = previous_count * time_remaining_previous / window
local cumulative = math.floor(weighted_previous) + current_count + increment

if cumulative > limit then
    local needed = cumulative - limit + increment
    local retry_after
    if previous_count > 0 then
        retry_after = math.min(math.ceil(needed * window / previous_count), time_remaining_previous)
    else
        retry_after = window - time_in_current
    end
    return {-1, retry_after}
end

redis.call('SET', current_key, current_count + increment)
redis.call('PEXPIRE', current_key, window * 2 + 1000)
return {limit - (math.floor(weighted_previous) + current_count + increment), 0}
"#;
