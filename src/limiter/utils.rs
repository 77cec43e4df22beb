//! Key building and window arithmetic

/// Build the counter key for one (prefix, identifier, window-index) triple.
///
/// The identifier participates verbatim; the suffix is the decimal window
/// index and may be negative for pre-epoch instants.
pub(crate) fn counter_key(prefix: &str, identifier: &str, window_index: i64) -> String {
    format!("{}:{}:{}", prefix, identifier, window_index)
}

/// Index of the window containing `now_ms`, using floored division so
/// negative instants land in negative windows.
pub(crate) fn window_index(now_ms: i64, window_ms: i64) -> i64 {
    now_ms.div_euclid(window_ms)
}
