//! Sliding window algorithm tests

use crate::common::limiter_at;
use rategate::{CounterStore, RateLimitConfig};

// ==================== Admission Tests ====================

#[tokio::test]
async fn test_admits_up_to_limit_then_rejects() {
    let h = limiter_at(RateLimitConfig::sliding_window(10, 2), 2_000_000_000);

    for expected in (0..10).rev() {
        let response = h.limiter.limit("a").await.unwrap();
        assert!(response.success);
        assert_eq!(response.remaining, expected);
        assert_eq!(response.retry_after, 0);
    }

    let rejected = h.limiter.limit("a").await.unwrap();
    assert!(!rejected.success);
    assert_eq!(rejected.remaining, 0);
    assert!(rejected.retry_after > 0);
}

#[tokio::test]
async fn test_partial_window_keeps_admitting() {
    let h = limiter_at(RateLimitConfig::sliding_window(10, 2), 2_000_000_000);

    for _ in 0..8 {
        assert!(h.limiter.limit("a").await.unwrap().success);
    }

    // Halfway into the window the eight admissions still count in full.
    h.clock.advance(1_000);
    assert!(h.limiter.limit("a").await.unwrap().success);
    assert!(h.limiter.limit("a").await.unwrap().success);

    let eleventh = h.limiter.limit("a").await.unwrap();
    assert!(!eleventh.success);
    assert_eq!(eleventh.retry_after, 1_000);
}

#[tokio::test]
async fn test_reset_looks_two_windows_ahead() {
    let h = limiter_at(RateLimitConfig::sliding_window(10, 2), 2_000_000_000);

    let response = h.limiter.limit("a").await.unwrap();
    assert_eq!(response.reset, 2_000_000_000 + 4_000);

    h.clock.advance(700);
    let response = h.limiter.limit("a").await.unwrap();
    assert_eq!(response.reset, 2_000_000_700 + 4_000);
}

// ==================== Weighting Tests ====================

#[tokio::test]
async fn test_previous_window_ages_out_linearly() {
    let h = limiter_at(RateLimitConfig::sliding_window(10, 1), 5_000_000_000);

    // Fill the window completely.
    for _ in 0..10 {
        assert!(h.limiter.limit("a").await.unwrap().success);
    }
    assert!(!h.limiter.limit("a").await.unwrap().success);

    // 300 ms into the next window: weighted previous = floor(10 * 0.7) = 7,
    // so three more admissions fit.
    h.clock.advance(1_300);
    for expected in [2, 1, 0] {
        let response = h.limiter.limit("a").await.unwrap();
        assert!(response.success);
        assert_eq!(response.remaining, expected);
    }

    // needed = 2, so the wait is ceil(2 * 1000 / 10) = 200 ms, well within
    // the 700 ms still covered by the previous bucket.
    let rejected = h.limiter.limit("a").await.unwrap();
    assert!(!rejected.success);
    assert_eq!(rejected.retry_after, 200);
}

#[tokio::test]
async fn test_old_admissions_near_window_end_barely_count() {
    let h = limiter_at(RateLimitConfig::sliding_window(5, 1), 6_000_000_950);

    assert!(h.limiter.limit("a").await.unwrap().success);
    assert!(h.limiter.limit("a").await.unwrap().success);

    // 900 ms into the next window only floor(2 * 0.1) = 0 of the previous
    // admissions remain.
    h.clock.advance(950);
    let first = h.limiter.limit("a").await.unwrap();
    assert!(first.success);
    assert_eq!(first.remaining, 4);
    assert!(h.limiter.limit("a").await.unwrap().success);
}

#[tokio::test]
async fn test_same_window_sleep_does_not_free_slots() {
    let h = limiter_at(RateLimitConfig::sliding_window(5, 1), 3_000_000_000);

    assert!(h.limiter.limit("a").await.unwrap().success);
    assert!(h.limiter.limit("a").await.unwrap().success);

    h.clock.advance(900);
    let third = h.limiter.limit("a").await.unwrap();
    assert!(third.success);
    assert_eq!(third.remaining, 2);
    assert!(h.limiter.limit("a").await.unwrap().success);
}

// ==================== Expiry Tests ====================

#[tokio::test]
async fn test_blank_slate_after_two_windows() {
    let h = limiter_at(RateLimitConfig::sliding_window(10, 1), 4_000_000_000);

    for _ in 0..10 {
        assert!(h.limiter.limit("a").await.unwrap().success);
    }
    let rejected = h.limiter.limit("a").await.unwrap();
    assert!(!rejected.success);
    assert_eq!(rejected.retry_after, 1_000);

    h.clock.advance(2_100);
    let fresh = h.limiter.limit("a").await.unwrap();
    assert!(fresh.success);
    assert_eq!(fresh.remaining, 9);
}

#[tokio::test]
async fn test_current_key_ttl_spans_two_windows() {
    let now = 4_000_000_000;
    let h = limiter_at(RateLimitConfig::sliding_window(10, 1), now);

    h.limiter.limit("a").await.unwrap();

    let key = format!("ratelimit:a:{}", now / 1_000);
    // TTL is 2 * window + 1 s, so the key survives long enough to be
    // consulted as the previous bucket of the next window.
    assert_eq!(h.store.ttl(&key).await.unwrap(), 3);
}

#[tokio::test]
async fn test_rejection_leaves_counters_untouched() {
    let now = 4_000_000_000;
    let h = limiter_at(RateLimitConfig::sliding_window(2, 1), now);

    h.limiter.limit("a").await.unwrap();
    h.limiter.limit("a").await.unwrap();
    h.limiter.limit("a").await.unwrap();

    let key = format!("ratelimit:a:{}", now / 1_000);
    assert_eq!(h.store.get(&key).await.unwrap(), Some(2));
}

// ==================== Script Cache Tests ====================

#[tokio::test]
async fn test_recovers_after_script_flush() {
    let h = limiter_at(RateLimitConfig::sliding_window(5, 1), 7_000_000_000);

    let first = h.limiter.limit("a").await.unwrap();
    assert_eq!(first.remaining, 4);

    // A server restart or SCRIPT FLUSH forgets the cached handle; the next
    // call must reload and still count correctly.
    h.store.flush_scripts();
    let second = h.limiter.limit("a").await.unwrap();
    assert!(second.success);
    assert_eq!(second.remaining, 3);
}
