//! End-to-end tests against a real Redis/Valkey server
//!
//! Run with `cargo test -- --ignored` and a server reachable at `REDIS_URL`
//! (default `redis://127.0.0.1:6379`).
