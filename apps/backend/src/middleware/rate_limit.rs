//! Rate limit settings for the anonymous join endpoint.
//!
//! Keyed by the socket peer address over a one minute window. Join codes are
//! short, so this is the main brake on guessing. Forwarding headers are
//! ignored because clients can set them freely; behind a reverse proxy every
//! client shares the proxy's budget.

use std::time::Duration;

use actix_extensible_rate_limit::backend::memory::InMemoryBackend;
use actix_extensible_rate_limit::backend::SimpleInputFunctionBuilder;

pub const JOIN_RATE_LIMIT_WINDOW: Duration = Duration::from_secs(60);

/// Input builder for `POST /api/join`: `per_minute` requests per peer IP.
pub fn join_rate_limit_config(per_minute: u64) -> SimpleInputFunctionBuilder {
    SimpleInputFunctionBuilder::new(JOIN_RATE_LIMIT_WINDOW, per_minute).peer_ip_key()
}

/// Shared limiter store plus the per-minute budget for the join scope.
///
/// Built once and cloned into every worker's `App` so all workers count
/// against the same window.
#[derive(Clone)]
pub struct JoinRateLimit {
    pub backend: InMemoryBackend,
    pub per_minute: u64,
}

impl JoinRateLimit {
    /// Must be called inside the actix runtime; the in-memory backend spawns
    /// its garbage collector on build.
    pub fn new(per_minute: u64) -> Self {
        Self {
            backend: InMemoryBackend::builder().build(),
            per_minute,
        }
    }
}
