use governor::{Quota, RateLimiter, Jitter};
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use std::num::NonZeroU32;
use std::sync::Arc;
use nonzero_ext::*;
use std::time::Duration;
use crate::structs::config::ai_config::AiConfig;

/// Client-side throttle for the suggestion service: a per-minute quota plus a
/// per-second burst cap, shared by every concurrent suggestion call.
#[derive(Clone)]
pub struct ApiRateLimiter {
    limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
    burst_limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

impl ApiRateLimiter {
    pub fn new(requests_per_minute: u32, burst_per_second: u32) -> Self {
        let per_minute = NonZeroU32::new(requests_per_minute).unwrap_or(nonzero!(50u32));
        let per_second = NonZeroU32::new(burst_per_second).unwrap_or(nonzero!(5u32));

        Self {
            limiter: Arc::new(RateLimiter::direct(Quota::per_minute(per_minute))),
            burst_limiter: Arc::new(RateLimiter::direct(Quota::per_second(per_second))),
        }
    }

    pub fn from_config(config: &AiConfig) -> Self {
        Self::new(config.requests_per_minute, config.burst_per_second)
    }

    /// Waits until both quotas admit one more request.
    pub async fn acquire(&self) {
        self.burst_limiter.until_ready().await;
        self.limiter.until_ready_with_jitter(Jitter::up_to(Duration::from_millis(100))).await;
    }
}

impl Default for ApiRateLimiter {
    fn default() -> Self {
        Self::from_config(&AiConfig::default())
    }
}
