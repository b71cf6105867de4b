// src/crawl/throttle.rs
// =============================================================================
// The pause between pages.
//
// The search API allows a small number of requests per hour on a demo key,
// so after every saved page we wait a fixed amount of time (90 seconds by
// default). This is a plain fixed delay, not an adaptive rate limiter.
//
// It sits behind the Throttle trait so tests can run the loop without
// waiting and count how often it paused.
// =============================================================================

use std::time::Duration;

use async_trait::async_trait;

/// Wall-clock pause after each saved page
pub const DEFAULT_PAGE_DELAY: Duration = Duration::from_secs(90);

/// Something the crawl loop waits on between pages
#[async_trait]
pub trait Throttle: Send + Sync {
    async fn pause(&self);
}

/// Sleeps for the same duration every time
#[derive(Debug, Clone, Copy)]
pub struct FixedDelay {
    delay: Duration,
}

impl FixedDelay {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for FixedDelay {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_DELAY)
    }
}

#[async_trait]
impl Throttle for FixedDelay {
    async fn pause(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}
