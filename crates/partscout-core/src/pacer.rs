//! Per-adapter-instance request pacing.

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::{sleep_until, Instant};

/// Enforces a minimum delay between one adapter instance's outbound
/// requests.
///
/// Scope is the instance itself: concurrent queries against the same store
/// through different instances are not coordinated. Callers that need a
/// shared per-store budget layer their own limiter in front.
#[derive(Debug)]
pub struct RequestPacer {
    delay: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl RequestPacer {
    #[must_use]
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
            last_request: Mutex::new(None),
        }
    }

    /// Sleeps until at least the configured delay has passed since the
    /// previous paced request, then records the new request time.
    ///
    /// The lock is held across the sleep so that concurrent callers on the
    /// same instance queue up instead of stampeding.
    pub async fn pace(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let ready_at = previous + self.delay;
            if ready_at > Instant::now() {
                sleep_until(ready_at).await;
            }
        }
        *last = Some(Instant::now());
    }
}
