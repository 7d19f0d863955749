use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::{Instant, sleep};
use tracing::debug;

/// Enforces a minimum gap between the starts of consecutive requests.
#[derive(Debug)]
pub struct RequestThrottle {
    min_interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl RequestThrottle {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_request: Mutex::new(None),
        }
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Waits until the interval since the previous request has passed, then
    /// stamps and returns the current instant as the latest request start.
    pub async fn wait_turn(&self) -> Instant {
        // Held across the sleep so concurrent callers queue up.
        let mut last_request = self.last_request.lock().await;

        if let Some(previous) = *last_request {
            let elapsed = previous.elapsed();
            if elapsed < self.min_interval {
                let remaining = self.min_interval - elapsed;
                debug!(
                    "request interval too short, waiting {:.2}s",
                    remaining.as_secs_f64()
                );
                sleep(remaining).await;
            }
        }

        let now = Instant::now();
        *last_request = Some(now);
        now
    }

    pub async fn last_request(&self) -> Option<Instant> {
        *self.last_request.lock().await
    }
}
