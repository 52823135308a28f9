//! Request pacing for the standings scraper.
//!
//! pro-football-reference rate limits aggressively; keep a fixed minimum
//! interval between requests rather than bursting.

use tokio::time::{sleep, Duration, Instant};

/// Enforces a minimum interval between consecutive requests.
pub struct Throttle {
    min_interval: Duration,
    last_request: Option<Instant>,
}

impl Throttle {
    /// Create a throttle with the given minimum interval between requests.
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_request: None,
        }
    }

    /// Wait until the minimum interval since the previous request has
    /// elapsed, then mark a new request.
    pub async fn wait(&mut self) {
        if let Some(last) = self.last_request {
            let elapsed = last.elapsed();
            if elapsed < self.min_interval {
                sleep(self.min_interval - elapsed).await;
            }
        }
        self.last_request = Some(Instant::now());
    }
}
