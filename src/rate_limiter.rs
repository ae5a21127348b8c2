use std::collections::VecDeque;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::{sleep_until, Instant};

use crate::constants::{RATE_LIMIT_WINDOW, REQUESTS_PER_WINDOW};

/// Hands out at most `capacity` permits in any rolling `window`.
///
/// Waiters queue on the inner lock, so permits are granted in arrival order
/// and nobody is ever turned away.
pub struct RateLimiter {
    capacity: usize,
    window: Duration,
    issued: Mutex<VecDeque<Instant>>,
}

impl RateLimiter {
    pub fn new(capacity: usize, window: Duration) -> Self {
        Self {
            capacity: capacity.max(1),
            window,
            issued: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    pub async fn acquire(&self) {
        let mut issued = self.issued.lock().await;

        loop {
            let now = Instant::now();

            while issued.front().is_some_and(|issued_at| *issued_at + self.window <= now) {
                issued.pop_front();
            }

            if issued.len() < self.capacity {
                issued.push_back(now);
                return;
            }

            if let Some(oldest) = issued.front().copied() {
                sleep_until(oldest + self.window).await;
            }
        }
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(REQUESTS_PER_WINDOW, RATE_LIMIT_WINDOW)
    }
}
