//! Sliding-window rate limiting for remote provider calls.

use std::future::Future;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::{Error, Result};

/// Default maximum calls per window
pub const DEFAULT_LIMIT: u32 = 5;
/// Default window length
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Debug)]
struct WindowState {
    calls: u32,
    window_start: Instant,
}

/// Bounds call frequency over a sliding window.
///
/// State is shared across every call made through one limiter instance;
/// the check-then-increment runs under a mutex so concurrent callers on a
/// multi-threaded runtime cannot exceed the limit.
pub struct RateLimiter {
    limit: u32,
    interval: Duration,
    state: Mutex<WindowState>,
}

impl RateLimiter {
    pub fn new(limit: u32, interval: Duration) -> Self {
        Self {
            limit,
            interval,
            state: Mutex::new(WindowState {
                calls: 0,
                window_start: Instant::now(),
            }),
        }
    }

    /// Run `operation` if the current window has capacity.
    ///
    /// Resets the window when it has elapsed; when the limit is reached
    /// the operation is not invoked and [`Error::RateLimit`] reports how
    /// long until the window reopens. Results of the operation propagate
    /// unchanged.
    pub async fn run<F, Fut, T>(&self, operation: F) -> Result<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        self.acquire().await?;
        operation().await
    }

    async fn acquire(&self) -> Result<()> {
        let mut state = self.state.lock().await;
        let now = Instant::now();

        if now.duration_since(state.window_start) > self.interval {
            state.calls = 0;
            state.window_start = now;
        }

        if state.calls >= self.limit {
            let remaining = self
                .interval
                .saturating_sub(now.duration_since(state.window_start));
            return Err(Error::RateLimit {
                retry_after_secs: remaining.as_secs_f64().ceil() as u64,
            });
        }

        state.calls += 1;
        Ok(())
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT, DEFAULT_INTERVAL)
    }
}
