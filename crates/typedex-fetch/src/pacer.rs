//! Fixed minimum spacing between provider requests.

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

/// Enforces a minimum interval between consecutive calls to [`wait`].
///
/// The lock is held across the sleep, so concurrent callers queue up and
/// are released one interval apart.
///
/// [`wait`]: RequestPacer::wait
#[derive(Debug)]
pub struct RequestPacer {
    interval: Duration,
    last: Mutex<Option<Instant>>,
}

impl RequestPacer {
    /// A pacer releasing at most one call per `interval`.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: Mutex::new(None),
        }
    }

    /// The configured interval.
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Sleep until at least one interval has passed since the previous call.
    pub async fn wait(&self) {
        let mut last = self.last.lock().await;
        if let Some(ready) = last.and_then(|previous| previous.checked_add(self.interval)) {
            tokio::time::sleep_until(ready).await;
        }
        *last = Some(Instant::now());
    }
}
