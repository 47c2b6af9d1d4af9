use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Delays acting on a changing input until it has been quiet for a configured
/// interval. Gates search-as-you-type so every keystroke does not hit the
/// provider APIs.
///
/// Each `settle` call supersedes any earlier call still waiting; only the last
/// value inside a quiet window is emitted.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    generation: Arc<AtomicU64>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Wait out the quiet window for `value`.
    ///
    /// Returns `Some(value)` if no newer value was submitted while waiting,
    /// `None` if this call was superseded.
    pub async fn settle<T>(&self, value: T) -> Option<T> {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(self.delay).await;

        if self.generation.load(Ordering::SeqCst) == ticket {
            Some(value)
        } else {
            None
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}
