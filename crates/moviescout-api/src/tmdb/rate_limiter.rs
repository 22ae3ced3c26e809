//! Request pacing for the TMDB API.

use std::time::{Duration, Instant};

use tokio::sync::Mutex;

/// Default minimum spacing between requests (~40 req/s).
const DEFAULT_MIN_INTERVAL: Duration = Duration::from_millis(25);

/// Slot-reserving rate limiter shared by concurrent requests.
///
/// Each caller reserves the next free send slot under a short lock and then
/// sleeps outside of it, so a trending page and a detail lookup issued at
/// the same time are spaced by `min_interval` without holding the lock
/// across the sleep.
#[derive(Debug)]
pub struct RequestPacer {
    /// Minimum spacing between two send slots.
    min_interval: Duration,
    /// Next instant at which a request may be sent.
    next_slot: Mutex<Option<Instant>>,
}

impl RequestPacer {
    /// Creates a pacer with the given minimum interval.
    pub(crate) fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            next_slot: Mutex::new(None),
        }
    }

    /// Creates a pacer with the default interval (25ms).
    pub(crate) fn default_interval() -> Self {
        Self::new(DEFAULT_MIN_INTERVAL)
    }

    /// Reserves a send slot and returns the instant it starts at.
    async fn reserve(&self) -> Instant {
        let now = Instant::now();
        let mut next = self.next_slot.lock().await;
        let slot = next.map_or(now, |n| n.max(now));
        *next = slot.checked_add(self.min_interval);
        slot
    }

    /// Waits until this caller's reserved slot is reached.
    pub async fn wait(&self) {
        let slot = self.reserve().await;
        let now = Instant::now();
        if slot > now {
            tokio::time::sleep(slot.saturating_duration_since(now)).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[tokio::test]
    async fn test_first_request_is_immediate() {
        // Arrange
        let pacer = RequestPacer::new(Duration::from_secs(1));

        // Act
        let start = Instant::now();
        pacer.wait().await;

        // Assert
        assert!(start.elapsed() < Duration::from_millis(100));
    }

    #[tokio::test]
    async fn test_sequential_requests_are_spaced() {
        // Arrange
        let pacer = RequestPacer::new(Duration::from_millis(50));

        // Act
        let start = Instant::now();
        pacer.wait().await;
        pacer.wait().await;

        // Assert
        assert!(start.elapsed() >= Duration::from_millis(50));
    }

    #[tokio::test]
    async fn test_concurrent_requests_get_distinct_slots() {
        // Arrange
        let pacer = Arc::new(RequestPacer::new(Duration::from_millis(40)));

        // Act
        let start = Instant::now();
        let a = tokio::spawn({
            let pacer = Arc::clone(&pacer);
            async move { pacer.wait().await }
        });
        let b = tokio::spawn({
            let pacer = Arc::clone(&pacer);
            async move { pacer.wait().await }
        });
        let c = tokio::spawn({
            let pacer = Arc::clone(&pacer);
            async move { pacer.wait().await }
        });
        let _ = tokio::join!(a, b, c);

        // Assert: third slot starts two intervals after the first
        assert!(start.elapsed() >= Duration::from_millis(80));
    }

    #[test]
    fn test_default_interval() {
        // Arrange & Act
        let pacer = RequestPacer::default_interval();

        // Assert
        assert_eq!(pacer.min_interval, Duration::from_millis(25));
    }
}
