//! Progress reporting for long-running pipeline runs.
//!
//! The pipeline reports `(processed, total)` face counts through a caller
//! supplied [`Progress`] callback. Reports are rate-limited by a [`Throttle`]
//! so a large batch does not flood the caller; a final `(total, total)` report
//! always fires when the run succeeds.

use std::time::{Duration, Instant};

/// A progress callback that receives updates during long-running operations.
///
/// The callback receives the number of faces processed so far and the total
/// face count.
pub struct Progress {
    callback: Box<dyn Fn(usize, usize) + Send + Sync>,
}

impl Progress {
    /// Create a new progress reporter with the given callback.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(usize, usize) + Send + Sync + 'static,
    {
        Self {
            callback: Box::new(callback),
        }
    }

    /// Report progress.
    #[inline]
    pub fn report(&self, processed: usize, total: usize) {
        (self.callback)(processed, total);
    }

    /// Create a no-op progress reporter that discards all updates.
    pub fn none() -> Self {
        Self::new(|_, _| {})
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::none()
    }
}

impl std::fmt::Debug for Progress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Progress").finish_non_exhaustive()
    }
}

/// Wall-clock rate limiter for progress reports.
///
/// `ready` returns true at most once per `interval`, measured from
/// construction for the first report.
#[derive(Debug)]
pub struct Throttle {
    interval: Duration,
    last: Instant,
}

impl Throttle {
    /// Create a throttle that opens every `interval`.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: Instant::now(),
        }
    }

    /// Whether enough time has passed since the last accepted report.
    /// Accepting resets the clock.
    pub fn ready(&mut self) -> bool {
        if self.last.elapsed() >= self.interval {
            self.last = Instant::now();
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_progress_invokes_callback() {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&count);
        let progress = Progress::new(move |processed, total| {
            assert!(processed <= total);
            seen.fetch_add(1, Ordering::Relaxed);
        });

        progress.report(1, 4);
        progress.report(4, 4);
        assert_eq!(count.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn test_zero_interval_throttle_is_always_ready() {
        let mut throttle = Throttle::new(Duration::ZERO);
        assert!(throttle.ready());
        assert!(throttle.ready());
    }

    #[test]
    fn test_long_interval_throttle_blocks() {
        let mut throttle = Throttle::new(Duration::from_secs(3600));
        assert!(!throttle.ready());
    }
}
