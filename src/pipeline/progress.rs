use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Completed/total counter shared between workers and whoever is watching
/// the batch.
#[derive(Debug)]
pub struct BatchProgress {
    completed: AtomicUsize,
    failed: AtomicUsize,
    total: usize,
    start_time: Instant,
}

impl BatchProgress {
    pub fn new(total: usize) -> Self {
        Self {
            completed: AtomicUsize::new(0),
            failed: AtomicUsize::new(0),
            total,
            start_time: Instant::now(),
        }
    }

    /// Records one finished document and returns the new completed count.
    pub fn record_completion(&self, succeeded: bool) -> usize {
        if !succeeded {
            self.failed.fetch_add(1, Ordering::SeqCst);
        }
        self.completed.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }

    pub fn failed(&self) -> usize {
        self.failed.load(Ordering::SeqCst)
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Completed over total, in `0.0..=1.0`. An empty batch counts as done.
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.completed() as f64 / self.total as f64
        }
    }

    pub fn percentage(&self) -> f64 {
        self.fraction() * 100.0
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn estimated_remaining(&self) -> Duration {
        let completed = self.completed();
        if completed == 0 {
            return Duration::from_secs(0);
        }

        let rate = completed as f64 / self.elapsed().as_secs_f64();
        let remaining = self.total.saturating_sub(completed);

        if rate > 0.0 {
            Duration::from_secs_f64(remaining as f64 / rate)
        } else {
            Duration::from_secs(0)
        }
    }

    pub fn snapshot(&self, current_file: Option<String>) -> ProgressSnapshot {
        ProgressSnapshot {
            completed: self.completed(),
            failed: self.failed(),
            total: self.total,
            current_file,
            elapsed: self.elapsed(),
            estimated_remaining: self.estimated_remaining(),
        }
    }
}

/// Point-in-time copy of [`BatchProgress`] handed to progress callbacks.
#[derive(Debug, Clone)]
pub struct ProgressSnapshot {
    pub completed: usize,
    pub failed: usize,
    pub total: usize,
    pub current_file: Option<String>,
    pub elapsed: Duration,
    pub estimated_remaining: Duration,
}

impl ProgressSnapshot {
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.completed as f64 / self.total as f64
        }
    }
}

/// Cooperative cancellation flag. Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    pub fn reset(&self) {
        self.cancelled.store(false, Ordering::SeqCst);
    }
}
