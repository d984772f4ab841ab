//! Per-exercise stopwatch.
//!
//! [`Stopwatch`] is the plain counter: it advances one second per tick while
//! running. [`StopwatchTask`] drives it from a worker thread and is owned by
//! the exercise view that displays it. The worker wakes at a fixed interval
//! and credits the wall-clock time since its last sample, so the interval
//! only controls how often the count is refreshed. Stopping or dropping the
//! task cancels the worker and joins it, so no time lands after the view is
//! gone.

use crate::progress::format_elapsed;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Elapsed-time counter with a running flag
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Stopwatch {
    elapsed: Duration,
    running: bool,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Flip between running and paused; returns the new running state
    pub fn toggle(&mut self) -> bool {
        self.running = !self.running;
        self.running
    }

    /// Advance by one second if running
    pub fn tick(&mut self) {
        self.advance(Duration::from_secs(1));
    }

    /// Advance by `by` if running
    pub fn advance(&mut self, by: Duration) {
        if self.running {
            self.elapsed += by;
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Whole seconds elapsed
    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed.as_secs()
    }

    /// Elapsed time as `m:ss`
    pub fn display(&self) -> String {
        format_elapsed(self.elapsed_secs())
    }
}

/// Stopwatch plus the instant it was last brought up to date
#[derive(Debug)]
struct Clock {
    stopwatch: Stopwatch,
    last_sample: Instant,
}

impl Clock {
    fn new() -> Self {
        Self {
            stopwatch: Stopwatch::new(),
            last_sample: Instant::now(),
        }
    }

    /// Credit the time since the previous sample
    fn sample(&mut self) -> Stopwatch {
        let now = Instant::now();
        self.stopwatch.advance(now.duration_since(self.last_sample));
        self.last_sample = now;
        self.stopwatch
    }
}

/// A cancellable task keeping a shared [`Stopwatch`] in step with real time
pub struct StopwatchTask {
    clock: Arc<Mutex<Clock>>,
    cancel: Option<Sender<()>>,
    worker: Option<JoinHandle<()>>,
}

impl StopwatchTask {
    /// Spawn the worker refreshing every `interval`; the stopwatch starts
    /// paused at zero
    pub fn spawn(interval: Duration) -> Self {
        let clock = Arc::new(Mutex::new(Clock::new()));
        let (cancel, cancelled) = mpsc::channel::<()>();

        let shared = Arc::clone(&clock);
        let worker = thread::spawn(move || loop {
            match cancelled.recv_timeout(interval) {
                Err(RecvTimeoutError::Timeout) => {
                    lock(&shared).sample();
                }
                // explicit cancel or the owning task was dropped
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
        });

        tracing::debug!("Spawned stopwatch task refreshing every {:?}", interval);
        Self {
            clock,
            cancel: Some(cancel),
            worker: Some(worker),
        }
    }

    /// Start or pause; returns the new running state
    pub fn toggle(&self) -> bool {
        let mut clock = lock(&self.clock);
        clock.sample();
        clock.stopwatch.toggle()
    }

    /// Current stopwatch state
    pub fn snapshot(&self) -> Stopwatch {
        lock(&self.clock).sample()
    }

    /// Cancel the worker and wait for it; returns the final stopwatch state,
    /// paused
    pub fn stop(&mut self) -> Stopwatch {
        if let Some(cancel) = self.cancel.take() {
            let _ = cancel.send(());
        }
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                tracing::warn!("Stopwatch worker panicked");
            }
            tracing::debug!("Stopped stopwatch task");
        }

        let mut clock = lock(&self.clock);
        clock.sample();
        clock.stopwatch.pause();
        clock.stopwatch
    }
}

impl Drop for StopwatchTask {
    fn drop(&mut self) {
        self.stop();
    }
}

// The worker never panics while holding the lock, but recover the state anyway.
fn lock(clock: &Mutex<Clock>) -> MutexGuard<'_, Clock> {
    clock.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_stopwatch_is_paused_at_zero() {
        let sw = Stopwatch::new();
        assert!(!sw.is_running());
        assert_eq!(sw.display(), "0:00");
    }

    #[test]
    fn test_sixty_five_seconds_displays_1_05() {
        let mut sw = Stopwatch::new();
        sw.start();
        for _ in 0..65 {
            sw.tick();
        }
        assert_eq!(sw.display(), "1:05");
    }

    #[test]
    fn test_pause_halts_and_resume_continues() {
        let mut sw = Stopwatch::new();
        sw.start();
        sw.advance(Duration::from_secs(30));
        sw.pause();
        for _ in 0..10 {
            sw.tick();
        }
        assert_eq!(sw.elapsed_secs(), 30);

        assert!(sw.toggle());
        sw.tick();
        assert_eq!(sw.elapsed_secs(), 31);
        assert!(!sw.toggle());
    }

    #[test]
    fn test_partial_seconds_accumulate() {
        let mut sw = Stopwatch::new();
        sw.start();
        for _ in 0..3 {
            sw.advance(Duration::from_millis(400));
        }
        assert_eq!(sw.elapsed_secs(), 1);
    }

    #[test]
    fn test_ticks_ignored_when_never_started() {
        let mut sw = Stopwatch::new();
        sw.tick();
        sw.advance(Duration::from_secs(5));
        assert_eq!(sw.elapsed_secs(), 0);
    }

    #[test]
    fn test_task_counts_real_seconds_with_short_interval() {
        let mut task = StopwatchTask::spawn(Duration::from_millis(100));
        assert!(task.toggle());
        thread::sleep(Duration::from_millis(1050));
        let stopped = task.stop();
        assert_eq!(stopped.elapsed_secs(), 1);
        assert!(!stopped.is_running());
    }

    #[test]
    fn test_task_counts_real_seconds_with_long_interval() {
        let mut task = StopwatchTask::spawn(Duration::from_secs(60));
        task.toggle();
        thread::sleep(Duration::from_millis(1100));
        assert_eq!(task.snapshot().elapsed_secs(), 1);
        // cancellation does not wait out the interval
        assert_eq!(task.stop().elapsed_secs(), 1);
    }

    #[test]
    fn test_task_does_not_count_while_paused() {
        let task = StopwatchTask::spawn(Duration::from_millis(5));
        thread::sleep(Duration::from_millis(50));
        assert_eq!(task.snapshot(), Stopwatch::new());
    }

    #[test]
    fn test_no_time_after_stop() {
        let mut task = StopwatchTask::spawn(Duration::from_millis(5));
        task.toggle();
        thread::sleep(Duration::from_millis(50));
        let at_stop = task.stop();

        thread::sleep(Duration::from_millis(50));
        assert_eq!(task.snapshot(), at_stop);
        // stopping twice is harmless
        assert_eq!(task.stop(), at_stop);
    }

    #[test]
    fn test_drop_cancels_and_joins_worker() {
        let shared = {
            let task = StopwatchTask::spawn(Duration::from_millis(5));
            task.toggle();
            thread::sleep(Duration::from_millis(20));
            Arc::clone(&task.clock)
        };

        // the joined worker has released its handle
        assert_eq!(Arc::strong_count(&shared), 1);

        let at_drop = lock(&shared).stopwatch;
        assert!(!at_drop.is_running());
        thread::sleep(Duration::from_millis(50));
        assert_eq!(lock(&shared).sample(), at_drop);
    }
}
