use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use parking_lot::Mutex;

use super::TimerSnapshot;

#[derive(Debug, Default)]
struct TimerInner {
    count: u64,
    sum_nanos: u128,
    min: Option<Duration>,
    max: Option<Duration>,
}

impl TimerInner {
    fn record(&mut self, value: Duration) {
        self.count += 1;
        self.sum_nanos += value.as_nanos();
        if self.min.map_or(true, |min| value < min) {
            self.min = Some(value);
        }
        if self.max.map_or(true, |max| value > max) {
            self.max = Some(value);
        }
    }

    fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            count: self.count,
            sum_nanos: self.sum_nanos,
            min: self.min,
            max: self.max,
        }
    }
}

/// A threadsafe accumulator of elapsed durations. Clones share the same
/// underlying state, so a timer fetched from the registry twice records into
/// the same series.
#[derive(Default, Clone, Debug)]
pub struct Timer {
    inner: Arc<Mutex<TimerInner>>,
}

impl Timer {
    /// Begin a measurement against this timer. The sample is committed when
    /// the returned handle is stopped or dropped.
    pub fn start(&self) -> RunningTimer {
        RunningTimer {
            timer: self.clone(),
            started: Some(Instant::now()),
        }
    }

    pub fn record(&self, value: Duration) {
        self.inner.lock().record(value);
    }

    pub fn count(&self) -> u64 {
        self.inner.lock().count
    }

    /// Mean of all recorded samples in nanoseconds, `0.0` when empty.
    pub fn mean_nanos(&self) -> f64 {
        self.snapshot().mean_nanos()
    }

    /// Read count, sum and extremes under a single lock acquisition.
    pub fn snapshot(&self) -> TimerSnapshot {
        self.inner.lock().snapshot()
    }

    /// Returns true if both handles point at the same accumulator.
    pub fn same_series(&self, other: &Timer) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

/// An in-flight measurement against a single [`Timer`].
///
/// [`RunningTimer::stop`] consumes the handle, so a sample can only be
/// committed once. A handle that goes out of scope without being stopped
/// commits on drop, which keeps early returns and unwinding from silently
/// undercounting.
#[must_use = "a running timer records its sample when it is stopped or dropped"]
#[derive(Debug)]
pub struct RunningTimer {
    timer: Timer,
    started: Option<Instant>,
}

impl RunningTimer {
    /// Time elapsed since the measurement began.
    pub fn elapsed(&self) -> Duration {
        self.started.map(|s| s.elapsed()).unwrap_or_default()
    }

    /// Stop the measurement and commit the elapsed time as a sample.
    pub fn stop(mut self) -> Duration {
        self.commit()
    }

    fn commit(&mut self) -> Duration {
        match self.started.take() {
            Some(started) => {
                let elapsed = started.elapsed();
                self.timer.record(elapsed);
                elapsed
            }
            None => Duration::ZERO,
        }
    }
}

impl Drop for RunningTimer {
    fn drop(&mut self) {
        self.commit();
    }
}
