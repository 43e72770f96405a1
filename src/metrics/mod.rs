use std::time::Duration;

pub(crate) mod timer;

/// A point-in-time view of a [`timer::Timer`]. Every field is read under the
/// same lock, so `count` always agrees with `sum_nanos`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct TimerSnapshot {
    pub count: u64,
    pub sum_nanos: u128,
    pub min: Option<Duration>,
    pub max: Option<Duration>,
}

impl TimerSnapshot {
    /// Running mean in nanoseconds. An empty series has a mean of zero.
    pub fn mean_nanos(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.sum_nanos as f64 / self.count as f64
    }

    /// Running mean in whole nanoseconds, truncated. Exact for any sum, unlike
    /// [`TimerSnapshot::mean_nanos`] which loses precision above 2^53ns.
    pub fn mean_nanos_floor(&self) -> u128 {
        match self.count {
            0 => 0,
            count => self.sum_nanos / u128::from(count),
        }
    }

    /// Total recorded time, saturating at [`Duration::MAX`].
    pub fn sum(&self) -> Duration {
        let secs = self.sum_nanos / 1_000_000_000;
        let nanos = (self.sum_nanos % 1_000_000_000) as u32;
        match u64::try_from(secs) {
            Ok(secs) => Duration::new(secs, nanos),
            Err(_) => Duration::MAX,
        }
    }
}
