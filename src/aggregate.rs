use std::collections::HashMap;

use serde::Serialize;

use crate::registry::TimerMap;

const NANOS_PER_MILLI: u128 = 1_000_000;

/// Derived statistics for one timer, keyed by `metric_id` (the full metric
/// name).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ClientMetricData {
    pub metric_id: String,
    pub count: u64,
    pub mean_millis: u64,
    pub aggregate: u64,
}

pub type MetricDataMap = HashMap<String, ClientMetricData>;

/// Reduce a selection of timers into [`ClientMetricData`].
///
/// The mean is truncated twice: first to whole nanoseconds, then to whole
/// milliseconds. A series with a 1.999999ms mean reports 1ms, and its
/// aggregate is `count * 1`. `None` yields an empty map.
pub fn compute_client_metrics_data(timers: Option<&TimerMap>) -> MetricDataMap {
    let Some(timers) = timers else {
        return MetricDataMap::new();
    };
    timers
        .iter()
        .map(|(name, timer)| {
            let snapshot = timer.snapshot();
            let mean_millis = snapshot.mean_nanos_floor() / NANOS_PER_MILLI;
            let mean_millis = u64::try_from(mean_millis).unwrap_or(u64::MAX);
            let data = ClientMetricData {
                metric_id: name.clone(),
                count: snapshot.count,
                mean_millis,
                aggregate: snapshot.count.saturating_mul(mean_millis),
            };
            (name.clone(), data)
        })
        .collect()
}
