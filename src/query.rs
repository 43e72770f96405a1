//! Dimension specific lookups over the registry.
//!
//! Every lookup comes in two flavours: the raw timers (`client_metrics*`) and
//! the derived [`ClientMetricData`](crate::ClientMetricData)
//! (`client_metrics_data*`). All of them return `None` when there is no
//! registry, so disabled telemetry never turns into an error for the caller.

use crate::{
    aggregate::{compute_client_metrics_data, MetricDataMap},
    filter::MetricFilter,
    namespace::{MetricKind, Namespace},
    registry::{Registry, TimerMap},
    request::MetricId,
};

fn select(registry: Option<&Registry>, filter: MetricFilter) -> Option<TimerMap> {
    registry.map(|registry| filter.select(registry))
}

fn reduce(timers: Option<TimerMap>) -> Option<MetricDataMap> {
    timers.map(|timers| compute_client_metrics_data(Some(&timers)))
}

/// Every timer under the root namespace.
pub fn client_metrics(registry: Option<&Registry>, namespace: &Namespace) -> Option<TimerMap> {
    select(registry, MetricFilter::all(namespace))
}

pub fn client_metrics_with_url(
    registry: Option<&Registry>,
    namespace: &Namespace,
    url: &str,
    metric: MetricKind,
) -> Option<TimerMap> {
    select(registry, MetricFilter::with_url(namespace, url, metric))
}

pub fn client_metrics_with_url_and_verb(
    registry: Option<&Registry>,
    namespace: &Namespace,
    url: &str,
    verb: &str,
    metric: MetricKind,
) -> Option<TimerMap> {
    select(
        registry,
        MetricFilter::with_url_and_verb(namespace, url, verb, metric),
    )
}

pub fn client_metrics_with_metric_id(
    registry: Option<&Registry>,
    namespace: &Namespace,
    metric_id: &MetricId,
    metric: MetricKind,
) -> Option<TimerMap> {
    select(
        registry,
        MetricFilter::with_metric_id(namespace, metric_id, metric),
    )
}

pub fn client_metrics_data(
    registry: Option<&Registry>,
    namespace: &Namespace,
) -> Option<MetricDataMap> {
    reduce(client_metrics(registry, namespace))
}

pub fn client_metrics_data_with_url(
    registry: Option<&Registry>,
    namespace: &Namespace,
    url: &str,
    metric: MetricKind,
) -> Option<MetricDataMap> {
    reduce(client_metrics_with_url(registry, namespace, url, metric))
}

pub fn client_metrics_data_with_url_and_verb(
    registry: Option<&Registry>,
    namespace: &Namespace,
    url: &str,
    verb: &str,
    metric: MetricKind,
) -> Option<MetricDataMap> {
    reduce(client_metrics_with_url_and_verb(
        registry, namespace, url, verb, metric,
    ))
}

pub fn client_metrics_data_with_metric_id(
    registry: Option<&Registry>,
    namespace: &Namespace,
    metric_id: &MetricId,
    metric: MetricKind,
) -> Option<MetricDataMap> {
    reduce(client_metrics_with_metric_id(
        registry, namespace, metric_id, metric,
    ))
}
