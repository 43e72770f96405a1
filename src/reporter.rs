//! Periodically log the derived client metrics. Hosts that don't ship the
//! registry anywhere else still get a latency summary in their logs.

use std::{ops::Deref, time::Duration};

use crate::{namespace::Namespace, query::client_metrics_data, registry::Registry};

/// Log one event per client metric and return how many were logged.
pub fn report(registry: &Registry, namespace: &Namespace) -> usize {
    let Some(data) = client_metrics_data(Some(registry), namespace) else {
        return 0;
    };
    let mut data: Vec<_> = data.into_values().collect();
    data.sort_unstable_by(|a, b| a.metric_id.cmp(&b.metric_id));
    for metric in &data {
        tracing::info!(
            message = "client metric",
            metric_id = %metric.metric_id,
            count = metric.count,
            mean_ms = metric.mean_millis,
            aggregate_ms = metric.aggregate
        );
    }
    data.len()
}

/// Report client metrics every `period`. Runs until the task is dropped.
///
/// A zero `period` disables reporting and the task returns right away.
pub async fn report_task<R>(registry: R, namespace: Namespace, period: Duration)
where
    R: Deref<Target = Registry>,
{
    if period.is_zero() {
        tracing::warn!(message = "client metrics report period is zero, not reporting");
        return;
    }
    let mut ticker = tokio::time::interval(period);
    loop {
        ticker.tick().await;
        let reported = report(&registry, &namespace);
        tracing::debug!(message = "reported client metrics", metrics = reported);
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::Duration};

    use super::*;
    use crate::{fanout::start_timers, request::RequestDescriptor, DEFAULT_REGISTRY};

    #[test]
    fn report_counts_series() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        let registry = Registry::new();
        let ns = Namespace::default();
        assert_eq!(report(&registry, &ns), 0);

        let request = RequestDescriptor::new("GET", "/widgets");
        start_timers(Some(&registry), &ns, &request, None)
            .unwrap()
            .unwrap()
            .stop();
        registry.timer("not.ours").unwrap();
        assert_eq!(report(&registry, &ns), 2);
    }

    #[tokio::test]
    async fn task_keeps_running() {
        let registry = Arc::new(Registry::new());
        let task = report_task(registry, Namespace::default(), Duration::from_millis(5));
        let res = tokio::time::timeout(Duration::from_millis(30), task).await;
        assert!(res.is_err(), "report task should never return");
    }

    #[tokio::test]
    async fn zero_period_returns() {
        let registry = Arc::new(Registry::new());
        let task = report_task(registry, Namespace::default(), Duration::ZERO);
        let res = tokio::time::timeout(Duration::from_millis(100), task).await;
        assert!(res.is_ok(), "zero period should stop the task, not panic");
    }

    #[tokio::test]
    async fn task_with_static_registry() {
        let namespace = Namespace::new("reporter.tests");
        let handle = tokio::spawn(report_task(
            &*DEFAULT_REGISTRY,
            namespace,
            Duration::from_millis(5),
        ));
        tokio::time::sleep(Duration::from_millis(20)).await;
        handle.abort();
        assert!(handle.await.unwrap_err().is_cancelled());
    }
}
