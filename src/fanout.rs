use smallvec::SmallVec;

use crate::{
    metrics::timer::RunningTimer,
    namespace::{MetricKind, Namespace},
    registry::{Registry, RegistryError},
    request::{MetricId, RequestLine},
};

/// Every timer started for one request. The handles are stopped together,
/// either explicitly with [`TimerGroup::stop`] or when the group is dropped.
#[must_use = "request timers record their samples when stopped or dropped"]
#[derive(Debug, Default)]
pub struct TimerGroup {
    names: SmallVec<[String; 4]>,
    timers: SmallVec<[RunningTimer; 4]>,
}

impl TimerGroup {
    fn push(&mut self, name: String, timer: RunningTimer) {
        self.names.push(name);
        self.timers.push(timer);
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Names of the started timers, in the order they were started.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.names.iter().map(String::as_str)
    }

    /// Stop every handle in the group, committing one sample per timer.
    pub fn stop(self) {
        for timer in self.timers {
            timer.stop();
        }
    }
}

/// Start the bytes-read timers for a single request.
///
/// Two timers are always started, one keyed by the URI and one by the URI
/// and verb. When `metric_id` is given, one more timer is started for every
/// prefix of the id, shortest first, so `[svc, op]` is visible both at the
/// `svc` and the `svc.op` level.
///
/// Empty segments are dropped from names, so an empty verb or an id such as
/// `[a, ""]` resolves two handles to the same timer. Each of those handles
/// still commits its own sample, and that timer records twice per request.
///
/// Returns `Ok(None)` when there is no registry, meaning telemetry is
/// disabled. Registry failures are returned as-is; any timers already
/// started when one happens are committed as the partial group drops.
pub fn start_timers<R>(
    registry: Option<&Registry>,
    namespace: &Namespace,
    request: &R,
    metric_id: Option<&MetricId>,
) -> Result<Option<TimerGroup>, RegistryError>
where
    R: RequestLine + ?Sized,
{
    let Some(registry) = registry else {
        return Ok(None);
    };
    let uri = request.uri();
    let method = request.method();
    let metric = MetricKind::BytesRead;

    let mut group = TimerGroup::default();
    for name in [
        namespace.url_name(&uri, metric),
        namespace.url_and_verb_name(&uri, &method, metric),
    ] {
        let timer = registry.timer(&name)?.start();
        group.push(name, timer);
    }
    if let Some(metric_id) = metric_id {
        for prefix in metric_id.prefixes() {
            let name = namespace.metric_id_name(prefix, metric);
            let timer = registry.timer(&name)?.start();
            group.push(name, timer);
        }
    }

    tracing::trace!(
        message = "started request timers",
        uri = %uri,
        method = %method,
        timers = group.len()
    );
    Ok(Some(group))
}
