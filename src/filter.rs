use crate::{
    namespace::{MetricKind, Namespace},
    registry::{Registry, TimerMap},
    request::MetricId,
};

/// Selects a subset of the registry's timers by name.
///
/// Each variant holds the prefix or the exact name it accepts, computed with
/// the same [`Namespace`] helpers fan-out uses, so a filter always agrees
/// with the names timers were registered under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetricFilter {
    /// Every timer below the root namespace.
    All { prefix: String },
    /// The timer for one URI.
    WithUrl { name: String },
    /// The timer for one URI and verb.
    WithUrlAndVerb { name: String },
    /// The timer for one full metric id.
    WithMetricId { name: String },
}

impl MetricFilter {
    pub fn all(namespace: &Namespace) -> Self {
        Self::All {
            prefix: namespace.prefix(),
        }
    }

    pub fn with_url(namespace: &Namespace, url: &str, metric: MetricKind) -> Self {
        Self::WithUrl {
            name: namespace.url_name(url, metric),
        }
    }

    pub fn with_url_and_verb(
        namespace: &Namespace,
        url: &str,
        verb: &str,
        metric: MetricKind,
    ) -> Self {
        Self::WithUrlAndVerb {
            name: namespace.url_and_verb_name(url, verb, metric),
        }
    }

    pub fn with_metric_id(namespace: &Namespace, metric_id: &MetricId, metric: MetricKind) -> Self {
        Self::WithMetricId {
            name: namespace.metric_id_name(metric_id.segments(), metric),
        }
    }

    pub fn matches(&self, candidate: &str) -> bool {
        match self {
            Self::All { prefix } => candidate.starts_with(prefix.as_str()),
            Self::WithUrl { name } | Self::WithUrlAndVerb { name } | Self::WithMetricId { name } => {
                candidate == name.as_str()
            }
        }
    }

    /// Apply the filter to every timer in `registry`.
    pub fn select(&self, registry: &Registry) -> TimerMap {
        registry.timers(|name| self.matches(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ns() -> Namespace {
        Namespace::new("root")
    }

    #[test]
    fn all() {
        let filter = MetricFilter::all(&ns());
        assert!(filter.matches("root.with-url./a.bytes-read"));
        assert!(filter.matches("root.with-metric-id.svc.bytes-read"));
        assert!(!filter.matches("root"));
        assert!(!filter.matches("rootless.with-url./a.bytes-read"));
        assert!(!filter.matches("other.with-url./a.bytes-read"));
    }

    #[test]
    fn url_exclusive() {
        let filter = MetricFilter::with_url(&ns(), "/widgets", MetricKind::BytesRead);
        assert!(filter.matches("root.with-url./widgets.bytes-read"));
        assert!(!filter.matches("root.with-url./widgets/extra.bytes-read"));
        assert!(!filter.matches("root.with-url./widgets.GET.bytes-read"));
        assert!(!filter.matches("root.with-url./widget.bytes-read"));
    }

    #[test]
    fn url_and_verb() {
        let filter =
            MetricFilter::with_url_and_verb(&ns(), "/widgets", "GET", MetricKind::BytesRead);
        assert!(filter.matches("root.with-url./widgets.GET.bytes-read"));
        assert!(!filter.matches("root.with-url./widgets.POST.bytes-read"));
        assert!(!filter.matches("root.with-url./widgets.bytes-read"));
    }

    #[test]
    fn metric_id_is_exact() {
        let id = MetricId::new(["svc", "op"]);
        let filter = MetricFilter::with_metric_id(&ns(), &id, MetricKind::BytesRead);
        assert!(filter.matches("root.with-metric-id.svc.op.bytes-read"));
        assert!(!filter.matches("root.with-metric-id.svc.bytes-read"));
        assert!(!filter.matches("root.with-metric-id.op.svc.bytes-read"));
    }

    #[test]
    fn agrees_with_namespace() {
        let ns = ns();
        let id = MetricId::new(["a", "b"]);
        let cases = [
            (
                MetricFilter::with_url(&ns, "/x", MetricKind::BytesRead),
                ns.url_name("/x", MetricKind::BytesRead),
            ),
            (
                MetricFilter::with_url_and_verb(&ns, "/x", "PUT", MetricKind::BytesRead),
                ns.url_and_verb_name("/x", "PUT", MetricKind::BytesRead),
            ),
            (
                MetricFilter::with_metric_id(&ns, &id, MetricKind::BytesRead),
                ns.metric_id_name(["a", "b"], MetricKind::BytesRead),
            ),
        ];
        for (filter, name) in cases {
            assert!(filter.matches(&name), "{filter:?} should match {name}");
            assert!(MetricFilter::all(&ns).matches(&name));
        }
    }

    #[test]
    fn select() {
        let ns = ns();
        let registry = Registry::new();
        registry.timer(&ns.url_name("/a", MetricKind::BytesRead)).unwrap();
        registry.timer(&ns.url_name("/b", MetricKind::BytesRead)).unwrap();
        registry.timer("unrelated.metric").unwrap();

        assert_eq!(MetricFilter::all(&ns).select(&registry).len(), 2);
        let selected = MetricFilter::with_url(&ns, "/a", MetricKind::BytesRead).select(&registry);
        assert_eq!(selected.len(), 1);
        assert!(selected.contains_key("root.with-url./a.bytes-read"));
    }
}
