//! Hierarchical request timing for HTTP clients.
//!
//! Every outbound request starts a small family of timers, one per dimension
//! we want to slice latency by:
//!
//! - `<root>.with-url.<uri>.bytes-read`
//! - `<root>.with-url.<uri>.<verb>.bytes-read`
//! - `<root>.with-metric-id.<seg1>[.<seg2>...].bytes-read`, one per prefix of
//!   the caller supplied [`MetricId`]
//!
//! The timers are stopped together once the response has been read, and the
//! [`query`] functions later reduce them into [`ClientMetricData`].
//!
//! ```
//! use request_metrics::{
//!     client_metrics_data_with_url, start_timers, MetricId, MetricKind, Namespace, Registry,
//!     RequestDescriptor,
//! };
//!
//! let registry = Registry::new();
//! let namespace = Namespace::default();
//! let request = RequestDescriptor::new("GET", "/widgets");
//! let id = MetricId::new(["inventory", "list"]);
//!
//! if let Some(timers) = start_timers(Some(&registry), &namespace, &request, Some(&id))? {
//!     // ... send the request and read the body ...
//!     timers.stop();
//! }
//!
//! let data = client_metrics_data_with_url(
//!     Some(&registry),
//!     &namespace,
//!     "/widgets",
//!     MetricKind::BytesRead,
//! )
//! .unwrap_or_default();
//! assert_eq!(data.len(), 1);
//! # Ok::<(), request_metrics::RegistryError>(())
//! ```
//!
//! Passing `None` instead of a registry turns every call into a no-op that
//! returns `None`, which is how hosts disable telemetry.

mod aggregate;
mod config;
mod fanout;
mod filter;
mod metrics;
mod namespace;
pub mod query;
mod registry;
mod reporter;
mod request;
mod utils;

pub use aggregate::{compute_client_metrics_data, ClientMetricData, MetricDataMap};
pub use config::Config;
pub use fanout::{start_timers, TimerGroup};
pub use filter::MetricFilter;
pub use metrics::{
    timer::{RunningTimer, Timer},
    TimerSnapshot,
};
pub use namespace::{MetricKind, Namespace, NamespaceKind, DEFAULT_NAMESPACE};
pub use query::{
    client_metrics, client_metrics_data, client_metrics_data_with_metric_id,
    client_metrics_data_with_url, client_metrics_data_with_url_and_verb,
    client_metrics_with_metric_id, client_metrics_with_url, client_metrics_with_url_and_verb,
};
pub use registry::{Registry, RegistryError, TimerMap, DEFAULT_REGISTRY};
pub use reporter::{report, report_task};
pub use request::{MetricId, RequestDescriptor, RequestLine};
