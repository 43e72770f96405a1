//! Construction of the dotted metric names shared by fan-out and filtering.
//!
//! A metric name is laid out as
//! `<root>.<kind-tag>.<segment>[.<segment>...].<metric-kind>`, for example
//! `puppetlabs.http-client.experimental.with-url./widgets.GET.bytes-read`.
//! Every name the crate creates or looks for goes through [`Namespace::name`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// The root namespace used when the host doesn't configure one.
pub const DEFAULT_NAMESPACE: &str = "puppetlabs.http-client.experimental";

const DELIMITER: char = '.';

/// Which dimension a metric name is grouped by.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum NamespaceKind {
    /// Grouped by request URI, optionally followed by the verb.
    WithUrl,
    /// Grouped by a caller supplied [`crate::MetricId`] prefix.
    WithMetricId,
}

impl NamespaceKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::WithUrl => "with-url",
            Self::WithMetricId => "with-metric-id",
        }
    }
}

impl fmt::Display for NamespaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a timer measures. Only the time spent reading a response exists.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MetricKind {
    #[default]
    BytesRead,
}

impl MetricKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::BytesRead => "bytes-read",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The root namespace all client metrics live under. Built once by the host
/// and passed to every fan-out and query call.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Namespace {
    root: String,
}

impl Default for Namespace {
    fn default() -> Self {
        Self::new(DEFAULT_NAMESPACE)
    }
}

impl Namespace {
    pub fn new(root: impl Into<String>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    /// The prefix shared by every name in this namespace, including the
    /// trailing delimiter.
    pub fn prefix(&self) -> String {
        let mut prefix = String::with_capacity(self.root.len() + 1);
        prefix.push_str(&self.root);
        prefix.push(DELIMITER);
        prefix
    }

    /// Build a metric name. Segments keep the order they are given in, and
    /// empty segments are skipped so they never produce `..` in a name.
    pub fn name<I, S>(&self, kind: NamespaceKind, segments: I, metric: MetricKind) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut name = self.prefix();
        name.push_str(kind.as_str());
        for segment in segments {
            let segment = segment.as_ref();
            if segment.is_empty() {
                continue;
            }
            name.push(DELIMITER);
            name.push_str(segment);
        }
        name.push(DELIMITER);
        name.push_str(metric.as_str());
        name
    }

    /// `<root>.with-url.<uri>.<metric>`
    pub fn url_name(&self, uri: &str, metric: MetricKind) -> String {
        self.name(NamespaceKind::WithUrl, [uri], metric)
    }

    /// `<root>.with-url.<uri>.<verb>.<metric>`
    pub fn url_and_verb_name(&self, uri: &str, verb: &str, metric: MetricKind) -> String {
        self.name(NamespaceKind::WithUrl, [uri, verb], metric)
    }

    /// `<root>.with-metric-id.<seg1>[.<seg2>...].<metric>`
    pub fn metric_id_name<I, S>(&self, segments: I, metric: MetricKind) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.name(NamespaceKind::WithMetricId, segments, metric)
    }

    /// Returns true if `name` lives strictly below the root namespace.
    pub fn contains(&self, name: &str) -> bool {
        name.strip_prefix(self.root.as_str())
            .and_then(|rest| rest.strip_prefix(DELIMITER))
            .is_some()
    }
}
