use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{
    namespace::{Namespace, DEFAULT_NAMESPACE},
    registry::Registry,
};

const fn default_enabled() -> bool {
    true
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_owned()
}

/// Settings for request timing, usually read from the host's config file.
#[derive(Clone, Debug, Serialize, Deserialize, Eq, PartialEq)]
pub struct Config {
    /// When false no registry is created and every timing call is a no-op.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Root namespace all metric names are created under.
    #[serde(default = "default_namespace")]
    pub namespace: String,
    /// Upper bound on distinct timer names, unbounded when unset.
    #[serde(default)]
    pub max_timers: Option<usize>,
    /// How often the reporter logs client metrics. No reporting when unset.
    #[serde(default)]
    pub report_interval_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            namespace: default_namespace(),
            max_timers: None,
            report_interval_secs: None,
        }
    }
}

impl Config {
    pub fn namespace(&self) -> Namespace {
        Namespace::new(self.namespace.as_str())
    }

    /// Build the registry described by this config, `None` when disabled.
    pub fn registry(&self) -> Option<Registry> {
        if !self.enabled {
            return None;
        }
        Some(match self.max_timers {
            Some(max_timers) => Registry::with_max_timers(max_timers),
            None => Registry::new(),
        })
    }

    pub fn report_interval(&self) -> Option<Duration> {
        self.report_interval_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}
