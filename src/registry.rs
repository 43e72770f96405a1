use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        LazyLock,
    },
};

use dashmap::{mapref::entry::Entry, DashMap};
use thiserror::Error;

use crate::{metrics::timer::Timer, utils::BuildNameHasher};

pub static DEFAULT_REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

/// A selection of timers keyed by their full metric name.
pub type TimerMap = HashMap<String, Timer>;

/// An error raised by the registry while resolving a timer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("timer registry is full ({capacity} timers), refusing to register {name:?}")]
    CapacityExceeded { name: String, capacity: usize },
}

/// A name to [`Timer`] map shared by every thread issuing requests.
///
/// Timers are created on first use and live as long as the registry. The
/// map is sharded, so lookups of already registered names only contend with
/// writers touching the same shard.
#[derive(Debug)]
pub struct Registry {
    timers: DashMap<String, Timer, BuildNameHasher>,
    len: AtomicUsize,
    max_timers: Option<usize>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    pub fn new() -> Self {
        Self {
            timers: DashMap::with_hasher(BuildNameHasher),
            len: AtomicUsize::new(0),
            max_timers: None,
        }
    }

    /// Create a registry that refuses to hold more than `max_timers` distinct
    /// names. Names that already exist keep resolving once the limit is hit.
    pub fn with_max_timers(max_timers: usize) -> Self {
        Self {
            max_timers: Some(max_timers),
            ..Self::new()
        }
    }

    /// Fetch the timer registered under `name`, creating it if this is the
    /// first time we've seen the name. Concurrent first access from several
    /// threads always resolves to the same timer.
    pub fn timer(&self, name: &str) -> Result<Timer, RegistryError> {
        if let Some(timer) = self.timers.get(name) {
            return Ok(timer.clone());
        }
        // NOTE: the vacant entry holds the shard write lock, so only one
        // caller can ever observe `Vacant` for a given name.
        match self.timers.entry(name.to_owned()) {
            Entry::Occupied(entry) => Ok(entry.get().clone()),
            Entry::Vacant(entry) => {
                self.reserve(name)?;
                let timer = Timer::default();
                entry.insert(timer.clone());
                tracing::debug!(message = "registered timer", name = name);
                Ok(timer)
            }
        }
    }

    /// Lookup a timer without creating it.
    pub fn get(&self, name: &str) -> Option<Timer> {
        self.timers.get(name).map(|timer| timer.clone())
    }

    /// Select every timer whose name satisfies `predicate`. The returned map
    /// is a copy of the handles, so later registrations don't show up in it.
    pub fn timers<F>(&self, predicate: F) -> TimerMap
    where
        F: Fn(&str) -> bool,
    {
        self.timers
            .iter()
            .filter(|entry| predicate(entry.key()))
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.len.load(Ordering::Acquire)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn reserve(&self, name: &str) -> Result<(), RegistryError> {
        let Some(capacity) = self.max_timers else {
            self.len.fetch_add(1, Ordering::AcqRel);
            return Ok(());
        };
        self.len
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |len| {
                (len < capacity).then_some(len + 1)
            })
            .map(|_| ())
            .map_err(|_| {
                tracing::warn!(
                    message = "timer registry is full",
                    name = name,
                    capacity = capacity
                );
                RegistryError::CapacityExceeded {
                    name: name.to_owned(),
                    capacity,
                }
            })
    }
}
