//! Keyed query cache with stale-while-revalidate.
//!
//! A [`Query`] tracks one logical request whose parameters change over
//! time. Every parameter tuple is a key. Responses are cached per key and
//! only the response for the currently active key is displayed; responses
//! for superseded keys are cached but never shown.

use std::collections::{HashMap, HashSet, VecDeque};
use std::hash::Hash;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Cache policy of a [`Query`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryPolicy {
    /// How long a cached response counts as fresh.
    pub stale_after: Duration,
    /// Maximum number of cached responses.
    pub capacity: usize,
    /// Keep showing the previous key's data while a new key loads.
    pub keep_previous: bool,
}

#[derive(Debug)]
struct Entry<V> {
    value: Arc<V>,
    fetched_at: Instant,
}

/// Query state for one data source.
#[derive(Debug)]
pub struct Query<K, V> {
    policy: QueryPolicy,
    entries: HashMap<K, Entry<V>>,
    /// Insertion order, oldest first.
    order: VecDeque<K>,
    in_flight: HashSet<K>,
    active: Option<K>,
    displayed: Option<(K, Arc<V>)>,
    error: Option<(K, String)>,
}

impl<K, V> Query<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Creates an empty, disabled query.
    #[must_use]
    pub fn new(policy: QueryPolicy) -> Self {
        Self {
            policy,
            entries: HashMap::new(),
            order: VecDeque::new(),
            in_flight: HashSet::new(),
            active: None,
            displayed: None,
            error: None,
        }
    }

    /// Active key, `None` while the query is disabled.
    #[must_use]
    pub const fn active(&self) -> Option<&K> {
        self.active.as_ref()
    }

    /// Makes `key` the active key.
    ///
    /// Returns the key to fetch when the caller must start a request:
    /// the key is neither in flight nor cached fresh. A stale cached
    /// response is displayed immediately and revalidated in the background.
    pub fn set_key(&mut self, key: Option<K>, now: Instant) -> Option<K> {
        if self.active == key {
            return None;
        }
        self.active.clone_from(&key);

        let Some(key) = key else {
            self.displayed = None;
            return None;
        };

        if let Some(entry) = self.entries.get(&key) {
            self.displayed = Some((key.clone(), Arc::clone(&entry.value)));
            if now.saturating_duration_since(entry.fetched_at) < self.policy.stale_after {
                return None;
            }
        } else if !self.policy.keep_previous {
            self.displayed = None;
        }

        self.start(key)
    }

    /// Re-requests the active key if its last request failed.
    pub fn retry_failed(&mut self) -> Option<K> {
        let active = self.active.clone()?;
        if !self.error.as_ref().is_some_and(|(k, _)| *k == active) {
            return None;
        }
        self.error = None;
        self.start(active)
    }

    /// Marks `key` in flight unless it already is.
    fn start(&mut self, key: K) -> Option<K> {
        if self.in_flight.insert(key.clone()) {
            Some(key)
        } else {
            None
        }
    }

    /// Records a completed request. Returns `true` if it changed what is
    /// displayed (the key is still active).
    pub fn resolve(&mut self, key: K, result: Result<V, String>, now: Instant) -> bool {
        self.in_flight.remove(&key);
        let is_active = self.active.as_ref() == Some(&key);

        match result {
            Ok(value) => {
                let value = Arc::new(value);
                self.insert(key.clone(), Arc::clone(&value), now);
                if is_active {
                    if self.error.as_ref().is_some_and(|(k, _)| *k == key) {
                        self.error = None;
                    }
                    self.displayed = Some((key, value));
                }
                is_active
            }
            Err(message) => {
                if !is_active {
                    return false;
                }
                if self.displayed.as_ref().is_some_and(|(k, _)| *k != key) {
                    self.displayed = None;
                }
                self.error = Some((key, message));
                true
            }
        }
    }

    fn insert(&mut self, key: K, value: Arc<V>, now: Instant) {
        if self.entries.contains_key(&key) {
            self.order.retain(|k| *k != key);
        }
        self.order.push_back(key.clone());
        self.entries.insert(
            key,
            Entry {
                value,
                fetched_at: now,
            },
        );

        while self.entries.len() > self.policy.capacity.max(1) {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            if self.active.as_ref() == Some(&oldest) {
                // Never evict the active key; requeue and stop.
                self.order.push_back(oldest);
                if self.order.len() <= 1 {
                    break;
                }
                continue;
            }
            self.entries.remove(&oldest);
        }
    }

    /// Data to render: the active key's data, or with `keep_previous` the
    /// last displayed data while the active key loads.
    #[must_use]
    pub fn data(&self) -> Option<&V> {
        let (key, value) = self.displayed.as_ref()?;
        if self.policy.keep_previous || self.active.as_ref() == Some(key) {
            Some(value)
        } else {
            None
        }
    }

    /// Whether the rendered data belongs to a superseded key.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.displayed
            .as_ref()
            .is_some_and(|(k, _)| self.active.as_ref() != Some(k))
    }

    /// Active key is being fetched.
    #[must_use]
    pub fn is_fetching(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|k| self.in_flight.contains(k))
    }

    /// Active key is being fetched and nothing can be shown meanwhile.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.is_fetching() && self.data().is_none()
    }

    /// Last request for the active key failed.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.error_message().is_some()
    }

    /// Failure message for the active key.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        let (key, message) = self.error.as_ref()?;
        (self.active.as_ref() == Some(key)).then_some(message.as_str())
    }

    /// Number of cached responses.
    #[cfg(test)]
    pub fn cached_len(&self) -> usize {
        self.entries.len()
    }
}
