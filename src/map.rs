#![allow(
    clippy::module_name_repetitions,
    reason = "false positive on private module; TODO: remove after Rust 1.84 is released"
)]

use core::fmt;
use std::collections::BTreeMap;

use crossbeam_channel::Receiver;

use crate::alert::AlertChannel;
use crate::lock::RwLock;

// -------------------------------------------------------------------------------------------------

/// A key-value table which may be shared between threads and which hands every insertion to a
/// single subscriber.
///
/// All access goes through one reader/writer lock. Reads may proceed concurrently;
/// [`insert()`](Self::insert), [`delete()`](Self::delete) and [`clear()`](Self::clear) take the
/// lock exclusively.
///
/// # Alerts
///
/// Every [`insert()`](Self::insert) publishes the inserted `(key, value)` pair on a
/// zero-capacity channel, obtained with [`alert()`](Self::alert), *while it still holds the
/// write lock*. Therefore:
///
/// * `insert()` does not return until some thread has received its alert.
/// * Until then, every other operation on the same map waits too.
/// * A subscriber which keeps receiving sees insertions in exactly the order they were applied.
///
/// If no thread ever receives, the map is stuck forever. Callers which do not care about alerts
/// must still arrange for a thread to drain them.
///
/// ```
/// use lockstep::SafeMap;
///
/// let map = SafeMap::new();
/// let alerts = map.alert();
/// std::thread::scope(|s| {
///     s.spawn(|| {
///         map.insert("a", 1).insert("b", 2);
///     });
///     assert_eq!(alerts.recv(), Ok(("a", 1)));
///     assert_eq!(alerts.recv(), Ok(("b", 2)));
/// });
/// assert_eq!(map.get(&"b"), Some(2));
/// ```
///
/// # Generic parameters
///
/// * `K` is the key type.
/// * `T` is the value type.
pub struct SafeMap<K, T> {
    data: RwLock<BTreeMap<K, T>>,
    alerts: AlertChannel<(K, T)>,
}

impl<K: Ord, T> SafeMap<K, T> {
    /// Constructs an empty map with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            data: RwLock::new(BTreeMap::new()),
            alerts: AlertChannel::new(),
        }
    }

    /// Returns a clone of the value stored under `key`, if any.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<T>
    where
        T: Clone,
    {
        self.data.read().get(key).cloned()
    }

    /// Returns whether a value is stored under `key`.
    #[must_use]
    pub fn has(&self, key: &K) -> bool {
        self.data.read().contains_key(key)
    }

    /// Stores `value` under `key`, replacing any previous value, then blocks until a subscriber
    /// has received the `(key, value)` alert.
    ///
    /// The write lock is held for the whole call, including the wait.
    /// See [the type documentation](Self#alerts).
    pub fn insert(&self, key: K, value: T) -> &Self
    where
        K: Clone,
        T: Clone,
    {
        self.alerts.drain_stale();

        let mut data = self.data.write();
        data.insert(key.clone(), value.clone());
        log::trace!("map insert; {} entries", data.len());
        self.alerts.publish((key, value));
        drop(data);

        self
    }

    /// Returns a receiver for the alerts published by [`insert()`](Self::insert).
    ///
    /// Each alert is delivered to exactly one receiver, even if this is called more than once.
    #[must_use]
    pub fn alert(&self) -> Receiver<(K, T)> {
        self.alerts.subscribe()
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// Returns whether there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }

    /// Removes the entry for `key`, if there is one. No alert is sent.
    pub fn delete(&self, key: &K) {
        let removed = self.data.write().remove(key).is_some();
        log::trace!("map delete; removed = {removed}");
    }

    /// Returns a copy of all entries.
    #[must_use]
    pub fn snapshot(&self) -> BTreeMap<K, T>
    where
        K: Clone,
        T: Clone,
    {
        self.data.read().clone()
    }

    /// Removes every entry present when this call began.
    ///
    /// The keys are collected under a read lock, which is released before the write lock is
    /// taken to remove them. An entry inserted in between is not removed.
    pub fn clear(&self)
    where
        K: Clone,
    {
        let keys = self.keys();
        self.remove_all(&keys);
    }

    fn remove_all(&self, keys: &[K]) {
        let mut data = self.data.write();
        for key in keys {
            data.remove(key);
        }
        log::trace!("map clear; {} keys removed, {} remain", keys.len(), data.len());
    }

    fn keys(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.data.read().keys().cloned().collect()
    }
}

impl<K: Ord, T> Default for SafeMap<K, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, T: fmt::Debug> fmt::Debug for SafeMap<K, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { data, alerts } = self;
        // `data` prints as `<locked>` rather than waiting while an insertion is pending.
        f.debug_struct("SafeMap")
            .field("data", data)
            .field("alerts", alerts)
            .finish()
    }
}

// -------------------------------------------------------------------------------------------------
