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

/// A collection of values, found by equality, which may be shared between threads and which
/// hands every addition to a single subscriber.
///
/// Despite the name, equal values are not merged: adding the same value twice stores it twice,
/// and [`len()`](Self::len) counts both. Lookup ([`has()`](Self::has)) and removal
/// ([`delete()`](Self::delete)) compare with [`PartialEq`] by scanning every stored value.
///
/// Values are kept in insertion order. Removing a value leaves a gap rather than moving later
/// values, so [`snapshot()`](Self::snapshot) and [`for_each()`](Self::for_each) always visit the
/// remaining values in the order they were added.
///
/// # Alerts
///
/// [`add()`](Self::add) follows the same protocol as [`SafeMap::insert()`](crate::SafeMap::insert):
/// the added value is published on a zero-capacity channel, obtained with
/// [`alert()`](Self::alert), while the write lock is held, so `add()` and every other operation
/// on the set wait until some thread receives it.
///
/// ```
/// use lockstep::SafeSet;
///
/// let set = SafeSet::new();
/// let alerts = set.alert();
/// std::thread::scope(|s| {
///     s.spawn(|| {
///         set.add("x").add("y").add("x");
///     });
///     assert_eq!(alerts.iter().take(3).collect::<Vec<_>>(), ["x", "y", "x"]);
/// });
///
/// set.delete(&"x");
/// assert_eq!(set.snapshot(), ["y", "x"]);
/// ```
///
/// # Generic parameters
///
/// * `T` is the type of the values.
pub struct SafeSet<T> {
    slots: RwLock<Slots<T>>,
    alerts: AlertChannel<T>,
}

/// Values keyed by slot number. Slot numbers only ever increase, so ascending slot order is
/// insertion order; removing a value frees its entry but never renumbers the others.
#[derive(Debug)]
struct Slots<T> {
    values: BTreeMap<usize, T>,
    /// Slot number the next added value will get.
    next: usize,
}

impl<T> Slots<T> {
    fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.values.values()
    }

    fn position(&self, item: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.values
            .iter()
            .find_map(|(&slot, value)| (value == item).then_some(slot))
    }
}

impl<T> SafeSet<T> {
    /// Constructs an empty set with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: RwLock::new(Slots {
                values: BTreeMap::new(),
                next: 0,
            }),
            alerts: AlertChannel::new(),
        }
    }

    /// Stores `item` after all previously added values, then blocks until a subscriber has
    /// received it as an alert.
    ///
    /// The write lock is held for the whole call, including the wait.
    pub fn add(&self, item: T) -> &Self
    where
        T: Clone,
    {
        self.alerts.drain_stale();

        let mut slots = self.slots.write();
        let slot = slots.next;
        slots.values.insert(slot, item.clone());
        slots.next += 1;
        log::trace!("set add; slot {slot}");
        self.alerts.publish(item);
        drop(slots);

        self
    }

    /// Returns a receiver for the alerts published by [`add()`](Self::add).
    ///
    /// Each alert is delivered to exactly one receiver, even if this is called more than once.
    #[must_use]
    pub fn alert(&self) -> Receiver<T> {
        self.alerts.subscribe()
    }

    /// Removes the earliest added value which is equal to `item`, if there is one.
    ///
    /// The search happens under a read lock and the removal under a separate write lock.
    /// If another thread removes the same value in between, this does nothing.
    pub fn delete(&self, item: &T)
    where
        T: PartialEq,
    {
        let Some(slot) = self.slots.read().position(item) else {
            return;
        };

        let removed = self.slots.write().values.remove(&slot).is_some();
        log::trace!("set delete; slot {slot}, removed = {removed}");
    }

    /// Removes every value present when this call began.
    ///
    /// The next slot number is read under a read lock, which is released before the write lock is
    /// taken to empty every slot below it. A value added in between is not removed.
    pub fn clear(&self) {
        let end = self.slots.read().next;
        self.clear_before(end);
    }

    fn clear_before(&self, end: usize) {
        let mut slots = self.slots.write();
        let kept = slots.values.split_off(&end);
        let removed = core::mem::replace(&mut slots.values, kept).len();
        log::trace!("set clear; {removed} removed, {} remain", slots.values.len());
    }

    /// Returns whether any stored value is equal to `item`.
    #[must_use]
    pub fn has(&self, item: &T) -> bool
    where
        T: PartialEq,
    {
        self.slots.read().iter().any(|value| value == item)
    }

    /// Returns the number of stored values, counting equal values separately.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.read().values.len()
    }

    /// Returns whether there are no stored values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns clones of all stored values, in the order they were added.
    #[must_use]
    pub fn snapshot(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.slots.read().iter().cloned().collect()
    }

    /// Calls `visitor` with each stored value, in the order they were added.
    ///
    /// The read lock is held until all values have been visited.
    /// `visitor` may read from this set, but if it tries to modify it, it will deadlock.
    pub fn for_each<F: FnMut(&T)>(&self, visitor: F) {
        self.slots.read().iter().for_each(visitor);
    }
}

impl<T> Default for SafeSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for SafeSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { slots, alerts } = self;
        let mut ds = f.debug_struct("SafeSet");
        match slots.try_read() {
            Some(slots) => ds.field("values", &Values(&slots)),
            None => ds.field("values", &crate::util::Unquote("<locked>")),
        };
        ds.field("alerts", alerts).finish()
    }
}

/// Prints the values of [`Slots`] as a list.
struct Values<'a, T>(&'a Slots<T>);

impl<T: fmt::Debug> fmt::Debug for Values<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

// -------------------------------------------------------------------------------------------------
