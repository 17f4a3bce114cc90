use core::fmt;

/// Wrapper around [`std::sync::RwLock`] or `parking_lot::RwLock` depending on whether
/// the `parking_lot` feature is enabled.
///
/// Poisoning is not reported; a poisoned lock is recovered and used as-is.
/// Container tables are never left half-updated by a panic, because every mutation is a single
/// call on the inner collection.
///
/// # Caution!
///
/// * This is not reentrant. Locking it again from the thread that holds the write lock
///   deadlocks (or panics, for `std`).
pub(crate) struct RwLock<T: ?Sized>(InnerRwLock<T>);

pub(crate) type RwLockReadGuard<'a, T> = InnerRwLockReadGuard<'a, T>;
pub(crate) type RwLockWriteGuard<'a, T> = InnerRwLockWriteGuard<'a, T>;

cfg_if::cfg_if! {
    if #[cfg(feature = "parking_lot")] {
        type InnerRwLock<T> = parking_lot::RwLock<T>;
        type InnerRwLockReadGuard<'a, T> = parking_lot::RwLockReadGuard<'a, T>;
        type InnerRwLockWriteGuard<'a, T> = parking_lot::RwLockWriteGuard<'a, T>;
    } else {
        type InnerRwLock<T> = std::sync::RwLock<T>;
        type InnerRwLockReadGuard<'a, T> = std::sync::RwLockReadGuard<'a, T>;
        type InnerRwLockWriteGuard<'a, T> = std::sync::RwLockWriteGuard<'a, T>;
    }
}

impl<T> RwLock<T> {
    pub(crate) const fn new(value: T) -> Self {
        Self(InnerRwLock::new(value))
    }
}

impl<T: ?Sized> RwLock<T> {
    pub(crate) fn read(&self) -> RwLockReadGuard<'_, T> {
        cfg_if::cfg_if! {
            if #[cfg(feature = "parking_lot")] {
                self.0.read()
            } else {
                self.0.read().unwrap_or_else(|e| {
                    log::warn!("recovering read access to a poisoned lock");
                    e.into_inner()
                })
            }
        }
    }

    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, T> {
        cfg_if::cfg_if! {
            if #[cfg(feature = "parking_lot")] {
                self.0.write()
            } else {
                self.0.write().unwrap_or_else(|e| {
                    log::warn!("recovering write access to a poisoned lock");
                    e.into_inner()
                })
            }
        }
    }

    /// Returns [`None`] if the lock is currently held for writing.
    pub(crate) fn try_read(&self) -> Option<RwLockReadGuard<'_, T>> {
        cfg_if::cfg_if! {
            if #[cfg(feature = "parking_lot")] {
                self.0.try_read()
            } else {
                use std::sync::TryLockError as E;
                match self.0.try_read() {
                    Ok(guard) => Some(guard),
                    Err(E::Poisoned(pe)) => Some(pe.into_inner()),
                    Err(E::WouldBlock) => None,
                }
            }
        }
    }
}

impl<T: ?Sized + fmt::Debug> fmt::Debug for RwLock<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.try_read() {
            Some(guard) => fmt::Debug::fmt(&*guard, f),
            None => fmt::Debug::fmt(&crate::util::Unquote("<locked>"), f),
        }
    }
}

// -------------------------------------------------------------------------------------------------
