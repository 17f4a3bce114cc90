//! Containers which may be shared between threads without external locking, and which hand each
//! change to a single observer.
//!
//! # What `lockstep` provides
//!
//! * [`SafeMap`], a table from ordered keys to values.
//! * [`SafeSet`], a collection of values found by equality, kept in insertion order.
//! * [`Queue`], a first-in-first-out buffer with blocking [`append()`](Queue::append) and
//!   [`pop()`](Queue::pop), optionally limited in size.
//!
//! Each [`SafeMap`] and [`SafeSet`] guards its contents with one reader/writer lock, so any
//! number of threads may use it through a shared reference (or an [`Arc`](std::sync::Arc)).
//!
//! # Alerts
//!
//! [`SafeMap::insert()`] and [`SafeSet::add()`] do not merely notify: they *hand over* the
//! change, on a channel with no buffer, to whichever thread is receiving from
//! [`SafeMap::alert()`] or [`SafeSet::alert()`], and they do so while still holding the write
//! lock. This means that
//!
//! * each insertion returns only once its alert has been received;
//! * at most one alert per container is ever in flight, so a subscriber which keeps receiving
//!   sees changes in exactly the order they were made;
//! * while an alert waits, every other operation on that container waits too;
//! * if nothing ever receives, the container is blocked forever. There is no timeout.
//!
//! Removals and [`clear()`](SafeMap::clear) send no alerts.
//!
//! ```
//! use std::sync::Arc;
//! use std::thread;
//! use lockstep::SafeMap;
//!
//! let map = Arc::new(SafeMap::new());
//!
//! let alerts = map.alert();
//! let observer = thread::spawn(move || {
//!     alerts.iter().take(3).collect::<Vec<_>>()
//! });
//!
//! map.insert("one", 1).insert("two", 2).insert("three", 3);
//! assert_eq!(
//!     observer.join().unwrap(),
//!     vec![("one", 1), ("two", 2), ("three", 3)],
//! );
//! assert_eq!(map.len(), 3);
//! ```
//!
//! # Features
//!
//! * `"parking_lot"`:
//!   Uses [`parking_lot::RwLock`](https://docs.rs/parking_lot) instead of
//!   [`std::sync::RwLock`] inside [`SafeMap`] and [`SafeSet`].
//!
//! # Logging
//!
//! Mutations are reported at `trace` level through the [`log`](https://docs.rs/log) facade.
//! Recovery from a poisoned lock is reported at `warn` level.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(explicit_outlives_requirements)]
#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![warn(redundant_lifetimes)]
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unnameable_types)]
#![warn(unused_extern_crates)]
#![warn(unused_lifetimes)]
#![warn(unreachable_pub)]
#![warn(clippy::assigning_clones)]
#![warn(clippy::doc_markdown)]
#![warn(clippy::exhaustive_enums)]
#![warn(clippy::exhaustive_structs)]
#![warn(clippy::inconsistent_struct_constructor)]
#![warn(clippy::manual_let_else)]
#![warn(clippy::missing_panics_doc)]
#![warn(clippy::module_name_repetitions)]
#![warn(clippy::pedantic)]
#![warn(clippy::return_self_not_must_use)]
#![warn(clippy::should_panic_without_expect)]
#![warn(clippy::unnecessary_self_imports)]
#![warn(clippy::unnecessary_wraps)]
#![allow(clippy::bool_assert_comparison, reason = "less legible")]
#![allow(clippy::semicolon_if_nothing_returned, reason = "explicit delegation")]

// -------------------------------------------------------------------------------------------------

mod alert;

mod lock;

mod map;
pub use map::SafeMap;

mod queue;
pub use queue::Queue;

mod set;
pub use set::SafeSet;

mod util;

/// Re-exported so that the receiving side of alerts can be named without a separate dependency.
pub use crossbeam_channel::{Receiver, RecvError, RecvTimeoutError, TryRecvError};
