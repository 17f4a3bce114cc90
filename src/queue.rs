use core::fmt;

use crossbeam_channel::{Receiver, Sender};

/// A first-in-first-out queue which may be shared between threads.
///
/// There are exactly two operations, both of which may block:
/// [`append()`](Self::append) waits for free capacity, and [`pop()`](Self::pop) waits for an
/// item. There is no way to close the queue; a `pop()` on a queue which nothing will ever
/// append to blocks forever.
///
/// ```
/// use lockstep::Queue;
///
/// let queue = Queue::with_limit(2);
/// queue.append('a');
/// queue.append('b');
/// assert_eq!(queue.pop(), 'a');
/// assert_eq!(queue.pop(), 'b');
/// ```
pub struct Queue<T> {
    sender: Sender<T>,
    /// Also keeps the channel connected so `append()` and `pop()` can never fail.
    receiver: Receiver<T>,
}

impl<T> Queue<T> {
    /// Constructs a queue with no capacity limit. [`append()`](Self::append) never blocks.
    #[must_use]
    pub fn new() -> Self {
        let (sender, receiver) = crossbeam_channel::unbounded();
        Self { sender, receiver }
    }

    /// Constructs a queue which holds at most `limit` items.
    ///
    /// With a `limit` of zero, every [`append()`](Self::append) waits for a matching
    /// [`pop()`](Self::pop).
    #[must_use]
    pub fn with_limit(limit: usize) -> Self {
        let (sender, receiver) = crossbeam_channel::bounded(limit);
        Self { sender, receiver }
    }

    /// Adds `item` to the back of the queue, first waiting until there is room for it.
    pub fn append(&self, item: T) {
        // Cannot fail: `self.receiver` keeps the channel connected.
        let _ = self.sender.send(item);
    }

    /// Removes and returns the item at the front of the queue, first waiting until there is one.
    #[must_use]
    pub fn pop(&self) -> T {
        match self.receiver.recv() {
            Ok(item) => item,
            Err(crossbeam_channel::RecvError) => {
                unreachable!("queue channel disconnected while the queue owns both ends")
            }
        }
    }
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Queue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Queue")
            .field("limit", &self.sender.capacity())
            .finish_non_exhaustive()
    }
}

// -------------------------------------------------------------------------------------------------
