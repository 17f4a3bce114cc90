use core::fmt;

use crossbeam_channel::{Receiver, Sender};

// -------------------------------------------------------------------------------------------------

/// Single-subscriber change alert hand-off shared by [`SafeMap`](crate::SafeMap) and
/// [`SafeSet`](crate::SafeSet).
///
/// The channel has zero capacity: [`publish()`](Self::publish) returns only after some
/// subscriber has received the message. The channel keeps one receiver of its own, so it never
/// becomes disconnected and subscribers may come and go freely; that receiver is never read
/// from except by [`drain_stale()`](Self::drain_stale).
///
/// # Generic parameters
///
/// * `M` is the type of message describing a change.
pub(crate) struct AlertChannel<M> {
    sender: Sender<M>,
    receiver: Receiver<M>,
}

impl<M> AlertChannel<M> {
    /// Constructs a rendezvous channel.
    pub(crate) fn new() -> Self {
        let (sender, receiver) = crossbeam_channel::bounded(0);
        Self { sender, receiver }
    }

    /// Returns a receiver of all future alerts.
    ///
    /// Every alert goes to exactly one receiver, no matter how many have been handed out.
    pub(crate) fn subscribe(&self) -> Receiver<M> {
        self.receiver.clone()
    }

    /// Discards one buffered but unconsumed alert, if there is one.
    ///
    /// A rendezvous channel never buffers anything, so this currently does nothing.
    #[mutants::skip] // unobservable with zero capacity
    pub(crate) fn drain_stale(&self) {
        if !self.receiver.is_empty() {
            let _ = self.receiver.try_recv();
        }
    }

    /// Blocks until a subscriber receives `message`.
    ///
    /// Callers publish while holding their container's write lock, so this also blocks every
    /// other user of that container.
    pub(crate) fn publish(&self, message: M) {
        log::trace!("waiting for an alert subscriber");
        // Cannot fail: `self.receiver` keeps the channel connected.
        let _ = self.sender.send(message);
    }
}

impl<M> fmt::Debug for AlertChannel<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // crossbeam does not expose a receiver count.
        f.debug_struct("AlertChannel").finish_non_exhaustive()
    }
}

// -------------------------------------------------------------------------------------------------
