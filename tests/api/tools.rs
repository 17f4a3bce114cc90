use core::time::Duration;
use std::thread;

use lockstep::Receiver;

// -------------------------------------------------------------------------------------------------

/// How long a call must stay blocked before we believe it is blocked for good.
pub(crate) const STALL: Duration = Duration::from_millis(200);

/// Spawns a thread which receives exactly `count` alerts and returns them in the order received.
pub(crate) fn subscriber<M: Send + 'static>(
    alerts: Receiver<M>,
    count: usize,
) -> thread::JoinHandle<Vec<M>> {
    thread::spawn(move || alerts.iter().take(count).collect())
}

/// Asserts that `handle`'s thread is still running after [`STALL`].
#[track_caller]
pub(crate) fn assert_stalled<T>(handle: &thread::JoinHandle<T>) {
    thread::sleep(STALL);
    assert!(!handle.is_finished(), "call returned but should still be blocked");
}

/// Installs a test logger so that `RUST_LOG=lockstep=trace` shows the crate's records.
pub(crate) fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
