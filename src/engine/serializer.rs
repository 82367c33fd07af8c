use std::future::Future;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::limits::SLOW_SERIALIZER_WAIT_MS;

/// Runs booking mutations one at a time.
///
/// Every create and update goes through [`MutationSerializer::run_exclusive`],
/// so the conflict scan and the write that follows it are never interleaved
/// with another create or update.
///
/// Liveness: waiting has no timeout. An exclusive operation that never
/// completes stalls every later writer. Wait times are exported as
/// `slotkeeper_serializer_wait_seconds` and long waits are logged.
#[derive(Debug, Default)]
pub struct MutationSerializer {
    lock: Mutex<()>,
}

impl MutationSerializer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access, run `op`, release.
    ///
    /// Access is released when `op` finishes, whatever it returns, and also
    /// if the future is dropped or unwinds mid-flight. Waiters are served in
    /// FIFO order.
    pub async fn run_exclusive<F, Fut, T>(&self, op: F) -> T
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let wait_start = Instant::now();
        let _guard = self.lock.lock().await;
        record_wait(wait_start.elapsed());
        op().await
    }
}

fn record_wait(waited: Duration) {
    metrics::histogram!(crate::observability::SERIALIZER_WAIT_SECONDS)
        .record(waited.as_secs_f64());
    if waited >= Duration::from_millis(SLOW_SERIALIZER_WAIT_MS) {
        warn!("mutation waited {}ms for the serializer", waited.as_millis());
    } else if waited >= Duration::from_millis(1) {
        debug!("mutation waited {}ms for the serializer", waited.as_millis());
    }
}
