//! TTL Sweep Task
//!
//! Background task that periodically removes expired cache entries.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{oneshot, RwLock};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::cache::CacheStore;

// == Sweep Handle ==
/// Owner side of a running sweep task.
///
/// Dropping the handle also stops the task, since the stop channel closes.
#[derive(Debug)]
pub struct SweepHandle {
    stop: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl SweepHandle {
    /// Signals the task to stop and waits for it to finish.
    pub async fn stop(self) {
        // The receiver is gone only if the task already exited
        let _ = self.stop.send(());
        if let Err(err) = self.task.await {
            warn!("TTL sweep task ended abnormally: {}", err);
        }
    }

    /// Returns true once the task has exited.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

/// Spawns a background task that periodically sweeps expired cache entries.
///
/// Each pass acquires the write lock on the store, so a sweep never
/// interleaves with a caller's operation. The first pass runs one full
/// interval after spawning.
///
/// # Arguments
/// * `store` - Shared reference to the cache store
/// * `interval` - Time between sweep passes; must be non-zero
///
/// # Panics
///
/// Panics if `interval` is zero or if called outside a tokio runtime.
///
/// # Example
/// ```ignore
/// let store = Arc::new(RwLock::new(CacheStore::new(Duration::ZERO)));
/// let sweeper = spawn_sweep_task(store.clone(), Duration::from_secs(60));
/// // Later, during teardown:
/// sweeper.stop().await;
/// ```
pub fn spawn_sweep_task(store: Arc<RwLock<CacheStore>>, interval: Duration) -> SweepHandle {
    let (stop, mut stopped) = oneshot::channel::<()>();

    let task = tokio::spawn(async move {
        info!("Starting TTL sweep task with interval of {:?}", interval);

        let mut ticker = tokio::time::interval_at(Instant::now() + interval, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                // Fires on an explicit stop and when the handle is dropped
                _ = &mut stopped => break,
                _ = ticker.tick() => {}
            }

            let removed = {
                let mut guard = store.write().await;
                guard.cleanup_expired()
            };

            if removed > 0 {
                info!("TTL sweep: removed {} expired entries", removed);
            } else {
                debug!("TTL sweep: no expired entries found");
            }
        }

        info!("TTL sweep task stopped");
    });

    SweepHandle { stop, task }
}
