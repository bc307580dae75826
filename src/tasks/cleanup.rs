//! Idle Cleanup Task
//!
//! Background task that wipes the whole cache after a configured quiet
//! period. Distinct from per-entry expiration, which is checked lazily on
//! access: this task models "clear everything if nobody has touched the
//! cache in X time".

use std::hash::Hash;
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::LruCache;

/// Spawns a background task that clears the cache once its idle window
/// elapses without a touch.
///
/// Every cache touch (`set`, or a recency refresh inside `has`/`get`)
/// re-arms the deadline `last_touch + cleanup_time`; `clear()` disarms it
/// until the next touch. The task sleeps until the armed deadline and
/// re-validates it under the write lock before clearing, so a touch that
/// lands during the sleep always wins and a disarmed window never fires.
///
/// Returns a JoinHandle so the owner can abort the task on shutdown. The
/// task exits on its own if the cache has no cleanup window configured.
pub fn spawn_idle_cleanup_task<K, V>(cache: Arc<RwLock<LruCache<K, V>>>) -> JoinHandle<()>
where
    K: Hash + Eq + Clone + Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    tokio::spawn(async move {
        let idle_window = cache.read().await.cleanup_time();
        if idle_window.is_zero() {
            return;
        }
        info!("starting idle cleanup task, window {:?}", idle_window);

        loop {
            // Sleep until the armed deadline; while dormant, poll at
            // window granularity.
            let wait = {
                let guard = cache.read().await;
                match guard.idle_deadline() {
                    Some(deadline) => deadline.saturating_duration_since(Instant::now()),
                    None => idle_window,
                }
            };
            if !wait.is_zero() {
                tokio::time::sleep(wait).await;
            }

            let mut guard = cache.write().await;
            match guard.idle_deadline() {
                Some(deadline) if Instant::now() >= deadline => {
                    let dropped = guard.len();
                    guard.clear();
                    if dropped > 0 {
                        info!("idle cleanup: cleared {} entries", dropped);
                    } else {
                        debug!("idle cleanup: window elapsed on empty cache");
                    }
                }
                // Touched during the sleep, or dormant: nothing to do
                _ => {}
            }
        }
    })
}
