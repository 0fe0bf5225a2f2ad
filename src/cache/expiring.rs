use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::debug;

use crate::planner::constants::{DEFAULT_SWEEP_INTERVAL, DEFAULT_TTL, MAX_CACHE_DURATION};

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    expires_at: Instant,
}

impl<V> CacheEntry<V> {
    #[inline]
    fn is_live(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

type Entries<K, V> = Arc<Mutex<HashMap<K, CacheEntry<V>>>>;

/// Key/value store where every entry expires after a time-to-live.
///
/// Expired entries are never returned: `get` evicts them on read, and an
/// optional background sweep drops them on a fixed interval. There is no
/// size bound. The sweep is a tokio task, started with
/// [`start_sweeper`](Self::start_sweeper) and stopped by
/// [`stop_sweeper`](Self::stop_sweeper) or when the cache is dropped.
pub struct ExpiringCache<K, V> {
    entries: Entries<K, V>,
    default_ttl: Duration,
    sweep_interval: Duration,
    sweeper: Mutex<Option<JoinHandle<()>>>,
}

impl<K, V> ExpiringCache<K, V>
where
    K: Eq + Hash + Clone + Send + 'static,
    V: Clone + Send + 'static,
{
    pub fn new(default_ttl: Duration, sweep_interval: Duration) -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            default_ttl: default_ttl.min(MAX_CACHE_DURATION),
            sweep_interval: sweep_interval.min(MAX_CACHE_DURATION),
            sweeper: Mutex::new(None),
        }
    }

    /// Value for `key` if present and not expired.
    pub fn get(&self, key: &K) -> Option<V> {
        let now = Instant::now();
        let mut entries = self.entries.lock();

        match entries.get(key) {
            Some(entry) if entry.is_live(now) => return Some(entry.value.clone()),
            Some(_) => {}
            None => return None,
        }

        entries.remove(key);
        None
    }

    /// Insert with the default TTL.
    pub fn set(&self, key: K, value: V) {
        self.set_with_ttl(key, value, self.default_ttl);
    }

    pub fn set_with_ttl(&self, key: K, value: V, ttl: Duration) {
        let entry = CacheEntry {
            value,
            expires_at: deadline(ttl),
        };
        self.entries.lock().insert(key, entry);
    }

    /// Remove `key`. Returns whether an entry (live or stale) was present.
    pub fn delete(&self, key: &K) -> bool {
        self.entries.lock().remove(key).is_some()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    /// Stored entries, including expired ones the sweep has not reached yet.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Drop every expired entry now. Returns how many were dropped.
    pub fn purge_expired(&self) -> usize {
        purge(&self.entries)
    }

    /// Spawn the periodic sweep. Must be called inside a tokio runtime.
    /// Calling it while a sweep is already running does nothing.
    pub fn start_sweeper(&self) {
        let mut sweeper = self.sweeper.lock();
        if sweeper.as_ref().is_some_and(|h| !h.is_finished()) {
            return;
        }

        // The task only holds a weak handle so it cannot keep the map alive.
        let entries = Arc::downgrade(&self.entries);
        let period = self.sweep_interval;

        *sweeper = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(deadline(period), period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                let Some(entries) = entries.upgrade() else {
                    break;
                };
                let evicted = purge(&entries);
                if evicted > 0 {
                    debug!("cache sweep evicted {} entries", evicted);
                }
            }
        }));
    }

    pub fn stop_sweeper(&self) {
        if let Some(handle) = self.sweeper.lock().take() {
            handle.abort();
        }
    }

    pub fn is_sweeping(&self) -> bool {
        self.sweeper
            .lock()
            .as_ref()
            .is_some_and(|h| !h.is_finished())
    }
}

impl<K, V> Default for ExpiringCache<K, V>
where
    K: Eq + Hash + Clone + Send + 'static,
    V: Clone + Send + 'static,
{
    fn default() -> Self {
        Self::new(DEFAULT_TTL, DEFAULT_SWEEP_INTERVAL)
    }
}

impl<K, V> Drop for ExpiringCache<K, V> {
    fn drop(&mut self) {
        if let Some(handle) = self.sweeper.get_mut().take() {
            handle.abort();
        }
    }
}

/// `now + ttl`, with `ttl` capped at [`MAX_CACHE_DURATION`].
fn deadline(ttl: Duration) -> Instant {
    Instant::now() + ttl.min(MAX_CACHE_DURATION)
}

fn purge<K, V>(entries: &Mutex<HashMap<K, CacheEntry<V>>>) -> usize {
    let now = Instant::now();
    let mut entries = entries.lock();
    let before = entries.len();
    entries.retain(|_, entry| entry.is_live(now));
    before - entries.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache() -> ExpiringCache<String, u32> {
        ExpiringCache::new(Duration::from_secs(5), Duration::from_secs(10))
    }

    #[tokio::test(start_paused = true)]
    async fn test_get_before_and_after_ttl() {
        let cache = cache();
        cache.set("carrot".to_string(), 3);

        tokio::time::advance(Duration::from_secs(4)).await;
        assert_eq!(cache.get(&"carrot".to_string()), Some(3));

        tokio::time::advance(Duration::from_secs(1)).await;
        assert_eq!(cache.get(&"carrot".to_string()), None);
        // Lazy eviction removed it without a sweep.
        assert_eq!(cache.len(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_per_call_ttl_overrides_default() {
        let cache = cache();
        cache.set_with_ttl("yogurt".to_string(), 2, Duration::from_secs(60));

        tokio::time::advance(Duration::from_secs(30)).await;
        assert_eq!(cache.get(&"yogurt".to_string()), Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_evicts_without_reads() {
        let cache = cache();
        cache.set("apple".to_string(), 1);
        cache.set_with_ttl("bread".to_string(), 2, Duration::from_secs(60));
        cache.start_sweeper();
        assert!(cache.is_sweeping());

        tokio::time::sleep(Duration::from_secs(11)).await;
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&"bread".to_string()), Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stopped_sweeper_leaves_stale_entries() {
        let cache = cache();
        cache.set("apple".to_string(), 1);
        cache.start_sweeper();
        cache.stop_sweeper();
        assert!(!cache.is_sweeping());

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&"apple".to_string()), None);
    }

    #[tokio::test]
    async fn test_delete_and_clear() {
        let cache = cache();
        cache.set("a".to_string(), 1);
        cache.set("b".to_string(), 2);

        assert!(cache.delete(&"a".to_string()));
        assert!(!cache.delete(&"a".to_string()));
        assert_eq!(cache.get(&"b".to_string()), Some(2));

        cache.clear();
        assert!(cache.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_purge_expired() {
        let cache = cache();
        cache.set("a".to_string(), 1);
        cache.set_with_ttl("b".to_string(), 2, Duration::from_secs(60));

        tokio::time::advance(Duration::from_secs(6)).await;
        assert_eq!(cache.purge_expired(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_huge_ttl_never_expires() {
        let cache: ExpiringCache<String, u32> =
            ExpiringCache::new(Duration::from_secs(u64::MAX), Duration::MAX);
        cache.set("salt".to_string(), 1);
        cache.set_with_ttl("pepper".to_string(), 2, Duration::MAX);
        cache.start_sweeper();

        tokio::time::advance(Duration::from_secs(86_400 * 365)).await;
        assert_eq!(cache.get(&"salt".to_string()), Some(1));
        assert_eq!(cache.get(&"pepper".to_string()), Some(2));
        assert!(cache.is_sweeping());
    }

    #[tokio::test]
    async fn test_drop_stops_sweeper() {
        let cache = cache();
        cache.start_sweeper();
        let sweep = cache
            .sweeper
            .lock()
            .as_ref()
            .map(|h| h.abort_handle())
            .unwrap();

        drop(cache);
        for _ in 0..10 {
            if sweep.is_finished() {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert!(sweep.is_finished());
    }
}
