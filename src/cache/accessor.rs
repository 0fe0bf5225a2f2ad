use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info};

use super::ExpiringCache;
use crate::config::CacheSettings;
use crate::error::Result;
use crate::remote::RemoteStore;

/// Cache-aside access to one remote resource family.
///
/// Reads are served from the cache when possible and populate it on a miss.
/// Writes drop the affected cache key *before* the remote call, so a failed
/// write leaves nothing stale behind and the next read always refetches.
///
/// A read miss that was already in flight when a write to the same key
/// started returns its value but does not cache it.
///
/// The collection key (`resource`) and the per-entity keys
/// (`resource/<id>`) are cached independently. Writing one does not
/// invalidate the other; callers that cache both must invalidate both.
pub struct CacheAside {
    resource: String,
    remote: Arc<dyn RemoteStore>,
    cache: ExpiringCache<String, Value>,
    writes: Mutex<WriteLog>,
}

/// Sequence numbers of the latest invalidation per key.
#[derive(Debug, Default)]
struct WriteLog {
    seq: u64,
    per_key: HashMap<String, u64>,
    cleared_at: u64,
}

impl WriteLog {
    fn record(&mut self, key: &str) {
        self.seq += 1;
        self.per_key.insert(key.to_string(), self.seq);
    }

    fn record_clear(&mut self) {
        self.seq += 1;
        self.per_key.clear();
        self.cleared_at = self.seq;
    }

    /// Whether `key` was invalidated after sequence `since`.
    fn invalidated_since(&self, key: &str, since: u64) -> bool {
        self.cleared_at > since || self.per_key.get(key).is_some_and(|&at| at > since)
    }
}

impl CacheAside {
    pub fn new(resource: &str, remote: Arc<dyn RemoteStore>, settings: &CacheSettings) -> Self {
        Self {
            resource: resource.to_string(),
            remote,
            cache: ExpiringCache::new(settings.ttl(), settings.sweep_interval()),
            writes: Mutex::new(WriteLog::default()),
        }
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// Cache key and remote path of one entity.
    pub fn entity_key(&self, id: &str) -> String {
        format!("{}/{}", self.resource, id)
    }

    /// Read the whole collection.
    pub async fn read<T: DeserializeOwned>(&self) -> Result<T> {
        let key = self.resource.clone();
        self.read_key(&key).await
    }

    /// Read one entity, cached under its own key.
    pub async fn read_one<T: DeserializeOwned>(&self, id: &str) -> Result<T> {
        self.read_key(&self.entity_key(id)).await
    }

    async fn read_key<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        let key = key.to_string();
        if let Some(cached) = self.cache.get(&key) {
            debug!("cache hit: {}", key);
            return Ok(serde_json::from_value(cached)?);
        }

        debug!("cache miss: {}", key);
        let started = self.writes.lock().seq;
        let fetched = self.remote.get(&key).await?;
        // Decode first so a payload we cannot use is never cached.
        let decoded = serde_json::from_value(fetched.clone())?;

        let writes = self.writes.lock();
        if writes.invalidated_since(&key, started) {
            debug!("not caching {}: written during the read", key);
        } else {
            self.cache.set(key, fetched);
        }
        Ok(decoded)
    }

    fn drop_key(&self, key: &str) {
        let mut writes = self.writes.lock();
        writes.record(key);
        self.cache.delete(&key.to_string());
    }

    /// Replace the whole collection.
    pub async fn write<T: Serialize>(&self, value: &T) -> Result<Value> {
        let key = self.resource.clone();
        self.write_key(&key, value).await
    }

    /// Replace one entity.
    pub async fn write_one<T: Serialize>(&self, id: &str, value: &T) -> Result<Value> {
        self.write_key(&self.entity_key(id), value).await
    }

    async fn write_key<T: Serialize>(&self, key: &str, value: &T) -> Result<Value> {
        let body = serde_json::to_value(value)?;
        self.drop_key(key);
        info!("writing {}", key);
        self.remote.put(key, body).await
    }

    /// Post to the collection and decode the derived answer.
    pub async fn submit<T, R>(&self, value: &T) -> Result<R>
    where
        T: Serialize,
        R: DeserializeOwned,
    {
        let body = serde_json::to_value(value)?;
        self.drop_key(&self.resource);
        info!("submitting {}", self.resource);
        let answer = self.remote.post(&self.resource, body).await?;
        Ok(serde_json::from_value(answer)?)
    }

    /// Delete one entity remotely.
    pub async fn remove(&self, id: &str) -> Result<()> {
        let key = self.entity_key(id);
        self.drop_key(&key);
        info!("deleting {}", key);
        self.remote.delete(&key).await
    }

    /// Drop one cached key without touching the remote.
    pub fn invalidate(&self, key: &str) {
        self.drop_key(key);
    }

    pub fn invalidate_all(&self) {
        let mut writes = self.writes.lock();
        writes.record_clear();
        self.cache.clear();
    }

    pub fn is_cached(&self, key: &str) -> bool {
        self.cache.get(&key.to_string()).is_some()
    }

    pub fn start_sweeper(&self) {
        self.cache.start_sweeper();
    }

    pub fn stop_sweeper(&self) {
        self.cache.stop_sweeper();
    }
}
