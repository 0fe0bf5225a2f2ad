//! The remote store contract and its two implementations.
//!
//! Every resource family speaks the same four verbs over JSON documents.
//! Paths are `<resource>` for a collection and `<resource>/<id>` for one
//! entity.

mod http;
mod mock;

pub use http::HttpStore;
pub use mock::{MockStore, RemoteMethod};

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::info;

use crate::config::Backend;
use crate::error::Result;

#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Fetch a collection or a single entity.
    async fn get(&self, path: &str) -> Result<Value>;

    /// Replace a collection or an entity. May answer with `Null`.
    async fn put(&self, path: &str, body: Value) -> Result<Value>;

    /// Create or submit. May answer with `Null`, an identifier, or a
    /// derived result (posting a menu answers with its ingredient demand).
    async fn post(&self, path: &str, body: Value) -> Result<Value>;

    async fn delete(&self, path: &str) -> Result<()>;
}

/// Build the remote store selected by configuration.
pub fn connect(backend: &Backend) -> Result<Arc<dyn RemoteStore>> {
    match backend {
        Backend::Http {
            base_url,
            timeout_secs,
        } => {
            info!("using REST backend at {}", base_url);
            let store = HttpStore::new(base_url, Duration::from_secs(*timeout_secs))?;
            Ok(Arc::new(store))
        }
        Backend::Mock { fixture } => {
            let store = match fixture {
                Some(path) => {
                    info!("using in-memory backend seeded from {}", path.display());
                    MockStore::from_json_file(path)?
                }
                None => {
                    info!("using empty in-memory backend");
                    MockStore::new()
                }
            };
            Ok(Arc::new(store))
        }
    }
}

/// Split `resource/id` into its parts.
pub(crate) fn split_path(path: &str) -> (&str, Option<&str>) {
    let path = path.trim_matches('/');
    match path.split_once('/') {
        Some((resource, id)) => (resource, Some(id)),
        None => (path, None),
    }
}
