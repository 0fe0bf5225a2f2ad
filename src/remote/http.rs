use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde_json::Value;
use tracing::debug;

use super::RemoteStore;
use crate::error::{PlannerError, Result};

/// Remote store backed by the REST service.
#[derive(Clone)]
pub struct HttpStore {
    base_url: String,
    client: Client,
}

impl HttpStore {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Map a response to its JSON body; an empty body becomes `Null`.
    async fn decode(path: &str, response: Response) -> Result<Value> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(PlannerError::Remote {
                path: path.to_string(),
                status: status.as_u16(),
                message,
            });
        }

        let body = response.bytes().await?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl RemoteStore for HttpStore {
    async fn get(&self, path: &str) -> Result<Value> {
        debug!("GET {}", path);
        let response = self.client.get(self.url(path)).send().await?;
        Self::decode(path, response).await
    }

    async fn put(&self, path: &str, body: Value) -> Result<Value> {
        debug!("PUT {}", path);
        let response = self.client.put(self.url(path)).json(&body).send().await?;
        Self::decode(path, response).await
    }

    async fn post(&self, path: &str, body: Value) -> Result<Value> {
        debug!("POST {}", path);
        let response = self.client.post(self.url(path)).json(&body).send().await?;
        Self::decode(path, response).await
    }

    async fn delete(&self, path: &str) -> Result<()> {
        debug!("DELETE {}", path);
        let response = self.client.delete(self.url(path)).send().await?;
        Self::decode(path, response).await.map(|_| ())
    }
}
