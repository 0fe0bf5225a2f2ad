use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::planner::constants::{DEFAULT_SWEEP_INTERVAL, DEFAULT_TTL};

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Which remote store the planner talks to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Backend {
    /// The REST backend.
    Http {
        base_url: String,
        #[serde(default = "default_timeout_secs")]
        timeout_secs: u64,
    },

    /// In-memory store, optionally seeded from a JSON fixture.
    Mock {
        #[serde(default)]
        fixture: Option<PathBuf>,
    },
}

impl Default for Backend {
    fn default() -> Self {
        Backend::Mock { fixture: None }
    }
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    pub ttl_secs: u64,
    pub sweep_interval_secs: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            ttl_secs: DEFAULT_TTL.as_secs(),
            sweep_interval_secs: DEFAULT_SWEEP_INTERVAL.as_secs(),
        }
    }
}

impl CacheSettings {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    pub fn sweep_interval(&self) -> Duration {
        // A zero period would make the sweep spin.
        Duration::from_secs(self.sweep_interval_secs.max(1))
    }
}

/// Planner settings, read from a TOML file.
///
/// ```toml
/// [backend]
/// kind = "http"
/// base_url = "http://localhost:8080/api"
///
/// [cache]
/// ttl_secs = 600
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub backend: Backend,
    pub cache: CacheSettings,
}

impl PlannerConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load `path` when given, otherwise fall back to defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Point the backend at a REST server, keeping the configured timeout.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        let timeout_secs = match self.backend {
            Backend::Http { timeout_secs, .. } => timeout_secs,
            Backend::Mock { .. } => DEFAULT_TIMEOUT_SECS,
        };
        self.backend = Backend::Http {
            base_url: base_url.to_string(),
            timeout_secs,
        };
        self
    }
}
