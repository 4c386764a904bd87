//! Client configuration structures
//!
//! Loaded from environment variables or a JSON/TOML file by the
//! infrastructure crate's config loader.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_BASE_BACKOFF_MS, DEFAULT_MAX_ATTEMPTS, DEFAULT_TIMEOUT_SECS, PROD_API_URL, TEST_API_URL,
};
use crate::errors::{ClientError, Result};
use crate::impl_wire_name_conversions;
use crate::types::Facade;

/// Provider environment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Test,
    Prod,
}

impl_wire_name_conversions!(Environment {
    Test => "test",
    Prod => "prod",
});

impl Environment {
    pub const fn default_api_url(self) -> &'static str {
        match self {
            Self::Test => TEST_API_URL,
            Self::Prod => PROD_API_URL,
        }
    }
}

/// Configuration for the payouts client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub environment: Environment,
    /// Overrides the environment's base URL (e.g. for a local mock server)
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Total HTTP attempts per request (initial try + retries)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,
    /// Delay before the first retry; doubles per further retry
    #[serde(default = "default_base_backoff_ms")]
    pub base_backoff_ms: u64,
    /// Explicit egress proxy. System proxy variables are never consulted.
    #[serde(default)]
    pub proxy_url: Option<String>,
    /// Access tokens keyed by facade name ("merchant", "payout", "pos")
    #[serde(default)]
    pub tokens: BTreeMap<String, String>,
}

const fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

const fn default_max_attempts() -> usize {
    DEFAULT_MAX_ATTEMPTS
}

const fn default_base_backoff_ms() -> u64 {
    DEFAULT_BASE_BACKOFF_MS
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            api_url: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_backoff_ms: DEFAULT_BASE_BACKOFF_MS,
            proxy_url: None,
            tokens: BTreeMap::new(),
        }
    }
}

impl ClientConfig {
    /// Base URL requests are resolved against, always ending in `/`.
    pub fn base_url(&self) -> String {
        let url = self.api_url.as_deref().unwrap_or_else(|| self.environment.default_api_url());
        if url.ends_with('/') {
            url.to_string()
        } else {
            format!("{url}/")
        }
    }

    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub const fn base_backoff(&self) -> Duration {
        Duration::from_millis(self.base_backoff_ms)
    }

    /// Tokens with validated facade keys.
    ///
    /// # Errors
    /// Returns `ClientError::Config` for a key that names no known facade.
    pub fn facade_tokens(&self) -> Result<Vec<(Facade, String)>> {
        self.tokens
            .iter()
            .map(|(name, token)| {
                name.parse::<Facade>()
                    .map(|facade| (facade, token.clone()))
                    .map_err(ClientError::Config)
            })
            .collect()
    }
}
