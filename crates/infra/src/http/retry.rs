//! Retry decisions for provider requests
//!
//! Whether an attempt may be repeated depends on two things: what went
//! wrong, and whether the provider would treat a second copy of the request
//! as the same operation.

use std::time::Duration;

use payouts_domain::constants::MAX_BACKOFF_MS;
use payouts_domain::ClientConfig;
use reqwest::{Method, Response};

/// Whether a request may reach the provider more than once
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Replay {
    /// Repeating the request has no further effect on the provider: an
    /// idempotent method, or a write stamped with a `guid` the provider
    /// deduplicates on.
    Safe,
    /// Only retried when the connection was never established.
    ConnectOnly,
}

impl Replay {
    /// Classify a request by method and JSON body.
    ///
    /// GET, PUT and DELETE are idempotent. A POST is only safe when its body
    /// carries a non-empty top-level `guid`.
    pub fn classify(method: &Method, body: Option<&str>) -> Self {
        if method.is_idempotent() || body.is_some_and(carries_guid) {
            Self::Safe
        } else {
            Self::ConnectOnly
        }
    }
}

fn carries_guid(json: &str) -> bool {
    serde_json::from_str::<serde_json::Value>(json)
        .ok()
        .and_then(|body| body.get("guid").and_then(|guid| guid.as_str().map(|g| !g.is_empty())))
        .unwrap_or(false)
}

/// Attempt budget and backoff schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first. Never below one.
    pub max_attempts: usize,
    pub base_backoff: Duration,
    pub max_backoff: Duration,
}

impl RetryPolicy {
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            base_backoff: config.base_backoff(),
            max_backoff: Duration::from_millis(MAX_BACKOFF_MS),
        }
    }

    /// Single attempt, no retries.
    pub const fn none() -> Self {
        Self { max_attempts: 1, base_backoff: Duration::ZERO, max_backoff: Duration::ZERO }
    }

    /// Delay before retry number `retry` (1-based), capped at `max_backoff`.
    pub fn delay(&self, retry: usize) -> Duration {
        let shift = u32::try_from(retry.saturating_sub(1)).unwrap_or(u32::MAX).min(16);
        self.base_backoff.saturating_mul(1 << shift).min(self.max_backoff)
    }

    /// Delay to wait before another attempt, or `None` to hand `outcome`
    /// back to the caller.
    pub fn retry_after(
        &self,
        attempt: usize,
        replay: Replay,
        outcome: &Result<Response, reqwest::Error>,
    ) -> Option<Duration> {
        if attempt >= self.max_attempts {
            return None;
        }

        let retryable = match outcome {
            Ok(response) => replay == Replay::Safe && response.status().is_server_error(),
            Err(err) if err.is_connect() => true,
            Err(err) => replay == Replay::Safe && (err.is_timeout() || err.is_request()),
        };

        retryable.then(|| self.delay(attempt))
    }
}
