//! reqwest client with the provider's retry policy applied

use payouts_domain::{ClientConfig, ClientError};
use reqwest::header::HeaderMap;
use reqwest::{Client as ReqwestClient, Method, Proxy, RequestBuilder, Response, Url};
use tracing::{debug, warn};

use super::retry::{Replay, RetryPolicy};
use crate::errors::InfraError;

/// HTTP client used by the provider transport
///
/// Every request goes through [`HttpClient::send`], which repeats attempts
/// according to the [`RetryPolicy`] and the request's [`Replay`] class.
#[derive(Clone)]
pub struct HttpClient {
    client: ReqwestClient,
    policy: RetryPolicy,
}

impl HttpClient {
    pub const fn new(client: ReqwestClient, policy: RetryPolicy) -> Self {
        Self { client, policy }
    }

    /// Build from client configuration.
    ///
    /// Proxies come only from `proxy_url`; `HTTP_PROXY` and friends are
    /// ignored so provider traffic never silently changes route.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Config` for an invalid proxy URL or when the
    /// TLS backend cannot be initialised.
    pub fn from_config(config: &ClientConfig, default_headers: HeaderMap) -> Result<Self, ClientError> {
        let mut builder = ReqwestClient::builder()
            .timeout(config.timeout())
            .user_agent(concat!("payouts-infra/", env!("CARGO_PKG_VERSION")))
            .default_headers(default_headers)
            .no_proxy();

        if let Some(proxy_url) = &config.proxy_url {
            let proxy = Proxy::all(proxy_url.as_str())
                .map_err(|e| ClientError::Config(format!("Invalid proxy URL '{proxy_url}': {e}")))?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| ClientError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self::new(client, RetryPolicy::from_config(config)))
    }

    pub const fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    pub fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.client.request(method, url)
    }

    /// Send `request`, retrying as far as `replay` and the policy allow.
    ///
    /// Non-success responses are returned as responses; only transport
    /// failures become errors.
    ///
    /// # Errors
    ///
    /// `ClientError::Network` when the last attempt failed to complete,
    /// `ClientError::Config` when the request cannot be built or replayed.
    pub async fn send(&self, request: RequestBuilder, replay: Replay) -> Result<Response, ClientError> {
        let mut attempt = 1;

        loop {
            let request = request
                .try_clone()
                .ok_or_else(|| ClientError::Config("streaming request bodies cannot be replayed".into()))?
                .build()
                .map_err(|e| ClientError::from(InfraError::from(e)))?;
            let method = request.method().clone();
            let path = request.url().path().to_string();

            let outcome = self.client.execute(request).await;
            match &outcome {
                Ok(response) => debug!(attempt, %method, %path, status = %response.status(), "provider responded"),
                Err(err) => debug!(attempt, %method, %path, error = %err, "provider request failed"),
            }

            match self.policy.retry_after(attempt, replay, &outcome) {
                Some(delay) => {
                    warn!(attempt, %method, %path, ?replay, delay_ms = delay.as_millis(), "retrying provider request");
                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                    attempt += 1;
                }
                None => return outcome.map_err(|e| InfraError::from(e).into()),
            }
        }
    }
}
