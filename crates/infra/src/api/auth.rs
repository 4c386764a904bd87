//! Access token management
//!
//! Tokens are issued out-of-band per facade. The client asks for one right
//! before every request and never caches it itself.

use std::collections::HashMap;

use async_trait::async_trait;
use payouts_domain::{ClientConfig, ClientError, Facade};
use tracing::debug;

/// Trait for providing access tokens
///
/// This trait allows dependency injection and testing with mock providers.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    /// Get the access token issued for `facade`
    ///
    /// # Errors
    ///
    /// Returns `ClientError::TokenNotFound` if no token exists for the facade.
    async fn access_token(&self, facade: Facade) -> Result<String, ClientError>;
}

/// In-memory token store keyed by facade
#[derive(Debug, Clone, Default)]
pub struct AccessTokens {
    tokens: HashMap<Facade, String>,
}

impl AccessTokens {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from the `tokens` table of a client configuration.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Config` if a key names no known facade.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        let mut store = Self::new();
        for (facade, token) in config.facade_tokens()? {
            store.put(facade, token);
        }
        debug!(count = store.tokens.len(), "Loaded access tokens from configuration");
        Ok(store)
    }

    /// Insert or replace the token for a facade.
    pub fn put(&mut self, facade: Facade, token: impl Into<String>) {
        self.tokens.insert(facade, token.into());
    }

    pub fn token_exists(&self, facade: Facade) -> bool {
        self.tokens.contains_key(&facade)
    }

    /// Token for `facade`, or `ClientError::TokenNotFound`.
    pub fn get(&self, facade: Facade) -> Result<&str, ClientError> {
        self.tokens.get(&facade).map(String::as_str).ok_or(ClientError::TokenNotFound(facade))
    }
}

#[async_trait]
impl AccessTokenProvider for AccessTokens {
    async fn access_token(&self, facade: Facade) -> Result<String, ClientError> {
        self.get(facade).map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_token_is_an_error() {
        let tokens = AccessTokens::new();

        let err = tokens.access_token(Facade::Payout).await.unwrap_err();
        assert_eq!(err, ClientError::TokenNotFound(Facade::Payout));
    }

    #[tokio::test]
    async fn returns_stored_token() {
        let mut tokens = AccessTokens::new();
        tokens.put(Facade::Payout, "payout-token");

        assert_eq!(tokens.access_token(Facade::Payout).await.unwrap(), "payout-token");
    }

    #[test]
    fn token_exists_is_per_facade() {
        let mut tokens = AccessTokens::new();
        tokens.put(Facade::Merchant, "merchant-token");

        assert!(tokens.token_exists(Facade::Merchant));
        assert!(!tokens.token_exists(Facade::Payout));
    }

    #[test]
    fn put_replaces_existing_token() {
        let mut tokens = AccessTokens::new();
        tokens.put(Facade::Pos, "old");
        tokens.put(Facade::Pos, "new");

        assert_eq!(tokens.get(Facade::Pos).unwrap(), "new");
    }

    #[test]
    fn loads_from_config() {
        let mut config = ClientConfig::default();
        config.tokens.insert("payout".to_string(), "from-config".to_string());

        let tokens = AccessTokens::from_config(&config).unwrap();
        assert_eq!(tokens.get(Facade::Payout).unwrap(), "from-config");
        assert!(!tokens.token_exists(Facade::Merchant));
    }
}
