use std::collections::BTreeMap;

use payouts_domain::ClientConfig;
use payouts_infra::PayoutRecipientsClient;
use wiremock::MockServer;

pub const PAYOUT_TOKEN: &str = "payout-token-123";

/// Configuration pointing at the mock server, without retries.
pub fn config_for(server: &MockServer) -> ClientConfig {
    let mut tokens = BTreeMap::new();
    tokens.insert("payout".to_string(), PAYOUT_TOKEN.to_string());

    ClientConfig {
        api_url: Some(server.uri()),
        max_attempts: 1,
        base_backoff_ms: 1,
        tokens,
        ..ClientConfig::default()
    }
}

/// Client wired with the real transport and token store.
pub fn client_for(server: &MockServer) -> PayoutRecipientsClient {
    PayoutRecipientsClient::from_config(&config_for(server)).expect("client should build")
}
