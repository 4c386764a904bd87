//! Client constants
//!
//! Centralized location for wire-level values shared by the domain and
//! infrastructure crates.

// Environments
pub const TEST_API_URL: &str = "https://test.bitpay.com/";
pub const PROD_API_URL: &str = "https://bitpay.com/";

// Request headers
pub const API_VERSION: &str = "2.0.0";
pub const HEADER_ACCEPT_VERSION: &str = "X-Accept-Version";
pub const HEADER_IDENTITY: &str = "X-Identity";
pub const HEADER_SIGNATURE: &str = "X-Signature";

// Resource paths
pub const RECIPIENTS_PATH: &str = "recipients";
pub const NOTIFICATIONS_SEGMENT: &str = "notifications";

// Transport defaults
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAX_ATTEMPTS: usize = 3;
pub const DEFAULT_BASE_BACKOFF_MS: u64 = 200;
pub const MAX_BACKOFF_MS: u64 = 5_000;
