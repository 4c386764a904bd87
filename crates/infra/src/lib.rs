//! # Payouts Infrastructure
//!
//! I/O side of the payout recipients client.
//!
//! This crate contains:
//! - HTTP client with retry/backoff (`http`)
//! - Provider transport, envelope unwrapping and access tokens (`api`)
//! - The payout recipients client itself (`recipients`)
//! - Configuration loading from env or file (`config`)
//! - Tracing subscriber setup (`observability`)
//!
//! ## Architecture
//! - Domain types and error kinds live in `payouts-domain`
//! - Every outbound call goes through the [`Transport`] trait, so the
//!   recipients client can be driven by a fake in tests

pub mod api;
pub mod config;
pub mod errors;
pub mod http;
pub mod observability;
pub mod recipients;

// Re-export commonly used items
pub use api::{
    AccessTokenProvider, AccessTokens, ApiResponse, GuidGenerator, RequestSigner, RestTransport,
    SignatureHeaders, Transport, UuidGenerator,
};
pub use errors::{InfraError, IntoClientError};
pub use http::{HttpClient, Replay, RetryPolicy};
pub use observability::{init_tracing, LogFormat};
pub use recipients::PayoutRecipientsClient;
