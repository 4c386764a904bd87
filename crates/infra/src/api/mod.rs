//! Provider API plumbing
//!
//! Collaborators every resource client is built from:
//!
//! - [`auth`]: access tokens keyed by facade
//! - [`guid`]: idempotency keys for write requests
//! - [`transport`]: HTTP verbs against the provider, signing, non-2xx mapping
//! - [`envelope`]: unwrapping the provider's `{"data": ...}` response shape

pub mod auth;
pub mod envelope;
pub mod guid;
pub mod transport;

pub use auth::{AccessTokenProvider, AccessTokens};
pub use guid::{GuidGenerator, UuidGenerator};
pub use transport::{ApiResponse, RequestSigner, RestTransport, SignatureHeaders, Transport};
