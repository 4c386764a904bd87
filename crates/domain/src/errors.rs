//! Error types used throughout the client
//!
//! Two layers:
//! - [`ClientError`] is raised by the transport, the token store and the
//!   configuration loader. Its `Api` variant is the provider's own typed
//!   error (HTTP status code + reason phrase).
//! - [`PayoutRecipientError`] is what recipient operations return. It carries
//!   one kind per business operation so callers can branch on which action
//!   failed without inspecting messages.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::Facade;

fn display_status(status_code: &Option<u16>) -> String {
    status_code.map_or_else(String::new, |code| format!(" [{code}]"))
}

/// Generic client-side error
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum ClientError {
    /// Non-success response reported by the provider.
    #[error("API error{}: {reason}", display_status(.status_code))]
    Api { status_code: Option<u16>, reason: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Access token not found for facade: {0}")]
    TokenNotFound(Facade),

    #[error("Configuration error: {0}")]
    Config(String),

    /// Body could not be read or was not JSON.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ClientError {
    /// Build an API error from a status code and reason phrase.
    pub fn api(status_code: Option<u16>, reason: impl Into<String>) -> Self {
        Self::Api { status_code, reason: reason.into() }
    }

    /// HTTP status code, only known for provider API errors.
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api { status_code, .. } => *status_code,
            _ => None,
        }
    }

    /// Reason phrase for API errors, the rendered message otherwise.
    pub fn reason(&self) -> String {
        match self {
            Self::Api { reason, .. } => reason.clone(),
            other => other.to_string(),
        }
    }

    /// Whether this is the provider's own typed API error.
    pub const fn is_api(&self) -> bool {
        matches!(self, Self::Api { .. })
    }
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Business operation a recipient call belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecipientOperation {
    Creation,
    Query,
    Update,
    Cancellation,
    Notification,
}

impl RecipientOperation {
    /// Whether provider API errors pass through unchanged.
    ///
    /// Submit, query and update surface [`ClientError::Api`] as-is; delete
    /// and notify fold it into their own error kind.
    pub const fn propagates_api_errors(self) -> bool {
        matches!(self, Self::Creation | Self::Query | Self::Update)
    }

    /// Build the operation-specific error.
    pub fn error(self, status_code: Option<u16>, message: impl Into<String>) -> PayoutRecipientError {
        let message = message.into();
        match self {
            Self::Creation => PayoutRecipientError::Creation { status_code, message },
            Self::Query => PayoutRecipientError::Query { status_code, message },
            Self::Update => PayoutRecipientError::Update { status_code, message },
            Self::Cancellation => PayoutRecipientError::Cancellation { status_code, message },
            Self::Notification => PayoutRecipientError::Notification { status_code, message },
        }
    }
}

/// Errors returned by payout recipient operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PayoutRecipientError {
    /// Provider or transport error propagated unchanged.
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("Payout recipient creation failed{}: {message}", display_status(.status_code))]
    Creation { status_code: Option<u16>, message: String },

    #[error("Payout recipient query failed{}: {message}", display_status(.status_code))]
    Query { status_code: Option<u16>, message: String },

    #[error("Payout recipient update failed{}: {message}", display_status(.status_code))]
    Update { status_code: Option<u16>, message: String },

    #[error("Payout recipient cancellation failed{}: {message}", display_status(.status_code))]
    Cancellation { status_code: Option<u16>, message: String },

    #[error("Payout recipient notification failed{}: {message}", display_status(.status_code))]
    Notification { status_code: Option<u16>, message: String },
}

impl PayoutRecipientError {
    /// Operation kind, `None` for propagated client errors.
    pub const fn operation(&self) -> Option<RecipientOperation> {
        match self {
            Self::Client(_) => None,
            Self::Creation { .. } => Some(RecipientOperation::Creation),
            Self::Query { .. } => Some(RecipientOperation::Query),
            Self::Update { .. } => Some(RecipientOperation::Update),
            Self::Cancellation { .. } => Some(RecipientOperation::Cancellation),
            Self::Notification { .. } => Some(RecipientOperation::Notification),
        }
    }

    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Client(err) => err.status_code(),
            Self::Creation { status_code, .. }
            | Self::Query { status_code, .. }
            | Self::Update { status_code, .. }
            | Self::Cancellation { status_code, .. }
            | Self::Notification { status_code, .. } => *status_code,
        }
    }

    /// Human-readable message or reason phrase.
    pub fn message(&self) -> String {
        match self {
            Self::Client(err) => err.reason(),
            Self::Creation { message, .. }
            | Self::Query { message, .. }
            | Self::Update { message, .. }
            | Self::Cancellation { message, .. }
            | Self::Notification { message, .. } => message.clone(),
        }
    }
}
