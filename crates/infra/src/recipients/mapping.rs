//! Failure mapping shared by every recipient operation
//!
//! Each operation prepares its request, runs the transport call and decodes
//! the response inside [`call_and_map`], which turns whatever went wrong
//! into the operation's own error kind.

use std::future::Future;

use payouts_domain::{ClientError, PayoutRecipientError, RecipientOperation};
use serde::Serialize;
use tracing::warn;

/// Failure raised while running or interpreting a transport call
#[derive(Debug)]
pub enum CallFailure {
    Client(ClientError),
    Decode(serde_json::Error),
    MissingField(&'static str),
}

impl From<ClientError> for CallFailure {
    fn from(err: ClientError) -> Self {
        Self::Client(err)
    }
}

impl From<serde_json::Error> for CallFailure {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err)
    }
}

/// Serialize a request body, failing with the operation's error kind.
pub fn serialize<T: Serialize>(
    operation: RecipientOperation,
    object: &str,
    value: &T,
) -> Result<String, PayoutRecipientError> {
    serde_json::to_string(value).map_err(|e| {
        warn!(?operation, error = %e, "Failed to serialize request body");
        operation.error(None, format!("failed to serialize {object} object: {e}"))
    })
}

/// Await `call` and map any failure to `operation`'s error kind.
pub async fn call_and_map<T, F>(
    operation: RecipientOperation,
    object: &str,
    call: F,
) -> Result<T, PayoutRecipientError>
where
    F: Future<Output = Result<T, CallFailure>>,
{
    call.await.map_err(|failure| map_failure(operation, object, failure))
}

/// Provider API errors pass through or are re-wrapped with their status
/// code and reason, depending on the operation. Everything else becomes the
/// operation's error with no status code.
pub fn map_failure(
    operation: RecipientOperation,
    object: &str,
    failure: CallFailure,
) -> PayoutRecipientError {
    let mapped = match failure {
        CallFailure::Client(err) if err.is_api() && operation.propagates_api_errors() => {
            PayoutRecipientError::Client(err)
        }
        CallFailure::Client(err) if err.is_api() => operation.error(err.status_code(), err.reason()),
        CallFailure::Client(err) => {
            operation.error(None, format!("request for {object} failed: {err}"))
        }
        CallFailure::Decode(err) => operation
            .error(None, format!("failed to deserialize server response ({object}): {err}")),
        CallFailure::MissingField(field) => operation.error(
            None,
            format!("failed to deserialize server response ({object}): missing field `{field}`"),
        ),
    };

    warn!(?operation, status_code = ?mapped.status_code(), error = %mapped, "Payout recipient call failed");
    mapped
}
