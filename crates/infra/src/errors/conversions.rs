//! Conversions from external infrastructure errors into domain errors.

use payouts_domain::ClientError;
use reqwest::Error as HttpError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub ClientError);

impl From<InfraError> for ClientError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<ClientError> for InfraError {
    fn from(value: ClientError) -> Self {
        InfraError(value)
    }
}

/// Conversion of third-party errors into the domain error.
pub trait IntoClientError {
    fn into_client_error(self) -> ClientError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → ClientError */
/* -------------------------------------------------------------------------- */

impl IntoClientError for HttpError {
    fn into_client_error(self) -> ClientError {
        if self.is_timeout() {
            return ClientError::Network("HTTP request timed out".into());
        }

        #[cfg(not(target_arch = "wasm32"))]
        if self.is_connect() {
            return ClientError::Network(format!("HTTP connection failure: {self}"));
        }

        if let Some(status) = self.status() {
            return ClientError::api(
                Some(status.as_u16()),
                status.canonical_reason().unwrap_or("unknown status"),
            );
        }

        if self.is_builder() {
            return ClientError::Config(format!("invalid HTTP request: {self}"));
        }

        if self.is_body() || self.is_decode() {
            return ClientError::InvalidResponse(format!("failed to read response body: {self}"));
        }

        ClientError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_client_error())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
