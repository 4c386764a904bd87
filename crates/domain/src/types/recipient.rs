//! Payout recipient records
//!
//! `token` and `guid` are request-only fields: the client overwrites them
//! right before a request is serialized and the provider does not echo them
//! back verbatim. Every other field is provider-defined and passed through.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single payee managed through the recipients resource
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoutRecipient {
    /// Provider-assigned identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(rename = "notificationURL", skip_serializing_if = "Option::is_none")]
    pub notification_url: Option<String>,
    /// Lifecycle status as reported by the provider (e.g. "invited", "active")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shopper_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guid: Option<String>,
    /// Fields this crate does not model, kept verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PayoutRecipient {
    /// Create a recipient to invite by email.
    pub fn new(
        email: impl Into<String>,
        label: Option<String>,
        notification_url: Option<String>,
    ) -> Self {
        Self { email: Some(email.into()), label, notification_url, ..Self::default() }
    }

    /// Overwrite the request credentials.
    pub fn apply_credentials(&mut self, token: String, guid: String) {
        self.token = Some(token);
        self.guid = Some(guid);
    }

    /// Copy of this record with the request-only fields cleared.
    #[must_use]
    pub fn without_credentials(&self) -> Self {
        Self { token: None, guid: None, ..self.clone() }
    }
}

/// Bulk submission envelope
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoutRecipients {
    pub recipients: Vec<PayoutRecipient>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guid: Option<String>,
}

impl PayoutRecipients {
    pub fn new(recipients: Vec<PayoutRecipient>) -> Self {
        Self { recipients, token: None, guid: None }
    }

    /// Overwrite the envelope credentials.
    ///
    /// Per-entry credentials are cleared: only the envelope authenticates a
    /// bulk submission.
    pub fn apply_credentials(&mut self, token: String, guid: String) {
        for recipient in &mut self.recipients {
            recipient.token = None;
            recipient.guid = None;
        }
        self.token = Some(token);
        self.guid = Some(guid);
    }
}
