//! Payout recipients client
//!
//! Every operation follows the same shape: fetch the payout token, stamp
//! token and guid on the outgoing body, make one transport call, decode the
//! response. No retries or paging happen here.

use std::sync::Arc;

use payouts_domain::constants::{NOTIFICATIONS_SEGMENT, RECIPIENTS_PATH};
use payouts_domain::{
    is_success_status, ClientConfig, ClientError, Facade, PayoutRecipient, PayoutRecipientError,
    PayoutRecipients, RecipientOperation, RecipientQuery,
};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, instrument, warn};

use super::mapping::{call_and_map, serialize, CallFailure};
use crate::api::{AccessTokenProvider, AccessTokens, GuidGenerator, RestTransport, Transport, UuidGenerator};

const RECIPIENT: &str = "PayoutRecipient";
const RECIPIENTS: &str = "PayoutRecipients";

#[derive(Serialize)]
struct TokenBody<'a> {
    token: &'a str,
}

/// Client for the `recipients` resource
///
/// Holds no state besides its collaborators; safe to share across tasks.
#[derive(Clone)]
pub struct PayoutRecipientsClient {
    transport: Arc<dyn Transport>,
    tokens: Arc<dyn AccessTokenProvider>,
    guids: Arc<dyn GuidGenerator>,
}

impl PayoutRecipientsClient {
    pub fn new(
        transport: Arc<dyn Transport>,
        tokens: Arc<dyn AccessTokenProvider>,
        guids: Arc<dyn GuidGenerator>,
    ) -> Self {
        Self { transport, tokens, guids }
    }

    /// Wire the default collaborators from configuration: a [`RestTransport`],
    /// the configured [`AccessTokens`] and random UUID guids.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Config` if the transport cannot be built or a
    /// token key names no known facade.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        let transport = RestTransport::from_config(config)?;
        let tokens = AccessTokens::from_config(config)?;

        Ok(Self::new(Arc::new(transport), Arc::new(tokens), Arc::new(UuidGenerator)))
    }

    async fn payout_token(&self) -> Result<String, ClientError> {
        self.tokens.access_token(Facade::Payout).await
    }

    /// Submit recipients in bulk.
    ///
    /// # Errors
    ///
    /// `Creation` on serialization, network or decoding failures; provider
    /// API errors are returned unchanged as `Client`.
    #[instrument(skip(self, recipients), fields(count = recipients.recipients.len()))]
    pub async fn submit_payout_recipients(
        &self,
        mut recipients: PayoutRecipients,
    ) -> Result<Vec<PayoutRecipient>, PayoutRecipientError> {
        let operation = RecipientOperation::Creation;
        recipients.apply_credentials(self.payout_token().await?, self.guids.generate());
        let json = serialize(operation, RECIPIENTS, &recipients)?;

        let created = call_and_map(operation, RECIPIENTS, async {
            let response = self.transport.post(RECIPIENTS_PATH, json, true).await?;
            let body = self.transport.response_to_json_string(response)?;
            Ok::<_, CallFailure>(serde_json::from_str::<Vec<PayoutRecipient>>(&body)?)
        })
        .await?;

        info!(created = created.len(), "Payout recipients submitted");
        Ok(created)
    }

    /// List recipients, optionally filtered by status and paged.
    ///
    /// # Errors
    ///
    /// `Query` on network or decoding failures; provider API errors are
    /// returned unchanged as `Client`.
    #[instrument(skip(self))]
    pub async fn get_payout_recipients(
        &self,
        query: &RecipientQuery,
    ) -> Result<Vec<PayoutRecipient>, PayoutRecipientError> {
        let operation = RecipientOperation::Query;
        let params = query.to_params(&self.payout_token().await?);

        let recipients = call_and_map(operation, RECIPIENTS, async {
            let response = self.transport.get(RECIPIENTS_PATH, &params, true).await?;
            let body = self.transport.response_to_json_string(response)?;
            Ok::<_, CallFailure>(serde_json::from_str::<Vec<PayoutRecipient>>(&body)?)
        })
        .await?;

        info!(returned = recipients.len(), "Payout recipients retrieved");
        Ok(recipients)
    }

    /// Fetch one recipient by id.
    ///
    /// # Errors
    ///
    /// `Query` for an empty or dot-segment id, and on network or decoding failures; provider API errors are
    /// returned unchanged as `Client`.
    #[instrument(skip(self))]
    pub async fn get_payout_recipient(
        &self,
        recipient_id: &str,
    ) -> Result<PayoutRecipient, PayoutRecipientError> {
        let operation = RecipientOperation::Query;
        let path = recipient_path(operation, recipient_id)?;
        let params = RecipientQuery::new().to_params(&self.payout_token().await?);

        call_and_map(operation, RECIPIENT, async {
            let response = self.transport.get(&path, &params, true).await?;
            let body = self.transport.response_to_json_string(response)?;
            Ok::<_, CallFailure>(serde_json::from_str::<PayoutRecipient>(&body)?)
        })
        .await
    }

    /// Replace a recipient's provider-defined fields.
    ///
    /// # Errors
    ///
    /// `Update` on serialization, network or decoding failures; provider API
    /// errors are returned unchanged as `Client`.
    #[instrument(skip(self, recipient))]
    pub async fn update_payout_recipient(
        &self,
        recipient_id: &str,
        mut recipient: PayoutRecipient,
    ) -> Result<PayoutRecipient, PayoutRecipientError> {
        let operation = RecipientOperation::Update;
        let path = recipient_path(operation, recipient_id)?;
        recipient.apply_credentials(self.payout_token().await?, self.guids.generate());
        let json = serialize(operation, RECIPIENT, &recipient)?;

        let updated = call_and_map(operation, RECIPIENT, async {
            let response = self.transport.update(&path, json).await?;
            let body = self.transport.response_to_json_string(response)?;
            Ok::<_, CallFailure>(serde_json::from_str::<PayoutRecipient>(&body)?)
        })
        .await?;

        info!("Payout recipient updated");
        Ok(updated)
    }

    /// Remove a recipient. Returns whether the provider reported success.
    ///
    /// # Errors
    ///
    /// `Cancellation` for every failure after the token lookup, carrying the
    /// provider's status code and reason when the provider rejected the call.
    #[instrument(skip(self))]
    pub async fn delete_payout_recipient(&self, recipient_id: &str) -> Result<bool, PayoutRecipientError> {
        let operation = RecipientOperation::Cancellation;
        let path = recipient_path(operation, recipient_id)?;
        let params = RecipientQuery::new().to_params(&self.payout_token().await?);

        let deleted = call_and_map(operation, RECIPIENT, async {
            let response = self.transport.delete(&path, &params).await?;
            let body = self.transport.response_to_json_string(response)?;
            action_succeeded(&body)
        })
        .await?;

        info!(deleted, "Payout recipient delete requested");
        Ok(deleted)
    }

    /// Ask the provider to resend the recipient's notification. Returns
    /// whether the provider reported success.
    ///
    /// # Errors
    ///
    /// `Notification` for every failure after the token lookup, carrying the
    /// provider's status code and reason when the provider rejected the call.
    #[instrument(skip(self))]
    pub async fn request_payout_recipient_notification(
        &self,
        recipient_id: &str,
    ) -> Result<bool, PayoutRecipientError> {
        let operation = RecipientOperation::Notification;
        let path = format!("{}/{NOTIFICATIONS_SEGMENT}", recipient_path(operation, recipient_id)?);
        let token = self.payout_token().await?;
        let json = serialize(operation, RECIPIENT, &TokenBody { token: &token })?;

        let sent = call_and_map(operation, RECIPIENT, async {
            let response = self.transport.post(&path, json, true).await?;
            let body = self.transport.response_to_json_string(response)?;
            action_succeeded(&body)
        })
        .await?;

        info!(sent, "Payout recipient notification requested");
        Ok(sent)
    }
}

/// `recipients/{id}` with the id percent-encoded as one path segment.
///
/// Empty and dot-segment ids are rejected since they would resolve to a
/// different resource.
fn recipient_path(
    operation: RecipientOperation,
    recipient_id: &str,
) -> Result<String, PayoutRecipientError> {
    if matches!(recipient_id.trim(), "" | "." | "..") {
        warn!(?operation, recipient_id, "Rejected recipient id");
        return Err(operation.error(None, format!("invalid recipient id '{recipient_id}'")));
    }
    Ok(format!("{RECIPIENTS_PATH}/{}", urlencoding::encode(recipient_id)))
}

/// Reads the `status` field of an action response.
fn action_succeeded(body: &str) -> Result<bool, CallFailure> {
    let node: Value = serde_json::from_str(body)?;
    let status = node.get("status").ok_or(CallFailure::MissingField("status"))?;
    Ok(is_success_status(status))
}
