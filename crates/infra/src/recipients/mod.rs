//! Payout recipients resource
//!
//! [`PayoutRecipientsClient`] maps each recipient operation onto one call
//! against the `recipients` resource. Failures are folded into
//! [`PayoutRecipientError`](payouts_domain::PayoutRecipientError) kinds by
//! the shared helpers in [`mapping`].

pub mod client;
pub mod mapping;

pub use client::PayoutRecipientsClient;
