//! Domain types and models
//!
//! Flat data-transfer records for the recipients resource plus the facade
//! identifiers that scope access tokens.

pub mod facade;
pub mod query;
pub mod recipient;

pub use facade::Facade;
pub use query::RecipientQuery;
pub use recipient::{PayoutRecipient, PayoutRecipients};
