//! # Payouts Domain
//!
//! Business domain types for the payout recipients API.
//!
//! This crate contains:
//! - Recipient data types (`PayoutRecipient`, `PayoutRecipients`)
//! - Query parameter model for recipient listing
//! - Facade identifiers used to scope access tokens
//! - Error taxonomy and Result definitions
//! - Client configuration structures
//!
//! ## Architecture
//! - No dependencies on other workspace crates
//! - Only external dependencies allowed
//! - Pure data structures and pure helpers (no I/O)

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
pub use utils::status::{is_success_status, normalize_status};
