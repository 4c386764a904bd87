//! Retrying HTTP client shared by the provider transport

pub mod client;
pub mod retry;

pub use client::HttpClient;
pub use retry::{Replay, RetryPolicy};
