//! Configuration loading
//!
//! Loads [`ClientConfig`](payouts_domain::ClientConfig) from environment
//! variables or a JSON/TOML file.

pub mod loader;

// Re-export commonly used items
pub use loader::{load, load_from_env, load_from_file, parse_config, probe_config_paths};
