//! Configuration loader
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If `PAYOUTS_ENVIRONMENT` is not set, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `PAYOUTS_ENVIRONMENT`: `test` or `prod` (required for env loading)
//! - `PAYOUTS_API_URL`: Base URL override
//! - `PAYOUTS_TIMEOUT_SECS`: Per-request timeout in seconds
//! - `PAYOUTS_MAX_ATTEMPTS`: Total HTTP attempts per request
//! - `PAYOUTS_BASE_BACKOFF_MS`: Delay before the first retry
//! - `PAYOUTS_PROXY_URL`: Egress proxy for all provider traffic
//! - `PAYOUTS_MERCHANT_TOKEN`, `PAYOUTS_PAYOUT_TOKEN`, `PAYOUTS_POS_TOKEN`:
//!   Access tokens per facade
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./payouts.json` or `./payouts.toml` (current working directory)
//! 2. `./config.json` or `./config.toml` (current working directory)
//! 3. Relative to executable location

use std::path::{Path, PathBuf};
use std::str::FromStr;

use payouts_domain::{ClientConfig, ClientError, Environment, Facade, Result};

const FILE_NAMES: [&str; 4] = ["payouts.json", "payouts.toml", "config.json", "config.toml"];

/// Load configuration with automatic fallback strategy
///
/// # Errors
/// Returns `ClientError::Config` if configuration cannot be loaded from
/// either source or a value is invalid.
pub fn load() -> Result<ClientConfig> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!(environment = %config.environment, "Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// Only `PAYOUTS_ENVIRONMENT` is required; every other value falls back to
/// the [`ClientConfig`] default.
///
/// # Errors
/// Returns `ClientError::Config` if `PAYOUTS_ENVIRONMENT` is missing or a
/// variable has an invalid value.
pub fn load_from_env() -> Result<ClientConfig> {
    let environment =
        env_var("PAYOUTS_ENVIRONMENT").and_then(|s| Environment::from_str(&s).map_err(ClientError::Config))?;

    let mut config = ClientConfig { environment, ..ClientConfig::default() };
    config.api_url = non_blank_var("PAYOUTS_API_URL");
    config.proxy_url = non_blank_var("PAYOUTS_PROXY_URL");

    if let Some(timeout) = env_parse::<u64>("PAYOUTS_TIMEOUT_SECS", "timeout")? {
        config.timeout_secs = timeout;
    }
    if let Some(attempts) = env_parse::<usize>("PAYOUTS_MAX_ATTEMPTS", "max attempts")? {
        config.max_attempts = attempts;
    }
    if let Some(backoff) = env_parse::<u64>("PAYOUTS_BASE_BACKOFF_MS", "base backoff")? {
        config.base_backoff_ms = backoff;
    }

    for facade in Facade::ALL {
        let key = format!("PAYOUTS_{}_TOKEN", facade.as_str().to_ascii_uppercase());
        if let Ok(token) = std::env::var(&key) {
            config.tokens.insert(facade.to_string(), token);
        }
    }

    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes the standard locations for a config file.
///
/// # Errors
/// Returns `ClientError::Config` if the file is missing, unreadable or
/// malformed.
pub fn load_from_file(path: Option<PathBuf>) -> Result<ClientConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(ClientError::Config(format!("Config file not found: {}", p.display())));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            ClientError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| ClientError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
///
/// # Errors
/// Returns `ClientError::Config` if format is invalid or parsing fails.
pub fn parse_config(contents: &str, path: &Path) -> Result<ClientConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    let config: ClientConfig = match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| ClientError::Config(format!("Invalid TOML format: {}", e)))?,
        "json" => serde_json::from_str(contents)
            .map_err(|e| ClientError::Config(format!("Invalid JSON format: {}", e)))?,
        _ => return Err(ClientError::Config(format!("Unsupported config format: {}", extension))),
    };

    config.facade_tokens()?;
    Ok(config)
}

/// Probe the standard locations for a configuration file
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut dirs = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            dirs.push(exe_dir.to_path_buf());
        }
    }

    dirs.iter()
        .flat_map(|dir| FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.exists())
}

/// Get required environment variable
fn env_var(key: &str) -> Result<String> {
    std::env::var(key)
        .map_err(|_| ClientError::Config(format!("Missing required environment variable: {}", key)))
}

fn non_blank_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|s| !s.trim().is_empty())
}

/// Parse an optional environment variable, failing on malformed values.
fn env_parse<T: FromStr>(key: &str, label: &str) -> Result<Option<T>>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| ClientError::Config(format!("Invalid {}: {}", label, e))),
        Err(_) => Ok(None),
    }
}
