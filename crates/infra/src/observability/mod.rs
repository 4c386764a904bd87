//! Structured logging setup
//!
//! Library code only emits `tracing` events and spans. Binaries and tests
//! call [`init_tracing`] once to install a subscriber.

use std::io;

use payouts_domain::{ClientError, Result};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Filter used when neither `filter` nor `RUST_LOG` is given.
pub const DEFAULT_FILTER: &str = "info";

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable output for development
    #[default]
    Pretty,
    /// One JSON object per line for log aggregation
    Json,
}

impl LogFormat {
    /// Reads `PAYOUTS_LOG_FORMAT` (`json` or `pretty`, default `pretty`).
    pub fn from_env() -> Self {
        match std::env::var("PAYOUTS_LOG_FORMAT").unwrap_or_default().trim().to_ascii_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Pretty,
        }
    }
}

/// Build the level filter.
///
/// An explicit directive wins over `RUST_LOG`; with neither, falls back to
/// [`DEFAULT_FILTER`].
///
/// # Errors
/// Returns `ClientError::Config` if the explicit directive is malformed.
pub fn build_filter(filter: Option<&str>) -> Result<EnvFilter> {
    match filter {
        Some(directive) => EnvFilter::try_new(directive)
            .map_err(|e| ClientError::Config(format!("Invalid log filter '{directive}': {e}"))),
        None => Ok(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))),
    }
}

/// Install the global tracing subscriber, writing to stderr.
///
/// # Errors
/// Returns `ClientError::Config` if the filter is malformed or a global
/// subscriber is already installed.
pub fn init_tracing(filter: Option<&str>, format: LogFormat) -> Result<()> {
    let registry = tracing_subscriber::registry().with(build_filter(filter)?);

    let installed = match format {
        LogFormat::Pretty => registry
            .with(fmt::layer().with_target(true).with_span_events(FmtSpan::CLOSE).with_writer(io::stderr))
            .try_init(),
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_target(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .with_writer(io::stderr),
            )
            .try_init(),
    };

    installed.map_err(|e| ClientError::Config(format!("Failed to install tracing subscriber: {e}")))
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use once_cell::sync::Lazy;

    use super::*;

    static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    #[test]
    fn log_format_reads_environment() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");

        std::env::set_var("PAYOUTS_LOG_FORMAT", " JSON ");
        assert_eq!(LogFormat::from_env(), LogFormat::Json);

        std::env::set_var("PAYOUTS_LOG_FORMAT", "yaml");
        assert_eq!(LogFormat::from_env(), LogFormat::Pretty);

        std::env::remove_var("PAYOUTS_LOG_FORMAT");
        assert_eq!(LogFormat::from_env(), LogFormat::Pretty);
    }

    #[test]
    fn explicit_filter_is_parsed() {
        let filter = build_filter(Some("payouts_infra=debug,warn")).unwrap();
        assert!(filter.to_string().contains("payouts_infra=debug"));
    }

    #[test]
    fn malformed_filter_is_config_error() {
        let result = build_filter(Some("payouts_infra=loud"));
        assert!(matches!(result, Err(ClientError::Config(msg)) if msg.contains("loud")));
    }

    #[test]
    fn second_install_fails_instead_of_panicking() {
        let _ = init_tracing(Some("warn"), LogFormat::Pretty);
        let second = init_tracing(Some("warn"), LogFormat::Json);
        assert!(matches!(second, Err(ClientError::Config(_))));
    }
}
