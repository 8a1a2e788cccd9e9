//! Observability infrastructure for the forecast contract.
//!
//! Structured logging with consistent spans. This module provides
//! initialization helpers and a span constructor so every invocation is
//! logged with the same fields.

use std::sync::Once;
use tracing::Span;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

static INIT: Once = Once::new();

/// Log output format.
#[derive(Debug, Clone, Copy, Default)]
pub enum LogFormat {
    /// JSON structured logs (for production).
    Json,
    /// Pretty-printed logs (for development).
    #[default]
    Pretty,
}

/// Initializes the logging subsystem.
///
/// Call once at application startup. Safe to call multiple times;
/// subsequent calls are no-ops.
///
/// # Environment Variables
///
/// - `RUST_LOG`: Controls log levels (e.g., `info`, `forecast_contract=debug`)
///
/// # Example
///
/// ```rust
/// use forecast_core::observability::{init_logging, LogFormat};
///
/// init_logging(LogFormat::Pretty);
/// ```
pub fn init_logging(format: LogFormat) {
    INIT.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        match format {
            LogFormat::Json => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(fmt::layer().json())
                    .init();
            }
            LogFormat::Pretty => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(fmt::layer().pretty())
                    .init();
            }
        }
    });
}

/// Creates a span for a contract invocation.
///
/// # Example
///
/// ```rust
/// use forecast_core::observability::invoke_span;
///
/// let span = invoke_span("addForecast");
/// let _guard = span.enter();
/// // ... handle the invocation
/// ```
#[must_use]
pub fn invoke_span(function: &str) -> Span {
    tracing::info_span!("invoke", function = function)
}
