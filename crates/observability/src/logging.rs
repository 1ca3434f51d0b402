//! Logging initialization and configuration
//!
//! Sets up the tracing subscriber the tracker's event handlers log through.

use anyhow::Context;
use config::LoggingConfig;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    #[default]
    Pretty,
    /// JSON format for structured logging (better for log aggregation)
    Json,
    /// Compact format (less verbose than pretty)
    Compact,
}

impl LogFormat {
    /// Parse from string (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pretty" => Some(Self::Pretty),
            "json" => Some(Self::Json),
            "compact" => Some(Self::Compact),
            _ => None,
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("unknown log format: {}", s))
    }
}

/// Build the level filter: `RUST_LOG` wins, then `fallback`
fn build_filter(fallback: &str) -> anyhow::Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(fallback)
            .with_context(|| format!("invalid log filter: {}", fallback)),
    }
}

fn install(filter: EnvFilter, format: LogFormat) -> anyhow::Result<()> {
    let registry = tracing_subscriber::registry().with(filter);

    let result = match format {
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(true)
                    .with_line_number(true)
                    .with_ansi(true),
            )
            .try_init(),
        LogFormat::Json => registry.with(fmt::layer().json()).try_init(),
        LogFormat::Compact => registry.with(fmt::layer().compact()).try_init(),
    };

    result.context("global tracing subscriber already installed")
}

/// Initialize the logging system
///
/// The log level can be controlled via the `RUST_LOG` environment variable
/// and defaults to `info`.
///
/// # Example
///
/// ```ignore
/// use observability::{init_logging, LogFormat};
///
/// init_logging("order-tracker", LogFormat::Json)?;
/// tracing::info!("Tracker started");
/// ```
pub fn init_logging(service_name: &str, format: LogFormat) -> anyhow::Result<()> {
    install(build_filter("info")?, format)?;

    tracing::info!(
        service = service_name,
        format = ?format,
        "Logging initialized"
    );

    Ok(())
}

/// Initialize logging from the `logging` section of the tracker config
pub fn init_from_config(service_name: &str, config: &LoggingConfig) -> anyhow::Result<()> {
    let format = config
        .format
        .parse::<LogFormat>()
        .map_err(anyhow::Error::msg)?;

    install(build_filter(&config.filter)?, format)?;

    tracing::info!(
        service = service_name,
        format = ?format,
        filter = %config.filter,
        "Logging initialized from config"
    );

    Ok(())
}
