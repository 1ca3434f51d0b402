use serde::{Deserialize, Serialize};

pub mod defaults;
pub mod parser;
pub mod substitution;
pub mod validator;

pub use defaults::*;
pub use parser::*;
pub use substitution::*;
pub use validator::*;

/// Root of the tracker configuration file
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TrackerConfig {
    #[serde(default)]
    pub tracker: OmsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

/// Settings for the order manager itself
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OmsConfig {
    /// Number of orders the index is sized for up front
    #[serde(rename = "initial_capacity")]
    #[serde(default = "default_initial_capacity")]
    pub initial_capacity: usize,
    /// Reject non-positive prices and quantities on insert and fill
    #[serde(rename = "strict_validation")]
    #[serde(default)]
    pub strict_validation: bool,
}

impl Default for OmsConfig {
    fn default() -> Self {
        Self {
            initial_capacity: default_initial_capacity(),
            strict_validation: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// One of `pretty`, `json`, `compact`
    #[serde(default = "default_log_format")]
    pub format: String,
    /// `EnvFilter` directive, overridden by `RUST_LOG` when set
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: default_log_format(),
            filter: default_log_filter(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MetricsConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_metrics_port")]
    pub port: u16,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            port: default_metrics_port(),
        }
    }
}
