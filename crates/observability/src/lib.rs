//! Observability infrastructure for the order tracker
//!
//! This crate provides:
//! - Structured logging via tracing
//! - Prometheus export of the metrics emitted by the `oms` crate
//!
//! # Quick Start
//!
//! ```ignore
//! use observability::{init_logging, LogFormat};
//!
//! // Initialize logging
//! init_logging("order-tracker", LogFormat::Pretty)?;
//!
//! // Expose metrics (optional)
//! observability::metrics::init_metrics(9090)?;
//! ```

pub mod logging;
pub mod metrics;

pub use self::logging::{init_from_config, init_logging, LogFormat};
pub use self::metrics::{init_metrics, init_metrics_from_config, install_recorder};
