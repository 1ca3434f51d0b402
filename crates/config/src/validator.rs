use crate::*;
use thiserror::Error;

const VALID_LOG_FORMATS: [&str; 3] = ["pretty", "json", "compact"];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} must be a positive integer")]
    InvalidPositiveInteger { field: String },

    #[error("Invalid log format: {0}. Must be one of: pretty, json, compact")]
    InvalidLogFormat(String),

    #[error("Logging filter must not be empty")]
    EmptyLogFilter,

    #[error("Environment variable placeholder left unresolved in {field}: {value}")]
    UnresolvedEnvVar { field: String, value: String },
}

#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, field: &str, message: &str) {
        self.warnings.push(ValidationWarning {
            field: field.to_string(),
            message: message.to_string(),
        });
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

pub fn validate_config(config: &TrackerConfig) -> ValidationReport {
    let mut report = ValidationReport::new();

    validate_tracker(&config.tracker, &mut report);
    validate_logging(&config.logging, &mut report);
    validate_metrics(&config.metrics, &mut report);

    report
}

fn validate_tracker(tracker: &OmsConfig, report: &mut ValidationReport) {
    if tracker.initial_capacity == 0 {
        report.add_error(ValidationError::InvalidPositiveInteger {
            field: "tracker.initial_capacity".to_string(),
        });
    }
}

fn validate_logging(logging: &LoggingConfig, report: &mut ValidationReport) {
    if has_unresolved_env_vars(&logging.format) {
        report.add_error(ValidationError::UnresolvedEnvVar {
            field: "logging.format".to_string(),
            value: logging.format.clone(),
        });
    } else if !VALID_LOG_FORMATS.contains(&logging.format.to_lowercase().as_str()) {
        report.add_error(ValidationError::InvalidLogFormat(logging.format.clone()));
    }

    if logging.filter.trim().is_empty() {
        report.add_error(ValidationError::EmptyLogFilter);
    } else if has_unresolved_env_vars(&logging.filter) {
        report.add_error(ValidationError::UnresolvedEnvVar {
            field: "logging.filter".to_string(),
            value: logging.filter.clone(),
        });
    }
}

fn validate_metrics(metrics: &MetricsConfig, report: &mut ValidationReport) {
    if !metrics.enabled {
        return;
    }

    if metrics.port == 0 {
        report.add_error(ValidationError::InvalidPositiveInteger {
            field: "metrics.port".to_string(),
        });
    } else if metrics.port < 1024 {
        report.add_warning(
            "metrics.port",
            &format!("Port {} is privileged and may require elevated permissions", metrics.port),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let report = validate_config(&generate_default_config());
        assert!(report.is_valid());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let mut config = generate_default_config();
        config.tracker.initial_capacity = 0;

        let report = validate_config(&config);

        assert!(!report.is_valid());
        assert_eq!(
            report.errors,
            vec![ValidationError::InvalidPositiveInteger {
                field: "tracker.initial_capacity".to_string()
            }]
        );
    }

    #[test]
    fn test_logging_errors_are_collected() {
        let mut config = generate_default_config();
        config.logging.format = "xml".to_string();
        config.logging.filter = "  ".to_string();

        let report = validate_config(&config);

        assert_eq!(report.errors.len(), 2);
        assert!(report.errors.contains(&ValidationError::InvalidLogFormat("xml".to_string())));
        assert!(report.errors.contains(&ValidationError::EmptyLogFilter));
    }

    #[test]
    fn test_unresolved_placeholder_reported() {
        let mut config = generate_default_config();
        config.logging.format = "${LOG_FORMAT}".to_string();

        let report = validate_config(&config);

        assert!(matches!(
            report.errors.as_slice(),
            [ValidationError::UnresolvedEnvVar { field, .. }] if field == "logging.format"
        ));
    }

    #[test]
    fn test_metrics_port_checked_only_when_enabled() {
        let mut config = generate_default_config();
        config.metrics.port = 0;
        assert!(validate_config(&config).is_valid());

        config.metrics.enabled = true;
        assert!(!validate_config(&config).is_valid());

        config.metrics.port = 80;
        let report = validate_config(&config);
        assert!(report.is_valid());
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].field, "metrics.port");
    }
}
