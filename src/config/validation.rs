//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parseable)
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::AppConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem with an accepted-by-serde configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("server.bind_address is not a valid socket address: {0}")]
    InvalidBindAddress(String),

    #[error("server.request_timeout_secs must be greater than zero")]
    ZeroRequestTimeout,

    #[error("server.max_body_bytes must be greater than zero")]
    ZeroBodyLimit,

    #[error("observability.metrics_address is not a valid socket address: {0}")]
    InvalidMetricsAddress(String),

    #[error("observability.log_level must be one of trace, debug, info, warn, error (got {0})")]
    InvalidLogLevel(String),
}

/// Check everything, collecting every failure.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.server.bind_address.clone(),
        ));
    }
    if config.server.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }
    if config.server.max_body_bytes == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    // The metrics address only matters when the exporter will bind to it.
    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }
    if !LOG_LEVELS.contains(&config.observability.log_level.as_str()) {
        errors.push(ValidationError::InvalidLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate_cleanly() {
        assert_eq!(validate_config(&AppConfig::default()), Ok(()));
    }

    #[test]
    fn bad_bind_address_is_rejected() {
        let mut config = AppConfig::default();
        config.server.bind_address = "not-an-address".to_string();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::InvalidBindAddress("not-an-address".to_string())]
        );
    }

    #[test]
    fn disabled_metrics_skip_the_address_check() {
        let mut config = AppConfig::default();
        config.observability.metrics_enabled = false;
        config.observability.metrics_address = "nonsense".to_string();

        assert_eq!(validate_config(&config), Ok(()));
    }

    #[test]
    fn every_problem_is_reported_at_once() {
        let mut config = AppConfig::default();
        config.server.bind_address = "bad".to_string();
        config.server.request_timeout_secs = 0;
        config.server.max_body_bytes = 0;
        config.observability.log_level = "loud".to_string();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(&ValidationError::ZeroRequestTimeout));
        assert!(errors.contains(&ValidationError::InvalidLogLevel("loud".to_string())));
    }
}
