//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (status codes, timeouts, addresses)
//! - Detect duplicate rule patterns
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GateConfig → Result<(), Vec<ValidationError>>
//! - Pattern syntax is checked by rule compilation, not here

use std::collections::HashSet;
use std::net::SocketAddr;

use axum::http::Method;

use crate::config::schema::GateConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a socket address")]
    InvalidBindAddress(String),

    #[error("observability.metrics_address '{0}' is not a socket address")]
    InvalidMetricsAddress(String),

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroRequestTimeout,

    #[error("redirect.default_status_code {0} is not a redirect status (300-308)")]
    InvalidDefaultStatus(u16),

    #[error("redirect rule #{0} has an empty pattern")]
    EmptyPattern(usize),

    #[error("redirect pattern '{0}' is declared more than once")]
    DuplicatePattern(String),

    #[error("redirect.filter.methods contains invalid method '{0}'")]
    InvalidFilterMethod(String),
}

/// Check `config` for semantic errors.
pub fn validate_config(config: &GateConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    let redirect = &config.redirect;
    if !(300..=308).contains(&redirect.default_status_code) {
        errors.push(ValidationError::InvalidDefaultStatus(redirect.default_status_code));
    }

    let mut seen = HashSet::new();
    for (index, rule) in redirect.all_rules().into_iter().enumerate() {
        if rule.pattern.is_empty() {
            errors.push(ValidationError::EmptyPattern(index));
        } else if !seen.insert(rule.pattern.clone()) {
            errors.push(ValidationError::DuplicatePattern(rule.pattern));
        }
    }

    for method in &redirect.filter.methods {
        if Method::from_bytes(method.to_uppercase().as_bytes()).is_err() {
            errors.push(ValidationError::InvalidFilterMethod(method.clone()));
        }
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
    use crate::config::RuleConfig;

    fn rule(pattern: &str) -> RuleConfig {
        RuleConfig {
            pattern: pattern.into(),
            target: "/x".into(),
            status_code: None,
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&GateConfig::default()), Ok(()));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = GateConfig::default();
        config.listener.bind_address = "not-an-address".into();
        config.timeouts.request_secs = 0;
        config.redirect.default_status_code = 200;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::InvalidBindAddress("not-an-address".into()),
                ValidationError::ZeroRequestTimeout,
                ValidationError::InvalidDefaultStatus(200),
            ]
        );
    }

    #[test]
    fn test_duplicates_across_rules_and_targets() {
        let mut config = GateConfig::default();
        config.redirect.rules.push(rule("/old"));
        config.redirect.targets.insert("/old".into(), "/other".into());

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors, vec![ValidationError::DuplicatePattern("/old".into())]);
    }

    #[test]
    fn test_empty_pattern() {
        let mut config = GateConfig::default();
        config.redirect.rules.push(rule("/a"));
        config.redirect.rules.push(rule(""));

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors, vec![ValidationError::EmptyPattern(1)]);
    }

    #[test]
    fn test_metrics_address_only_checked_when_enabled() {
        let mut config = GateConfig::default();
        config.observability.metrics_address = "nope".into();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        assert_eq!(
            validate_config(&config).unwrap_err(),
            vec![ValidationError::InvalidMetricsAddress("nope".into())]
        );
    }

    #[test]
    fn test_invalid_filter_method() {
        let mut config = GateConfig::default();
        config.redirect.filter.methods = vec!["get".into(), "BAD METHOD".into()];

        assert_eq!(
            validate_config(&config).unwrap_err(),
            vec![ValidationError::InvalidFilterMethod("BAD METHOD".into())]
        );
    }
}
