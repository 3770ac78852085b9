//! Configuration validation.
//!
//! All problems are collected so a user can fix them in one pass.

use crate::check::Severity;
use crate::config::schema::AuditConfig;
use crate::error::{AuditError, Result};

/// A single configuration problem.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: &'static str,
    /// Human-readable error message
    pub message: String,
    /// Check id if the problem is check-specific
    pub check: Option<String>,
}

/// Collect every validation problem.
pub fn validate_config(config: &AuditConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if config.settings.workers == 0 {
        errors.push(ValidationError {
            rule: "workers-zero",
            message: "settings.workers must be at least 1".to_string(),
            check: None,
        });
    }

    for (id, check) in &config.checks {
        if let Some(severity) = &check.severity {
            if severity.parse::<Severity>().is_err() {
                errors.push(ValidationError {
                    rule: "unknown-severity",
                    message: format!(
                        "Check '{}' has unknown severity '{}' (expected critical, high or low)",
                        id, severity
                    ),
                    check: Some(id.clone()),
                });
            }
        }
    }

    errors
}

/// Validate, failing on the first severity problem or any other error.
///
/// Unknown severities surface as [`AuditError::InvalidSeverity`]; anything
/// else as [`AuditError::ConfigValidationError`].
pub fn validate(config: &AuditConfig) -> Result<()> {
    let errors = validate_config(config);
    if errors.is_empty() {
        return Ok(());
    }

    if let Some(error) = errors.iter().find(|e| e.rule == "unknown-severity") {
        let value = error
            .check
            .as_ref()
            .and_then(|id| config.checks.get(id))
            .and_then(|c| c.severity.clone())
            .unwrap_or_default();
        return Err(AuditError::InvalidSeverity { value });
    }

    Err(AuditError::ConfigValidationError {
        message: errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; "),
    })
}
