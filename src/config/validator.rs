//! Configuration validation rules.
//!
//! - At least one resource must be configured
//! - Resource names must be non-empty and unique
//! - Every resource needs a reference URL
//! - The HTTP timeout must be positive

use crate::config::schema::ScanConfig;
use crate::error::{Result, ToolprobeError};
use std::collections::HashSet;

/// Validation error with context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: String,
    /// Human-readable error message
    pub message: String,
    /// Resource name if error is resource-specific
    pub resource: Option<String>,
}

/// Validate a configuration and return all errors.
///
/// Collects every problem rather than stopping at the first one.
pub fn validate_config(config: &ScanConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if config.resources.is_empty() {
        errors.push(ValidationError {
            rule: "no-resources".to_string(),
            message: "At least one resource must be configured".to_string(),
            resource: None,
        });
    }

    let mut seen = HashSet::new();
    for resource in &config.resources {
        if resource.name.trim().is_empty() {
            errors.push(ValidationError {
                rule: "empty-name".to_string(),
                message: "Resource names must not be empty".to_string(),
                resource: None,
            });
            continue;
        }

        if !seen.insert(resource.name.as_str()) {
            errors.push(ValidationError {
                rule: "duplicate-resource".to_string(),
                message: format!("Resource '{}' is defined more than once", resource.name),
                resource: Some(resource.name.clone()),
            });
        }

        if resource.url.trim().is_empty() {
            errors.push(ValidationError {
                rule: "missing-url".to_string(),
                message: format!("Resource '{}' has no reference url", resource.name),
                resource: Some(resource.name.clone()),
            });
        }
    }

    if config.settings.http_timeout_secs == 0 {
        errors.push(ValidationError {
            rule: "zero-timeout".to_string(),
            message: "settings.http_timeout_secs must be greater than zero".to_string(),
            resource: None,
        });
    }

    errors
}

/// Validate and fail with all messages joined.
pub fn validate(config: &ScanConfig) -> Result<()> {
    let errors = validate_config(config);
    if errors.is_empty() {
        return Ok(());
    }

    Err(ToolprobeError::ConfigValidationError {
        message: errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; "),
    })
}
