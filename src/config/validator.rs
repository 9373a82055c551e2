//! Configuration validation.

use crate::error::{ConfigError, InspectorError, Result};
use std::ops::RangeInclusive;
use tracing::debug;

use super::spec::InspectorConfig;

/// Allowed address column widths.
const ADDRESS_WIDTH_RANGE: RangeInclusive<usize> = 10..=500;

/// Validator for inspector configurations.
#[derive(Debug, Default)]
pub struct ConfigValidator;

/// A single validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The field path that failed validation.
    pub field: String,
    /// The error message.
    pub message: String,
}

impl ConfigValidator {
    /// Creates a new validator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Validates a configuration.
    ///
    /// # Errors
    ///
    /// Returns the first validation error found.
    pub fn validate(&self, config: &InspectorConfig) -> Result<()> {
        debug!("Validating configuration");
        match self.collect_errors(config).into_iter().next() {
            Some(err) => Err(InspectorError::Config(ConfigError::validation(
                err.message,
                err.field,
            ))),
            None => Ok(()),
        }
    }

    /// Collects every validation error in the configuration.
    #[must_use]
    pub fn collect_errors(&self, config: &InspectorConfig) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        let width = config.display.max_address_width;
        if !ADDRESS_WIDTH_RANGE.contains(&width) {
            errors.push(ValidationError {
                field: String::from("display.max_address_width"),
                message: format!(
                    "must be between {} and {}, got {width}",
                    ADDRESS_WIDTH_RANGE.start(),
                    ADDRESS_WIDTH_RANGE.end()
                ),
            });
        }

        if config.filter.sections.is_empty() {
            errors.push(ValidationError {
                field: String::from("filter.sections"),
                message: String::from("at least one section must be selected"),
            });
        }

        if config.filter.actions.is_empty() {
            errors.push(ValidationError {
                field: String::from("filter.actions"),
                message: String::from("at least one action must be selected"),
            });
        }

        errors
    }
}
