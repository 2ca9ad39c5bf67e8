//! Configuration validation for rmm-tools.

use super::types::{AppConfig, FilterConfig, OutputConfig, ScoringConfig};
use crate::error::{Result, RmmError};

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Fail with [`RmmError::Config`] listing every problem found.
    fn ensure_valid(&self) -> Result<()> {
        let errors = self.validate();
        if errors.is_empty() {
            return Ok(());
        }
        let details = errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        Err(RmmError::config(details))
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.scoring.validate());
        errors.extend(self.filter.validate());
        errors.extend(self.output.validate());
        errors
    }
}

/// Push an error unless `value` is finite and inside `range`.
fn check_range(
    errors: &mut Vec<ConfigError>,
    field: &str,
    value: f64,
    range: std::ops::RangeInclusive<f64>,
) {
    if !value.is_finite() || !range.contains(&value) {
        errors.push(ConfigError::new(
            field,
            format!(
                "must be between {} and {}, got {value}",
                range.start(),
                range.end()
            ),
        ));
    }
}

impl Validatable for ScoringConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        check_range(&mut errors, "scoring.penalty_step", self.penalty_step, 0.0..=4.0);
        check_range(&mut errors, "scoring.max_dispersion", self.max_dispersion, 0.0..=4.0);
        check_range(
            &mut errors,
            "scoring.min_evidence_rate",
            self.min_evidence_rate,
            0.0..=1.0,
        );
        check_range(
            &mut errors,
            "scoring.default_confidence",
            self.default_confidence,
            1.0..=5.0,
        );
        check_range(
            &mut errors,
            "scoring.undefined_dispersion_factor",
            self.undefined_dispersion_factor,
            0.0..=1.0,
        );
        check_range(
            &mut errors,
            "scoring.unsampled_quality_factor",
            self.unsampled_quality_factor,
            0.0..=1.0,
        );
        check_range(
            &mut errors,
            "scoring.quadrant_threshold",
            self.quadrant_threshold,
            1.0..=5.0,
        );

        if !(self.full_confidence_responses.is_finite() && self.full_confidence_responses > 0.0) {
            errors.push(ConfigError::new(
                "scoring.full_confidence_responses",
                format!("must be positive, got {}", self.full_confidence_responses),
            ));
        }
        if !(self.dispersion_scale.is_finite() && self.dispersion_scale > 0.0) {
            errors.push(ConfigError::new(
                "scoring.dispersion_scale",
                format!("must be positive, got {}", self.dispersion_scale),
            ));
        }
        if self.trend_factor_limit == 0 {
            errors.push(ConfigError::new(
                "scoring.trend_factor_limit",
                "must be at least 1",
            ));
        }

        errors
    }
}

impl Validatable for FilterConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if let Some(max) = self.max_dispersion {
            if !max.is_finite() || max < 0.0 {
                errors.push(ConfigError::new(
                    "filter.max_dispersion",
                    format!("must be a non-negative number, got {max}"),
                ));
            }
        }
        errors
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if let Some(ref file_path) = self.file {
            if let Some(parent) = file_path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    errors.push(ConfigError::new(
                        "output.file",
                        format!("Parent directory does not exist: {}", parent.display()),
                    ));
                }
            }
        }

        if self.top_gaps == Some(0) {
            errors.push(ConfigError::new(
                "output.top_gaps",
                "must be at least 1 (omit it to show every row)",
            ));
        }

        errors
    }
}
