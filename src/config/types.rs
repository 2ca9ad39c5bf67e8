//! Configuration types for rmm-tools operations.

use super::defaults::{
    DEFAULT_CONFIDENCE, DEFAULT_DISPERSION_SCALE, DEFAULT_FULL_CONFIDENCE_RESPONSES,
    DEFAULT_MAX_DISPERSION, DEFAULT_MIN_EVIDENCE_RATE, DEFAULT_MIN_RESPONSES,
    DEFAULT_PENALTY_STEP, DEFAULT_QUADRANT_THRESHOLD, DEFAULT_TREND_FACTOR_LIMIT,
    DEFAULT_UNDEFINED_DISPERSION_FACTOR, DEFAULT_UNSAMPLED_QUALITY_FACTOR,
};
use crate::model::Area;
use crate::reports::ReportFormat;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Unified application configuration that can be loaded from CLI args or config files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Scoring thresholds and penalty parameters
    pub scoring: ScoringConfig,
    /// Default factor filters applied before aggregation
    pub filter: FilterConfig,
    /// Output configuration (format, file, colors)
    pub output: OutputConfig,
}

impl AppConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an `AppConfig` builder.
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }
}

// ============================================================================
// Builder for AppConfig
// ============================================================================

/// Builder for constructing `AppConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    pub const fn scoring(mut self, scoring: ScoringConfig) -> Self {
        self.config.scoring = scoring;
        self
    }

    /// Keep only factors with at least this many responses.
    pub const fn min_responses(mut self, min: usize) -> Self {
        self.config.filter.min_responses = Some(min);
        self
    }

    /// Keep only factors whose dispersion is defined and at most `max`.
    pub const fn max_dispersion(mut self, max: f64) -> Self {
        self.config.filter.max_dispersion = Some(max);
        self
    }

    pub const fn area(mut self, area: Option<Area>) -> Self {
        self.config.filter.area = area;
        self
    }

    pub const fn evidence_only(mut self, evidence_only: bool) -> Self {
        self.config.filter.evidence_only = evidence_only;
        self
    }

    pub const fn output_format(mut self, format: ReportFormat) -> Self {
        self.config.output.format = format;
        self
    }

    pub fn output_file(mut self, file: Option<PathBuf>) -> Self {
        self.config.output.file = file;
        self
    }

    pub const fn no_color(mut self, no_color: bool) -> Self {
        self.config.output.no_color = no_color;
        self
    }

    pub const fn top_gaps(mut self, top: Option<usize>) -> Self {
        self.config.output.top_gaps = top;
        self
    }

    #[must_use]
    pub fn build(self) -> AppConfig {
        self.config
    }
}

// ============================================================================
// Scoring Configuration
// ============================================================================

/// Thresholds and parameters of the scoring model.
///
/// The defaults reproduce the published model: three additive 0.5 penalties
/// (fewer than 3 responses, IQR above 1.5, evidence rate below 0.5) and a
/// gap priority discounted by response count, rater agreement and evidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ScoringConfig {
    /// Size of each quality penalty, in levels
    pub penalty_step: f64,
    /// Factors with fewer responses than this are penalized
    pub min_responses: usize,
    /// Factors whose IQR exceeds this are penalized
    pub max_dispersion: f64,
    /// Evidence-required factors below this evidence rate are penalized
    pub min_evidence_rate: f64,
    /// Confidence reported when no response carries one
    pub default_confidence: f64,
    /// Response count at which a factor's data is fully trusted in gap priority
    pub full_confidence_responses: f64,
    /// IQR at which the agreement term of the gap quality factor reaches zero
    pub dispersion_scale: f64,
    /// Agreement term used when dispersion is undefined
    pub undefined_dispersion_factor: f64,
    /// Flat gap quality factor for factors without responses
    pub unsampled_quality_factor: f64,
    /// Proficiency/coverage value at which a dimension counts as high
    pub quadrant_threshold: f64,
    /// Factors (in catalog order) carried into the per-factor trend table
    pub trend_factor_limit: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            penalty_step: DEFAULT_PENALTY_STEP,
            min_responses: DEFAULT_MIN_RESPONSES,
            max_dispersion: DEFAULT_MAX_DISPERSION,
            min_evidence_rate: DEFAULT_MIN_EVIDENCE_RATE,
            default_confidence: DEFAULT_CONFIDENCE,
            full_confidence_responses: DEFAULT_FULL_CONFIDENCE_RESPONSES,
            dispersion_scale: DEFAULT_DISPERSION_SCALE,
            undefined_dispersion_factor: DEFAULT_UNDEFINED_DISPERSION_FACTOR,
            unsampled_quality_factor: DEFAULT_UNSAMPLED_QUALITY_FACTOR,
            quadrant_threshold: DEFAULT_QUADRANT_THRESHOLD,
            trend_factor_limit: DEFAULT_TREND_FACTOR_LIMIT,
        }
    }
}

// ============================================================================
// Filter Configuration
// ============================================================================

/// Factor-level filters applied after scoring and before aggregation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct FilterConfig {
    /// Restrict to a single area
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<Area>,
    /// Minimum number of responses per factor
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_responses: Option<usize>,
    /// Maximum dispersion (IQR) per factor; drops factors without responses
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_dispersion: Option<f64>,
    /// Keep only factors with some supporting evidence
    pub evidence_only: bool,
}

// ============================================================================
// Output Configuration
// ============================================================================

/// Output-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format
    pub format: ReportFormat,
    /// Output file path (None for stdout)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// Disable colored output
    pub no_color: bool,
    /// Number of backlog rows to show in summaries (None for all)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_gaps: Option<usize>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: ReportFormat::Summary,
            file: None,
            no_color: false,
            top_gaps: Some(10),
        }
    }
}
