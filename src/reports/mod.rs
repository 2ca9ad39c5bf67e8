//! Report generation for assessment results.
//!
//! Every report kind can be rendered in three formats:
//! - Summary: compact, optionally colored terminal output
//! - JSON: structured data for dashboards and programmatic integration
//! - CSV: flat tables for spreadsheet import

mod csv;
mod json;
mod summary;
mod types;

pub use csv::CsvReporter;
pub use json::JsonReporter;
pub use summary::SummaryReporter;
pub use types::{ReportConfig, ReportFormat, ReportMetadata};

use crate::pipeline::{AssessmentReport, BacklogReport, TrendReport};
use crate::scoring::ParticipationStats;
use thiserror::Error;

/// Errors that can occur during report generation
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Format error: {0}")]
    FormatError(#[from] std::fmt::Error),
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Generate the full report for one scored cycle
    fn generate_assessment_report(
        &self,
        report: &AssessmentReport,
        config: &ReportConfig,
    ) -> Result<String, ReportError>;

    /// Generate the ranked improvement backlog
    fn generate_backlog_report(
        &self,
        backlog: &BacklogReport,
        config: &ReportConfig,
    ) -> Result<String, ReportError>;

    /// Generate respondent counts for one cycle
    fn generate_participation_report(
        &self,
        stats: &ParticipationStats,
        config: &ReportConfig,
    ) -> Result<String, ReportError>;

    /// Generate the multi-cycle trend report
    fn generate_trend_report(
        &self,
        report: &TrendReport,
        config: &ReportConfig,
    ) -> Result<String, ReportError>;

    /// Get the format this generator produces
    fn format(&self) -> ReportFormat;
}

/// Create a report generator for the given format
#[must_use]
pub fn create_reporter(format: ReportFormat) -> Box<dyn ReportGenerator> {
    create_reporter_with_options(format, true)
}

/// Create a report generator with color control
#[must_use]
pub fn create_reporter_with_options(
    format: ReportFormat,
    use_color: bool,
) -> Box<dyn ReportGenerator> {
    match format {
        ReportFormat::Summary => {
            if use_color {
                Box::new(SummaryReporter::new())
            } else {
                Box::new(SummaryReporter::new().no_color())
            }
        }
        ReportFormat::Json => Box::new(JsonReporter::new()),
        ReportFormat::Csv => Box::new(CsvReporter::new()),
    }
}
