//! Assess command handler.
//!
//! Implements the `assess` subcommand: scores one cycle and prints the full
//! assessment report.

use crate::config::AppConfig;
use crate::pipeline::{
    exit_codes, output_report, run_assessment, AssessmentOptions, Dataset, ReportKind,
};
use crate::scoring::FactorFilter;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Assess command configuration
#[derive(Debug, Clone)]
pub struct AssessConfig {
    pub data_dir: PathBuf,
    pub app: AppConfig,
    pub cycle: Option<String>,
    pub group: Option<String>,
    /// Fail with [`exit_codes::BELOW_THRESHOLD`] when the overall index is lower
    pub min_index: Option<f64>,
    pub quiet: bool,
}

/// Run the assess command, returning the desired exit code.
///
/// The caller is responsible for calling `std::process::exit()` with the
/// returned code when it is non-zero.
pub fn run_assess(config: AssessConfig) -> Result<i32> {
    let dataset = Dataset::load(&config.data_dir)
        .with_context(|| format!("Failed to load {}", config.data_dir.display()))?;

    let options = AssessmentOptions {
        cycle: config.cycle,
        org_group: config.group,
        filter: FactorFilter::from(&config.app.filter),
    };
    let report = run_assessment(&dataset, &config.app.scoring, &options)?;

    output_report(
        ReportKind::Assessment(&report),
        &config.data_dir,
        &config.app.output,
        config.quiet,
    )?;

    if let Some(threshold) = config.min_index {
        if report.overall.overall_index < threshold {
            tracing::warn!(
                "Overall index {:.2} is below the minimum of {threshold:.2}",
                report.overall.overall_index
            );
            return Ok(exit_codes::BELOW_THRESHOLD);
        }
    }

    Ok(exit_codes::SUCCESS)
}
