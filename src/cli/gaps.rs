//! Gaps command handler.
//!
//! Implements the `gaps` subcommand: prints the ranked improvement backlog
//! for one cycle.

use crate::config::AppConfig;
use crate::pipeline::{output_report, run_backlog, AssessmentOptions, Dataset, ReportKind};
use crate::scoring::{FactorFilter, GapFilter};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Gaps command configuration
#[derive(Debug, Clone)]
pub struct GapsConfig {
    pub data_dir: PathBuf,
    pub app: AppConfig,
    pub cycle: Option<String>,
    pub group: Option<String>,
    pub gap_filter: GapFilter,
    pub quiet: bool,
}

/// Run the gaps command
pub fn run_gaps(config: GapsConfig) -> Result<()> {
    let dataset = Dataset::load(&config.data_dir)
        .with_context(|| format!("Failed to load {}", config.data_dir.display()))?;

    let options = AssessmentOptions {
        cycle: config.cycle,
        org_group: config.group,
        filter: FactorFilter::from(&config.app.filter),
    };
    let backlog = run_backlog(
        &dataset,
        &config.app.scoring,
        &options,
        &config.gap_filter,
    )?;

    output_report(
        ReportKind::Backlog(&backlog),
        &config.data_dir,
        &config.app.output,
        config.quiet,
    )
}
