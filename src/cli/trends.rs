//! Trends command handler.

use crate::config::AppConfig;
use crate::pipeline::{output_report, run_trends as compute_trends, Dataset, ReportKind};
use anyhow::{Context, Result};
use std::path::Path;

/// Run the trends command
pub fn run_trends(data_dir: &Path, app: &AppConfig, quiet: bool) -> Result<()> {
    let dataset = Dataset::load(data_dir)
        .with_context(|| format!("Failed to load {}", data_dir.display()))?;
    let report = compute_trends(&dataset, &app.scoring)?;

    output_report(ReportKind::Trends(&report), data_dir, &app.output, quiet)
}
