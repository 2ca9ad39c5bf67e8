//! Participation command handler.

use crate::config::OutputConfig;
use crate::pipeline::{output_report, Dataset, ReportKind};
use crate::scoring::ParticipationStats;
use anyhow::{Context, Result};
use std::path::Path;

/// Run the participation command
pub fn run_participation(
    data_dir: &Path,
    cycle: Option<&str>,
    output: &OutputConfig,
    quiet: bool,
) -> Result<()> {
    let dataset = Dataset::load(data_dir)
        .with_context(|| format!("Failed to load {}", data_dir.display()))?;
    let cycle_id = dataset.resolve_cycle(cycle)?;

    let stats = ParticipationStats::compute(&dataset.responses, &cycle_id);
    tracing::info!(
        "{} respondents in {} groups for {cycle_id}",
        stats.total_respondents,
        stats.by_group.len()
    );

    output_report(ReportKind::Participation(&stats), data_dir, output, quiet)
}
