//! Report output stage.
//!
//! Renders any report kind in the configured format and writes it to a file
//! or stdout.

use super::{write_output, AssessmentReport, BacklogReport, OutputTarget, TrendReport};
use crate::config::OutputConfig;
use crate::error::{ErrorContext, Result};
use crate::reports::{create_reporter_with_options, ReportConfig, ReportFormat, ReportMetadata};
use crate::scoring::ParticipationStats;
use std::path::Path;

/// A computed report ready for rendering.
#[derive(Debug, Clone, Copy)]
pub enum ReportKind<'a> {
    Assessment(&'a AssessmentReport),
    Backlog(&'a BacklogReport),
    Participation(&'a ParticipationStats),
    Trends(&'a TrendReport),
}

impl ReportKind<'_> {
    const fn name(&self) -> &'static str {
        match self {
            Self::Assessment(_) => "assessment",
            Self::Backlog(_) => "backlog",
            Self::Participation(_) => "participation",
            Self::Trends(_) => "trend",
        }
    }
}

/// Render a report to a string.
pub fn render_report(
    report: ReportKind<'_>,
    format: ReportFormat,
    use_color: bool,
    config: &ReportConfig,
) -> Result<String> {
    let reporter = create_reporter_with_options(format, use_color);
    let rendered = match report {
        ReportKind::Assessment(r) => reporter.generate_assessment_report(r, config),
        ReportKind::Backlog(r) => reporter.generate_backlog_report(r, config),
        ReportKind::Participation(r) => reporter.generate_participation_report(r, config),
        ReportKind::Trends(r) => reporter.generate_trend_report(r, config),
    };
    rendered.with_context(|| format!("rendering {} report as {format}", report.name()))
}

/// Render a report and write it to the configured destination.
pub fn output_report(
    report: ReportKind<'_>,
    data_dir: &Path,
    output: &OutputConfig,
    quiet: bool,
) -> anyhow::Result<()> {
    let target = OutputTarget::from_config(output);
    let use_color = target.wants_color(output.no_color);

    let config = ReportConfig {
        max_gaps: output.top_gaps,
        metadata: ReportMetadata {
            data_dir: Some(data_dir.display().to_string()),
        },
    };
    let content = render_report(report, output.format, use_color, &config)?;

    write_output(&content, &target, quiet)
}
