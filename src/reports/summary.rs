//! Summary report generator for shell output.
//!
//! Provides a compact, human-readable summary for terminal usage.

use super::{ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::model::MaturityLevel;
use crate::pipeline::{AssessmentReport, BacklogReport, TrendReport};
use crate::scoring::{Gap, ParticipationStats, TrendDelta, ALL_GROUPS};

/// Apply ANSI color formatting if colored output is enabled.
fn ansi_color(text: &str, color: &str, colored: bool) -> String {
    if colored {
        match color {
            "red" => format!("\x1b[31m{text}\x1b[0m"),
            "green" => format!("\x1b[32m{text}\x1b[0m"),
            "yellow" => format!("\x1b[33m{text}\x1b[0m"),
            "cyan" => format!("\x1b[36m{text}\x1b[0m"),
            "bold" => format!("\x1b[1m{text}\x1b[0m"),
            "dim" => format!("\x1b[2m{text}\x1b[0m"),
            _ => text.to_string(),
        }
    } else {
        text.to_string()
    }
}

/// Color used for an index on the 1-5 scale.
fn level_color(index: f64) -> &'static str {
    match MaturityLevel::from_index(index).number() {
        4.. => "green",
        3 => "yellow",
        _ => "red",
    }
}

/// Summary reporter for shell output
pub struct SummaryReporter {
    /// Use colored output
    colored: bool,
}

impl SummaryReporter {
    /// Create a new summary reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }

    fn header(&self, title: &str, lines: &mut Vec<String>) {
        lines.push(self.color(title, "bold"));
        lines.push(self.color("─".repeat(40).as_str(), "dim"));
    }

    fn index(&self, index: f64) -> String {
        self.color(&format!("{index:.2}"), level_color(index))
    }

    fn delta(&self, delta: &TrendDelta) -> String {
        let change = format!("{:+.2}", delta.change);
        let colored = if delta.change > 0.0 {
            self.color(&change, "green")
        } else if delta.change < 0.0 {
            self.color(&change, "red")
        } else {
            self.color(&change, "dim")
        };
        match delta.change_pct {
            Some(pct) => format!(
                "{:.2} → {:.2}  {colored} ({pct:+.1}%)",
                delta.baseline, delta.latest
            ),
            None => format!("{:.2} → {:.2}  {colored}", delta.baseline, delta.latest),
        }
    }

    fn gap_lines(&self, gaps: &[Gap], lines: &mut Vec<String>) {
        for (rank, gap) in gaps.iter().enumerate() {
            lines.push(format!(
                "  {:>2}. {} {} {}: {}",
                rank + 1,
                self.color(&format!("[{:>5.2}]", gap.priority_score), "yellow"),
                self.color(&gap.factor_id, "cyan"),
                gap.factor_name,
                gap.action_text
            ));
            lines.push(format!(
                "      {}",
                self.color(
                    &format!(
                        "{}, {} term, impact {}/effort {}, owner {}",
                        gap.transition, gap.timeframe, gap.impact, gap.effort, gap.owner_group
                    ),
                    "dim"
                )
            ));
        }
    }
}

impl Default for SummaryReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for SummaryReporter {
    fn generate_assessment_report(
        &self,
        report: &AssessmentReport,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut lines = Vec::new();
        self.header("RMM Assessment Summary", &mut lines);

        lines.push(format!(
            "{}    {} ({})",
            self.color("Cycle:", "cyan"),
            report.cycle_id,
            report.org_group.as_deref().unwrap_or(ALL_GROUPS)
        ));
        lines.push(format!(
            "{}  {}  {}",
            self.color("Overall:", "cyan"),
            self.index(report.overall.overall_index),
            report.overall.maturity()
        ));
        if let (Some(proficiency), Some(coverage)) = (
            report.overall.overall_proficiency,
            report.overall.overall_coverage,
        ) {
            lines.push(format!(
                "{}    proficiency {proficiency:.2}, coverage {coverage:.2}",
                self.color("Dims:", "cyan"),
            ));
            let (proficiency, coverage) = (
                MaturityLevel::from_index(proficiency),
                MaturityLevel::from_index(coverage),
            );
            lines.push(format!(
                "          {}",
                self.color(proficiency.proficiency_description(), "dim")
            ));
            lines.push(format!(
                "          {}",
                self.color(coverage.coverage_description(), "dim")
            ));
        }
        lines.push(format!(
            "{} {}",
            self.color("Quadrant:", "cyan"),
            report.quadrant
        ));
        lines.push(format!(
            "          {}",
            self.color(report.quadrant.description(), "dim")
        ));

        lines.push(String::new());
        lines.push(self.color("Areas:", "bold"));
        if report.areas.is_empty() {
            lines.push(format!("  {}", self.color("No factors selected", "dim")));
        }
        for area in &report.areas {
            lines.push(format!(
                "  {:<20} {}  Level {}  {}",
                area.area.name(),
                self.index(area.area_index),
                area.area_level,
                self.color(
                    &format!(
                        "({} factors, {:.1} responses each)",
                        area.n_factors, area.avg_responses
                    ),
                    "dim"
                )
            ));
        }

        lines.push(String::new());
        lines.push(self.color("Top gaps:", "bold"));
        let shown = config.max_gaps.unwrap_or(usize::MAX).min(report.gaps.len());
        if report.gaps.is_empty() {
            lines.push(format!("  {}", self.color("All factors at target", "green")));
        }
        self.gap_lines(&report.gaps[..shown], &mut lines);
        if shown < report.gaps.len() {
            lines.push(format!(
                "  {}",
                self.color(&format!("... {} more", report.gaps.len() - shown), "dim")
            ));
        }

        lines.push(String::new());
        let participation = &report.participation;
        lines.push(format!(
            "{} {} respondents, {} responses across {} groups",
            self.color("Participation:", "cyan"),
            participation.total_respondents,
            participation.total_responses,
            participation.by_group.len()
        ));

        let quality = &report.data_quality;
        let evidence = quality
            .evidence_completeness
            .map_or_else(|| "n/a".to_string(), |e| format!("{e:.0}%"));
        lines.push(format!(
            "{} {:.0}% (responses {:.0}%, consensus {:.0}%, evidence {evidence})",
            self.color("Data quality:", "cyan"),
            quality.overall_quality,
            quality.response_coverage,
            quality.consensus
        ));
        for issue in &report.data_quality_issues {
            lines.push(format!("  {} {}", self.color("!", "yellow"), issue.message()));
        }

        let validation = &report.validation;
        if validation.dropped() > 0 {
            lines.push(format!(
                "{} {} of {} response rows dropped",
                self.color("Validation:", "cyan"),
                self.color(&validation.dropped().to_string(), "red"),
                validation.total
            ));
        }

        Ok(lines.join("\n"))
    }

    fn generate_backlog_report(
        &self,
        backlog: &BacklogReport,
        _config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut lines = Vec::new();
        self.header("Improvement Backlog", &mut lines);
        lines.push(format!(
            "{}  {} ({}), {} of {} actions",
            self.color("Cycle:", "cyan"),
            backlog.cycle_id,
            backlog.org_group.as_deref().unwrap_or(ALL_GROUPS),
            backlog.gaps.len(),
            backlog.total_gaps
        ));
        lines.push(String::new());

        if backlog.gaps.is_empty() {
            lines.push(format!("  {}", self.color("No matching actions", "dim")));
        }
        self.gap_lines(&backlog.gaps, &mut lines);

        Ok(lines.join("\n"))
    }

    fn generate_participation_report(
        &self,
        stats: &ParticipationStats,
        _config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut lines = Vec::new();
        self.header("Participation", &mut lines);
        lines.push(format!(
            "{}        {}",
            self.color("Cycle:", "cyan"),
            stats.cycle_id
        ));
        lines.push(format!(
            "{}  {}",
            self.color("Respondents:", "cyan"),
            stats.total_respondents
        ));
        lines.push(format!(
            "{}    {}",
            self.color("Responses:", "cyan"),
            stats.total_responses
        ));
        lines.push(String::new());

        lines.push(self.color("By group:", "bold"));
        for group in &stats.by_group {
            lines.push(format!(
                "  {:<24} {:>4} respondents  {:>6} responses",
                group.org_group, group.unique_respondents, group.total_responses
            ));
        }
        if stats.is_unbalanced() {
            lines.push(format!(
                "  {} {}",
                self.color("!", "yellow"),
                self.color("Group participation is unbalanced", "yellow")
            ));
        }

        Ok(lines.join("\n"))
    }

    fn generate_trend_report(
        &self,
        report: &TrendReport,
        _config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let summary = &report.summary;
        let mut lines = Vec::new();
        self.header("Maturity Trends", &mut lines);
        lines.push(format!(
            "{}  {} → {} ({} cycles)",
            self.color("Cycles:", "cyan"),
            summary.baseline_cycle,
            summary.latest_cycle,
            summary.cycles
        ));
        lines.push(format!(
            "{} {}",
            self.color("Overall:", "cyan"),
            self.delta(&summary.overall)
        ));
        lines.push(String::new());

        lines.push(self.color("Areas:", "bold"));
        for area in &summary.areas {
            lines.push(format!(
                "  {:<20} {}",
                area.area.name(),
                self.delta(&area.delta)
            ));
        }
        lines.push(String::new());

        lines.push(self.color("By cycle:", "bold"));
        for row in &report.tables.overall {
            lines.push(format!(
                "  {:<12} {}  Level {}",
                row.cycle_id,
                self.index(row.overall_index),
                row.overall_level
            ));
        }

        Ok(lines.join("\n"))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Summary
    }
}
