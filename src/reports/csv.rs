//! CSV report generator.
//!
//! Generates comma-separated tables for every report kind, suitable for
//! spreadsheet import and data analysis pipelines. Multi-table reports
//! separate their sections with `# Title` lines.

use super::{ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::pipeline::{AssessmentReport, BacklogReport, TrendReport};
use crate::scoring::{Gap, ParticipationStats, ALL_GROUPS};
use std::fmt::Write;

const BACKLOG_HEADER: &str = "Rank,Factor ID,Factor,Area,Current Level,Target Level,Gap,\
Action ID,Action,Transition,Impact,Effort,Timeframe,Quality Factor,Priority,Owner";

/// CSV report generator.
pub struct CsvReporter;

impl CsvReporter {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for CsvReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for CsvReporter {
    fn generate_assessment_report(
        &self,
        report: &AssessmentReport,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut content = String::new();

        content.push_str("# Overall\n");
        content.push_str("Cycle,Group,Index,Level,Proficiency,Coverage,Quadrant\n");
        writeln!(
            content,
            "\"{}\",\"{}\",{:.2},{},{},{},\"{}\"",
            escape_csv(&report.cycle_id),
            escape_csv(report.org_group.as_deref().unwrap_or(ALL_GROUPS)),
            report.overall.overall_index,
            report.overall.overall_level,
            opt(report.overall.overall_proficiency),
            opt(report.overall.overall_coverage),
            report.quadrant.label()
        )?;

        content.push_str("\n# Areas\n");
        content.push_str("Area,Index,Level,Factors,Avg Responses,Avg Proficiency,Avg Coverage\n");
        for area in &report.areas {
            writeln!(
                content,
                "\"{}\",{:.2},{},{},{:.2},{},{}",
                area.area.name(),
                area.area_index,
                area.area_level,
                area.n_factors,
                area.avg_responses,
                opt(area.avg_proficiency),
                opt(area.avg_coverage)
            )?;
        }

        content.push_str("\n# Factors\n");
        content.push_str(
            "Factor ID,Factor,Area,Responses,Median,Mean,Proficiency,Coverage,Dispersion,\
             Confidence,Evidence Rate,Raw Index,Penalty,Adjusted Index\n",
        );
        for score in &report.factors {
            writeln!(
                content,
                "\"{}\",\"{}\",\"{}\",{},{},{},{},{},{},{},{},{:.2},{:.2},{:.2}",
                escape_csv(&score.factor.factor_id),
                escape_csv(&score.factor.factor_name),
                score.factor.area.name(),
                score.n_responses,
                opt(score.median_level),
                opt(score.mean_level),
                opt(score.proficiency_median),
                opt(score.coverage_median),
                opt(score.dispersion),
                opt(score.confidence_avg),
                opt(score.evidence_rate),
                score.index_raw,
                score.quality_penalty,
                score.index_adjusted
            )?;
        }

        content.push_str("\n# Backlog\n");
        let shown = config.max_gaps.unwrap_or(usize::MAX).min(report.gaps.len());
        write_backlog(&mut content, &report.gaps[..shown])?;

        Ok(content)
    }

    fn generate_backlog_report(
        &self,
        backlog: &BacklogReport,
        _config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut content = String::new();
        write_backlog(&mut content, &backlog.gaps)?;
        Ok(content)
    }

    fn generate_participation_report(
        &self,
        stats: &ParticipationStats,
        _config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut content = String::new();
        content.push_str("Cycle,Group,Respondents,Responses\n");
        for group in &stats.by_group {
            writeln!(
                content,
                "\"{}\",\"{}\",{},{}",
                escape_csv(&stats.cycle_id),
                escape_csv(&group.org_group),
                group.unique_respondents,
                group.total_responses
            )?;
        }
        Ok(content)
    }

    fn generate_trend_report(
        &self,
        report: &TrendReport,
        _config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let tables = &report.tables;
        let mut content = String::new();

        content.push_str("# Overall\n");
        content.push_str("Cycle,Index,Level,Proficiency,Coverage\n");
        for row in &tables.overall {
            writeln!(
                content,
                "\"{}\",{:.2},{},{},{}",
                escape_csv(&row.cycle_id),
                row.overall_index,
                row.overall_level,
                opt(row.overall_proficiency),
                opt(row.overall_coverage)
            )?;
        }

        content.push_str("\n# Areas\n");
        content.push_str("Cycle,Area,Index,Level,Avg Proficiency,Avg Coverage\n");
        for row in &tables.by_area {
            writeln!(
                content,
                "\"{}\",\"{}\",{:.2},{},{},{}",
                escape_csv(&row.cycle_id),
                row.area.name(),
                row.area_index,
                row.area_level,
                opt(row.avg_proficiency),
                opt(row.avg_coverage)
            )?;
        }

        content.push_str("\n# Factors\n");
        content.push_str("Cycle,Factor ID,Factor,Adjusted Index\n");
        for row in &tables.by_factor {
            writeln!(
                content,
                "\"{}\",\"{}\",\"{}\",{:.2}",
                escape_csv(&row.cycle_id),
                escape_csv(&row.factor_id),
                escape_csv(&row.factor_name),
                row.index_adjusted
            )?;
        }

        Ok(content)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Csv
    }
}

fn write_backlog(content: &mut String, gaps: &[Gap]) -> Result<(), ReportError> {
    content.push_str(BACKLOG_HEADER);
    content.push('\n');
    for (rank, gap) in gaps.iter().enumerate() {
        writeln!(
            content,
            "{},\"{}\",\"{}\",\"{}\",{:.2},{},{:.2},\"{}\",\"{}\",\"{}\",{},{},{},{:.3},{:.3},\"{}\"",
            rank + 1,
            escape_csv(&gap.factor_id),
            escape_csv(&gap.factor_name),
            gap.area.name(),
            gap.current_level,
            gap.target_level,
            gap.gap_levels,
            escape_csv(&gap.action_id),
            escape_csv(&gap.action_text),
            gap.transition,
            gap.impact,
            gap.effort,
            gap.timeframe,
            gap.quality_factor,
            gap.priority_score,
            escape_csv(&gap.owner_group)
        )?;
    }
    Ok(())
}

/// Two-decimal value, empty when undefined.
fn opt(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.2}")).unwrap_or_default()
}

fn escape_csv(s: &str) -> String {
    s.replace('"', "\"\"").replace('\n', " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::GroupParticipation;

    #[test]
    fn test_escape_csv() {
        assert_eq!(escape_csv("Say \"hi\"\nnow"), "Say \"\"hi\"\" now");
    }

    #[test]
    fn test_opt_formatting() {
        assert_eq!(opt(None), "");
        assert_eq!(opt(Some(2.5)), "2.50");
    }

    #[test]
    fn test_participation_csv() {
        let stats = ParticipationStats {
            cycle_id: "2025-Q1".into(),
            total_respondents: 3,
            total_responses: 12,
            by_group: vec![
                GroupParticipation {
                    org_group: "Finance".into(),
                    unique_respondents: 2,
                    total_responses: 8,
                },
                GroupParticipation {
                    org_group: "Operations".into(),
                    unique_respondents: 1,
                    total_responses: 4,
                },
            ],
        };
        let csv = CsvReporter::new()
            .generate_participation_report(&stats, &ReportConfig::default())
            .unwrap();
        assert_eq!(
            csv,
            "Cycle,Group,Respondents,Responses\n\
             \"2025-Q1\",\"Finance\",2,8\n\
             \"2025-Q1\",\"Operations\",1,4\n"
        );
    }
}
