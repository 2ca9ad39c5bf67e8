//! JSON report generator.

use super::{ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::pipeline::{AssessmentReport, BacklogReport, TrendReport};
use crate::scoring::{
    AreaScore, DataQualitySummary, FactorScore, Gap, OverallScore, ParticipationStats, Quadrant,
    ValidationReport,
};
use chrono::Utc;
use serde::Serialize;

/// JSON report generator
pub struct JsonReporter {
    /// Whether to pretty-print the output
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { pretty: true }
    }

    /// Create a compact JSON reporter
    #[must_use]
    pub const fn compact() -> Self {
        Self { pretty: false }
    }

    fn serialize<T: Serialize>(&self, value: &T) -> Result<String, ReportError> {
        if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        }
        .map_err(|e| ReportError::SerializationError(e.to_string()))
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for JsonReporter {
    fn generate_assessment_report(
        &self,
        report: &AssessmentReport,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let maturity = report.overall.maturity();
        let shown = config.max_gaps.unwrap_or(usize::MAX).min(report.gaps.len());

        let json = JsonAssessmentReport {
            metadata: JsonReportMetadata::new(config),
            cycle_id: &report.cycle_id,
            org_group: report.org_group.as_deref(),
            overall: &report.overall,
            maturity: JsonMaturity {
                level: maturity.number(),
                name: maturity.name(),
                description: maturity.description(),
            },
            quadrant: JsonQuadrant {
                quadrant: report.quadrant,
                label: report.quadrant.label(),
                description: report.quadrant.description(),
            },
            areas: &report.areas,
            factors: &report.factors,
            total_gaps: report.gaps.len(),
            gaps: &report.gaps[..shown],
            participation: &report.participation,
            data_quality: &report.data_quality,
            data_quality_issues: report
                .data_quality_issues
                .iter()
                .map(|issue| JsonIssue {
                    issue: serde_json::to_value(issue).unwrap_or_default(),
                    message: issue.message(),
                })
                .collect(),
            validation: &report.validation,
        };

        self.serialize(&json)
    }

    fn generate_backlog_report(
        &self,
        backlog: &BacklogReport,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        self.serialize(&JsonWrapped {
            metadata: JsonReportMetadata::new(config),
            report: backlog,
        })
    }

    fn generate_participation_report(
        &self,
        stats: &ParticipationStats,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        self.serialize(&JsonWrapped {
            metadata: JsonReportMetadata::new(config),
            report: stats,
        })
    }

    fn generate_trend_report(
        &self,
        report: &TrendReport,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        self.serialize(&JsonWrapped {
            metadata: JsonReportMetadata::new(config),
            report,
        })
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }
}

// JSON structures for serialization

#[derive(Serialize)]
struct JsonReportMetadata {
    tool: ToolInfo,
    generated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data_dir: Option<String>,
}

impl JsonReportMetadata {
    fn new(config: &ReportConfig) -> Self {
        Self {
            tool: ToolInfo {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            generated_at: Utc::now().to_rfc3339(),
            data_dir: config.metadata.data_dir.clone(),
        }
    }
}

#[derive(Serialize)]
struct ToolInfo {
    name: String,
    version: String,
}

#[derive(Serialize)]
struct JsonWrapped<'a, T: Serialize> {
    metadata: JsonReportMetadata,
    #[serde(flatten)]
    report: &'a T,
}

#[derive(Serialize)]
struct JsonAssessmentReport<'a> {
    metadata: JsonReportMetadata,
    cycle_id: &'a str,
    org_group: Option<&'a str>,
    overall: &'a OverallScore,
    maturity: JsonMaturity,
    quadrant: JsonQuadrant,
    areas: &'a [AreaScore],
    factors: &'a [FactorScore],
    total_gaps: usize,
    gaps: &'a [Gap],
    participation: &'a ParticipationStats,
    data_quality: &'a DataQualitySummary,
    data_quality_issues: Vec<JsonIssue>,
    validation: &'a ValidationReport,
}

#[derive(Serialize)]
struct JsonMaturity {
    level: u8,
    name: &'static str,
    description: &'static str,
}

#[derive(Serialize)]
struct JsonQuadrant {
    quadrant: Quadrant,
    label: &'static str,
    description: &'static str,
}

#[derive(Serialize)]
struct JsonIssue {
    issue: serde_json::Value,
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Area, Factor, FactorCatalog, Response};
    use crate::reports::ReportMetadata;
    use crate::scoring::{GroupParticipation, TrendComputer};

    fn participation() -> ParticipationStats {
        ParticipationStats {
            cycle_id: "2025-Q1".into(),
            total_respondents: 2,
            total_responses: 4,
            by_group: vec![GroupParticipation {
                org_group: "Finance".into(),
                unique_respondents: 2,
                total_responses: 4,
            }],
        }
    }

    #[test]
    fn test_participation_json_has_metadata() {
        let config = ReportConfig {
            metadata: ReportMetadata {
                data_dir: Some("data".into()),
            },
            ..ReportConfig::default()
        };
        let output = JsonReporter::new()
            .generate_participation_report(&participation(), &config)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["metadata"]["tool"]["name"], "rmm-tools");
        assert_eq!(value["metadata"]["data_dir"], "data");
        assert_eq!(value["cycle_id"], "2025-Q1");
        assert_eq!(value["by_group"][0]["org_group"], "Finance");
    }

    #[test]
    fn test_compact_output_is_single_line() {
        let output = JsonReporter::compact()
            .generate_participation_report(&participation(), &ReportConfig::default())
            .unwrap();
        assert!(!output.contains('\n'));
    }

    #[test]
    fn test_trend_json() {
        let catalog =
            FactorCatalog::new(vec![Factor::new("PM_01", Area::ProjectManagement, "Scope", 4, "PMO")])
                .unwrap();
        let responses = vec![
            Response::new("2024-Q4", "R1", "Ops", "PM_01", 2),
            Response::new("2025-Q1", "R1", "Ops", "PM_01", 3),
        ];
        let tables = TrendComputer::default().compute(&responses, &catalog);
        let report = TrendReport {
            summary: tables.summary().unwrap(),
            tables,
        };

        let output = JsonReporter::new()
            .generate_trend_report(&report, &ReportConfig::default())
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["tables"]["overall"].as_array().unwrap().len(), 2);
        assert_eq!(value["summary"]["latest_cycle"], "2025-Q1");
        assert!(value["metadata"].get("data_dir").is_none());
    }
}
