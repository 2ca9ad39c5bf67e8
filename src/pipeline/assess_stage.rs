//! Assessment stage.
//!
//! Scores one cycle/group selection of a [`Dataset`] and assembles every
//! derived view (areas, overall, quadrant, backlog, participation and data
//! quality) into one report.

use super::load::Dataset;
use crate::config::ScoringConfig;
use crate::error::Result;
use crate::scoring::{
    AreaAggregator, AreaScore, DataQualityIssue, DataQualitySummary, FactorFilter, FactorScore,
    FactorScorer, Gap, GapAnalyzer, GapFilter, OverallAggregator, OverallScore,
    ParticipationStats, Quadrant, QuadrantClassifier, ValidationReport, ALL_GROUPS,
};
use serde::Serialize;

/// Which slice of the dataset to score.
#[derive(Debug, Clone, Default)]
pub struct AssessmentOptions {
    /// Defaults to the latest cycle
    pub cycle: Option<String>,
    /// `None` (or `"All"`) scores every group
    pub org_group: Option<String>,
    pub filter: FactorFilter,
}

impl AssessmentOptions {
    fn group(&self) -> Option<&str> {
        self.org_group.as_deref().filter(|g| *g != ALL_GROUPS)
    }
}

/// Everything computed for one cycle.
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentReport {
    pub cycle_id: String,
    pub org_group: Option<String>,
    pub overall: OverallScore,
    pub quadrant: Quadrant,
    pub areas: Vec<AreaScore>,
    /// Factor scores after filtering, in catalog order
    pub factors: Vec<FactorScore>,
    /// Ranked backlog over the filtered factors
    pub gaps: Vec<Gap>,
    pub participation: ParticipationStats,
    /// Computed over the unfiltered factor scores
    pub data_quality: DataQualitySummary,
    pub data_quality_issues: Vec<DataQualityIssue>,
    pub validation: ValidationReport,
}

/// The ranked backlog for one cycle.
#[derive(Debug, Clone, Serialize)]
pub struct BacklogReport {
    pub cycle_id: String,
    pub org_group: Option<String>,
    /// Backlog rows before the gap filter was applied
    pub total_gaps: usize,
    pub gaps: Vec<Gap>,
}

/// Score one cycle of `dataset`.
pub fn run_assessment(
    dataset: &Dataset,
    config: &ScoringConfig,
    options: &AssessmentOptions,
) -> Result<AssessmentReport> {
    let cycle_id = dataset.resolve_cycle(options.cycle.as_deref())?;
    let group = options.group();
    tracing::info!(
        "Assessing cycle {cycle_id} ({})",
        group.unwrap_or(ALL_GROUPS)
    );

    let scorer = FactorScorer::new(config.clone());
    let all_scores = scorer.score(&dataset.responses, &dataset.factors, &cycle_id, group);

    let participation = ParticipationStats::compute(&dataset.responses, &cycle_id);
    let data_quality = DataQualitySummary::compute(&all_scores, config);
    let data_quality_issues = data_quality.issues(Some(&participation));
    for issue in &data_quality_issues {
        tracing::warn!("{}", issue.message());
    }

    let factors = options.filter.apply(all_scores);
    let areas = AreaAggregator::new().aggregate(&factors);
    let overall = OverallAggregator::new().aggregate(&areas);

    let classifier = QuadrantClassifier::new(config.quadrant_threshold);
    let quadrant = classifier.classify(
        overall.overall_proficiency.unwrap_or(overall.overall_index),
        overall.overall_coverage.unwrap_or(overall.overall_index),
    );

    let gaps = GapAnalyzer::new(config.clone()).analyze(&factors, &dataset.actions);
    tracing::debug!("{} backlog rows for {} factors", gaps.len(), factors.len());

    Ok(AssessmentReport {
        cycle_id,
        org_group: group.map(str::to_string),
        overall,
        quadrant,
        areas,
        factors,
        gaps,
        participation,
        data_quality,
        data_quality_issues,
        validation: dataset.validation.clone(),
    })
}

/// Build the filtered improvement backlog for one cycle.
pub fn run_backlog(
    dataset: &Dataset,
    config: &ScoringConfig,
    options: &AssessmentOptions,
    gap_filter: &GapFilter,
) -> Result<BacklogReport> {
    let cycle_id = dataset.resolve_cycle(options.cycle.as_deref())?;
    let group = options.group();

    let scores = options.filter.apply(FactorScorer::new(config.clone()).score(
        &dataset.responses,
        &dataset.factors,
        &cycle_id,
        group,
    ));
    let gaps = GapAnalyzer::new(config.clone()).analyze(&scores, &dataset.actions);
    let total_gaps = gaps.len();
    let gaps = gap_filter.apply(gaps);
    tracing::info!("Backlog for {cycle_id}: {} of {total_gaps} rows", gaps.len());

    Ok(BacklogReport {
        cycle_id,
        org_group: group.map(str::to_string),
        total_gaps,
        gaps,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Action, Area, Factor, Response, Timeframe};

    fn dataset() -> Dataset {
        let factors = vec![
            Factor::new("PM_01", Area::ProjectManagement, "Scope", 4, "PMO"),
            Factor::new("INV_01", Area::Invoicing, "Billing", 3, "Finance"),
        ];
        let mut responses = Vec::new();
        for (i, group) in ["Finance", "Finance", "Operations"].into_iter().enumerate() {
            let resp = format!("R{i}");
            responses.push(Response::new("2025-Q1", &resp, group, "PM_01", 2));
            responses.push(Response::new("2025-Q1", &resp, group, "INV_01", 3));
            responses.push(Response::new("2024-Q4", &resp, group, "PM_01", 1));
        }
        let actions = vec![Action {
            action_id: "A1".into(),
            factor_id: "PM_01".into(),
            if_level_leq: 3,
            action_text: "Define scope baselines".into(),
            impact: 4,
            effort: 2,
            timeframe: Timeframe::Short,
            dependency_action_id: None,
        }];
        Dataset::from_parts(factors, responses, actions).unwrap()
    }

    #[test]
    fn test_assessment_defaults_to_latest_cycle() {
        let report =
            run_assessment(&dataset(), &ScoringConfig::default(), &AssessmentOptions::default())
                .unwrap();

        assert_eq!(report.cycle_id, "2025-Q1");
        assert_eq!(report.org_group, None);
        assert_eq!(report.factors.len(), 2);
        assert_eq!(report.areas.len(), 2);
        assert_eq!(report.gaps.len(), 1);
        assert_eq!(report.gaps[0].action_id, "A1");
        assert_eq!(report.participation.total_respondents, 3);
        assert_eq!(report.quadrant, Quadrant::EarlyStage);
    }

    #[test]
    fn test_all_group_means_no_filter() {
        let options = AssessmentOptions {
            org_group: Some(ALL_GROUPS.to_string()),
            ..AssessmentOptions::default()
        };
        let report = run_assessment(&dataset(), &ScoringConfig::default(), &options).unwrap();
        assert_eq!(report.org_group, None);
        assert_eq!(report.factors[0].n_responses, 3);
    }

    #[test]
    fn test_factor_filter_keeps_data_quality_unfiltered() {
        let options = AssessmentOptions {
            filter: FactorFilter {
                area: Some(Area::Invoicing),
                ..FactorFilter::default()
            },
            ..AssessmentOptions::default()
        };
        let report = run_assessment(&dataset(), &ScoringConfig::default(), &options).unwrap();
        assert_eq!(report.factors.len(), 1);
        assert!(report.gaps.is_empty());
        assert_eq!(report.data_quality.n_factors, 2);
    }

    #[test]
    fn test_backlog_filter() {
        let filter = GapFilter {
            timeframes: vec![Timeframe::Long],
            ..GapFilter::default()
        };
        let backlog = run_backlog(
            &dataset(),
            &ScoringConfig::default(),
            &AssessmentOptions {
                cycle: Some("2024-Q4".into()),
                ..AssessmentOptions::default()
            },
            &filter,
        )
        .unwrap();
        assert_eq!(backlog.cycle_id, "2024-Q4");
        assert_eq!(backlog.total_gaps, 1);
        assert!(backlog.gaps.is_empty());
    }

    #[test]
    fn test_unknown_cycle_is_an_error() {
        let options = AssessmentOptions {
            cycle: Some("1999-Q1".into()),
            ..AssessmentOptions::default()
        };
        assert!(run_assessment(&dataset(), &ScoringConfig::default(), &options).is_err());
    }
}
