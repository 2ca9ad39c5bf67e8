//! Factor-level scoring.
//!
//! Each factor is summarised from its responses in one cycle and discounted
//! by a quality penalty built from three trust signals: sample size, rater
//! agreement and documentation. The penalty is additive so the adjusted
//! index stays on the 1-5 scale.

use super::stats;
use crate::config::ScoringConfig;
use crate::model::{Factor, FactorCatalog, Response};
use serde::{Deserialize, Serialize};

/// Group filter value that selects every group.
pub const ALL_GROUPS: &str = "All";

/// Score of one factor for one cycle (and optional group).
///
/// Statistics are `None` when no response matched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorScore {
    #[serde(flatten)]
    pub factor: Factor,
    pub n_responses: usize,
    pub median_level: Option<f64>,
    pub mean_level: Option<f64>,
    pub proficiency_median: Option<f64>,
    pub coverage_median: Option<f64>,
    /// Interquartile range of `level`
    pub dispersion: Option<f64>,
    pub confidence_avg: Option<f64>,
    /// Share of responses with evidence, 1.0 when evidence is not required
    pub evidence_rate: Option<f64>,
    pub index_raw: f64,
    pub quality_penalty: f64,
    pub index_adjusted: f64,
}

impl FactorScore {
    /// Floor row for a factor nobody rated.
    fn unsampled(factor: &Factor) -> Self {
        Self {
            factor: factor.clone(),
            n_responses: 0,
            median_level: None,
            mean_level: None,
            proficiency_median: None,
            coverage_median: None,
            dispersion: None,
            confidence_avg: None,
            evidence_rate: None,
            index_raw: 1.0,
            quality_penalty: 0.0,
            index_adjusted: 1.0,
        }
    }

    #[must_use]
    pub const fn has_responses(&self) -> bool {
        self.n_responses > 0
    }

    /// Median level, treating an unrated factor as level 1.
    #[must_use]
    pub fn current_level(&self) -> f64 {
        self.median_level.unwrap_or(1.0)
    }

    /// Levels still to climb to reach the target, never negative.
    #[must_use]
    pub fn gap_levels(&self) -> f64 {
        (f64::from(self.factor.target_level) - self.current_level()).max(0.0)
    }
}

/// Computes [`FactorScore`]s for a cycle.
#[derive(Debug, Clone, Default)]
pub struct FactorScorer {
    config: ScoringConfig,
}

impl FactorScorer {
    #[must_use]
    pub const fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Score every catalog factor, in catalog order.
    ///
    /// `org_group` restricts the sample to one group; `"All"` means no filter.
    /// Responses are expected to have passed the
    /// [`Validator`](super::Validator).
    pub fn score(
        &self,
        responses: &[Response],
        factors: &FactorCatalog,
        cycle_id: &str,
        org_group: Option<&str>,
    ) -> Vec<FactorScore> {
        let group = org_group.filter(|g| *g != ALL_GROUPS);
        let selected: Vec<&Response> = responses
            .iter()
            .filter(|r| r.level.is_some())
            .filter(|r| r.cycle_id == cycle_id && group.map_or(true, |g| r.org_group == g))
            .collect();

        tracing::debug!(
            "Scoring {} factors from {} responses (cycle {cycle_id}, group {})",
            factors.len(),
            selected.len(),
            group.unwrap_or(ALL_GROUPS)
        );

        factors
            .iter()
            .map(|factor| {
                let rows: Vec<&Response> = selected
                    .iter()
                    .copied()
                    .filter(|r| r.factor_id == factor.factor_id)
                    .collect();
                self.score_factor(factor, &rows)
            })
            .collect()
    }

    fn score_factor(&self, factor: &Factor, rows: &[&Response]) -> FactorScore {
        let levels: Vec<f64> = rows.iter().filter_map(|r| r.level).map(|l| l as f64).collect();
        let (Some(median_level), Some(mean_level), Some(dispersion)) = (
            stats::median(&levels),
            stats::mean(&levels),
            stats::iqr(&levels),
        ) else {
            return FactorScore::unsampled(factor);
        };
        let n_responses = rows.len();

        let proficiency: Vec<f64> = rows
            .iter()
            .filter_map(|r| r.proficiency_level)
            .map(|p| p as f64)
            .collect();
        let coverage: Vec<f64> = rows
            .iter()
            .filter_map(|r| r.coverage_level)
            .map(|c| c as f64)
            .collect();
        // A dimension nobody rated falls back to the combined median.
        let proficiency_median = stats::median(&proficiency).unwrap_or(median_level);
        let coverage_median = stats::median(&coverage).unwrap_or(median_level);

        let confidences: Vec<f64> = rows.iter().filter_map(|r| r.confidence).collect();
        let confidence_avg = stats::mean(&confidences).unwrap_or(self.config.default_confidence);

        let evidence_rate = if factor.evidence_required {
            rows.iter().filter(|r| r.has_evidence()).count() as f64 / n_responses as f64
        } else {
            1.0
        };

        let index_raw = median_level;
        let quality_penalty = self.quality_penalty(
            n_responses,
            dispersion,
            factor.evidence_required,
            evidence_rate,
        );

        FactorScore {
            factor: factor.clone(),
            n_responses,
            median_level: Some(median_level),
            mean_level: Some(mean_level),
            proficiency_median: Some(proficiency_median),
            coverage_median: Some(coverage_median),
            dispersion: Some(dispersion),
            confidence_avg: Some(confidence_avg),
            evidence_rate: Some(evidence_rate),
            index_raw,
            quality_penalty,
            index_adjusted: (index_raw - quality_penalty).max(1.0),
        }
    }

    /// Additive penalty for low participation, disagreement and missing
    /// evidence. One step per failed check.
    #[must_use]
    pub fn quality_penalty(
        &self,
        n_responses: usize,
        dispersion: f64,
        evidence_required: bool,
        evidence_rate: f64,
    ) -> f64 {
        let checks = [
            n_responses < self.config.min_responses,
            dispersion > self.config.max_dispersion,
            evidence_required && evidence_rate < self.config.min_evidence_rate,
        ];
        checks.into_iter().filter(|&failed| failed).count() as f64 * self.config.penalty_step
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Area;

    fn catalog(evidence_required: bool) -> FactorCatalog {
        FactorCatalog::new(vec![
            Factor::new("PM_01", Area::ProjectManagement, "Scope", 4, "Program Office")
                .with_evidence_required(evidence_required),
            Factor::new("PM_02", Area::ProjectManagement, "Schedule", 3, "Program Office"),
        ])
        .unwrap()
    }

    fn responses(levels: &[i64]) -> Vec<Response> {
        levels
            .iter()
            .enumerate()
            .map(|(i, &level)| {
                Response::new("2025-Q1", format!("R{i}"), "Finance", "PM_01", level)
            })
            .collect()
    }

    #[test]
    fn test_five_responses_no_penalty() {
        let scores = FactorScorer::default().score(
            &responses(&[1, 2, 2, 3, 5]),
            &catalog(false),
            "2025-Q1",
            None,
        );
        let s = &scores[0];
        assert_eq!(s.n_responses, 5);
        assert_eq!(s.median_level, Some(2.0));
        assert_eq!(s.dispersion, Some(1.0));
        assert_eq!(s.evidence_rate, Some(1.0));
        assert_eq!(s.confidence_avg, Some(3.5));
        assert_eq!(s.proficiency_median, Some(2.0));
        assert!((s.quality_penalty).abs() < f64::EPSILON);
        assert!((s.index_adjusted - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_two_responses_low_n_penalty() {
        let scores =
            FactorScorer::default().score(&responses(&[1, 2]), &catalog(false), "2025-Q1", None);
        let s = &scores[0];
        assert_eq!(s.median_level, Some(1.5));
        assert!((s.quality_penalty - 0.5).abs() < f64::EPSILON);
        assert!((s.index_adjusted - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unsampled_row() {
        let scores =
            FactorScorer::default().score(&responses(&[3, 3, 3]), &catalog(false), "2025-Q1", None);
        let s = &scores[1];
        assert_eq!(s.factor.factor_id, "PM_02");
        assert!(!s.has_responses());
        assert_eq!(s.dispersion, None);
        assert_eq!(s.evidence_rate, None);
        assert!((s.index_adjusted - 1.0).abs() < f64::EPSILON);
        assert!((s.current_level() - 1.0).abs() < f64::EPSILON);
        assert!((s.gap_levels() - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_evidence_penalty_and_blank_links() {
        let rows: Vec<Response> = responses(&[4, 4, 4, 4])
            .into_iter()
            .enumerate()
            .map(|(i, r)| match i {
                0 => r.with_evidence("https://wiki/plan"),
                1 => r.with_evidence("   "),
                _ => r,
            })
            .collect();

        let scores = FactorScorer::default().score(&rows, &catalog(true), "2025-Q1", None);
        let s = &scores[0];
        assert_eq!(s.evidence_rate, Some(0.25));
        assert!((s.quality_penalty - 0.5).abs() < f64::EPSILON);
        assert!((s.index_adjusted - 3.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_dimension_fallback_and_confidence() {
        let rows = vec![
            Response::new("2025-Q1", "A", "Finance", "PM_01", 2)
                .with_dimensions(2, 4)
                .with_confidence(4.0),
            Response::new("2025-Q1", "B", "Finance", "PM_01", 3).with_confidence(2.0),
            Response::new("2025-Q1", "C", "Finance", "PM_01", 3),
        ];
        let scores = FactorScorer::default().score(&rows, &catalog(false), "2025-Q1", None);
        let s = &scores[0];
        assert_eq!(s.proficiency_median, Some(2.0));
        assert_eq!(s.coverage_median, Some(4.0));
        assert_eq!(s.confidence_avg, Some(3.0));
    }

    #[test]
    fn test_group_and_cycle_filters() {
        let rows = vec![
            Response::new("2025-Q1", "A", "Finance", "PM_01", 5),
            Response::new("2025-Q1", "B", "Operations", "PM_01", 1),
            Response::new("2024-Q4", "C", "Finance", "PM_01", 1),
        ];
        let scorer = FactorScorer::default();
        let factors = catalog(false);

        let finance = scorer.score(&rows, &factors, "2025-Q1", Some("Finance"));
        assert_eq!(finance[0].n_responses, 1);
        assert_eq!(finance[0].median_level, Some(5.0));

        let all = scorer.score(&rows, &factors, "2025-Q1", Some(ALL_GROUPS));
        assert_eq!(all[0].n_responses, 2);
    }

    #[test]
    fn test_penalty_caps_at_three_steps() {
        let scorer = FactorScorer::default();
        assert!((scorer.quality_penalty(1, 2.0, true, 0.0) - 1.5).abs() < f64::EPSILON);
        assert!((scorer.quality_penalty(3, 1.5, true, 0.5)).abs() < f64::EPSILON);
        assert!((scorer.quality_penalty(3, 1.5, false, 0.0)).abs() < f64::EPSILON);
    }

    #[test]
    fn test_serializes_flat_factor_fields() {
        let scores =
            FactorScorer::default().score(&responses(&[3]), &catalog(false), "2025-Q1", None);
        let json = serde_json::to_value(&scores[0]).unwrap();
        assert_eq!(json["factor_id"], "PM_01");
        assert_eq!(json["area"], "Project Management");
        assert_eq!(json["n_responses"], 1);
        assert!(json["dispersion"].is_number());
    }
}
