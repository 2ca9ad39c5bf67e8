//! Gap analysis and the prioritized improvement backlog.
//!
//! A factor below target is matched to every catalog action whose
//! applicability threshold it has not yet passed. Each match is ranked by
//!
//! ```text
//! priority = impact × gap × weight / max(effort, 1) × quality_factor
//! ```
//!
//! where the quality factor discounts gaps measured on thin, contested or
//! undocumented data.

use super::factor::FactorScore;
use crate::config::ScoringConfig;
use crate::model::{Action, ActionCatalog, Area, Timeframe};
use serde::{Deserialize, Serialize};

/// One backlog row: a factor below target paired with an applicable action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gap {
    pub factor_id: String,
    pub factor_name: String,
    pub area: Area,
    pub current_level: f64,
    pub target_level: u8,
    pub gap_levels: f64,
    pub proficiency_level: Option<f64>,
    pub coverage_level: Option<f64>,
    pub action_id: String,
    pub action_text: String,
    pub transition: String,
    pub impact: u8,
    pub effort: u8,
    pub timeframe: Timeframe,
    pub quality_factor: f64,
    pub priority_score: f64,
    pub owner_group: String,
}

/// Builds the ranked backlog.
#[derive(Debug, Clone, Default)]
pub struct GapAnalyzer {
    config: ScoringConfig,
}

impl GapAnalyzer {
    #[must_use]
    pub const fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// Gap rows sorted by descending priority. Ties keep factor then action
    /// catalog order.
    #[must_use]
    pub fn analyze(&self, scores: &[FactorScore], actions: &ActionCatalog) -> Vec<Gap> {
        let mut gaps: Vec<Gap> = scores
            .iter()
            .filter(|score| score.gap_levels() > 0.0)
            .flat_map(|score| {
                let current = score.current_level();
                actions
                    .for_factor(&score.factor.factor_id)
                    .filter(move |action| action.if_level_leq as f64 >= current)
                    .map(move |action| self.gap_row(score, action))
            })
            .collect();

        gaps.sort_by(|a, b| b.priority_score.total_cmp(&a.priority_score));
        tracing::debug!("Gap analysis produced {} backlog rows", gaps.len());
        gaps
    }

    fn gap_row(&self, score: &FactorScore, action: &Action) -> Gap {
        let factor = &score.factor;
        let gap_levels = score.gap_levels();
        let quality_factor = self.quality_factor(score);
        let priority_score = f64::from(action.impact) * gap_levels * factor.weight
            / f64::from(action.effort.max(1))
            * quality_factor;

        Gap {
            factor_id: factor.factor_id.clone(),
            factor_name: factor.factor_name.clone(),
            area: factor.area,
            current_level: score.current_level(),
            target_level: factor.target_level,
            gap_levels,
            proficiency_level: score.proficiency_median,
            coverage_level: score.coverage_median,
            action_id: action.action_id.clone(),
            action_text: action.action_text.clone(),
            transition: action.transition(),
            impact: action.impact,
            effort: action.effort,
            timeframe: action.timeframe,
            quality_factor,
            priority_score,
            owner_group: factor.owner_group.clone(),
        }
    }

    /// Trust multiplier in [0, 1] for a factor's data.
    ///
    /// Product of a response term `min(1, n / full)`, an agreement term
    /// `max(0, 1 − iqr / scale)` and the evidence rate. Factors nobody rated
    /// get a flat, small factor so their gaps sink to the bottom.
    #[must_use]
    pub fn quality_factor(&self, score: &FactorScore) -> f64 {
        if !score.has_responses() {
            return self.config.unsampled_quality_factor;
        }
        let q_response =
            (score.n_responses as f64 / self.config.full_confidence_responses).min(1.0);
        let q_dispersion = score.dispersion.map_or(self.config.undefined_dispersion_factor, |d| {
            (1.0 - d / self.config.dispersion_scale).max(0.0)
        });
        let q_evidence = score.evidence_rate.unwrap_or(0.0);
        q_response * q_dispersion * q_evidence
    }
}

// ============================================================================
// Backlog filtering
// ============================================================================

/// Narrows a ranked backlog. Empty sets match everything.
#[derive(Debug, Clone, Default)]
pub struct GapFilter {
    pub areas: Vec<Area>,
    pub timeframes: Vec<Timeframe>,
    pub owners: Vec<String>,
    pub limit: Option<usize>,
}

impl GapFilter {
    #[must_use]
    pub fn matches(&self, gap: &Gap) -> bool {
        (self.areas.is_empty() || self.areas.contains(&gap.area))
            && (self.timeframes.is_empty() || self.timeframes.contains(&gap.timeframe))
            && (self.owners.is_empty() || self.owners.iter().any(|o| *o == gap.owner_group))
    }

    /// Keep matching rows in their existing order, then truncate.
    #[must_use]
    pub fn apply(&self, gaps: Vec<Gap>) -> Vec<Gap> {
        let filtered = gaps.into_iter().filter(|g| self.matches(g));
        match self.limit {
            Some(limit) => filtered.take(limit).collect(),
            None => filtered.collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Factor, FactorCatalog};

    fn factor_score(id: &str, target: u8, median: Option<f64>, n: usize) -> FactorScore {
        FactorScore {
            factor: Factor::new(id, Area::ProjectManagement, format!("{id} name"), target, "PMO"),
            n_responses: n,
            median_level: median,
            mean_level: median,
            proficiency_median: median,
            coverage_median: median,
            dispersion: median.map(|_| 0.0),
            confidence_avg: median.map(|_| 3.5),
            evidence_rate: median.map(|_| 1.0),
            index_raw: median.unwrap_or(1.0),
            quality_penalty: 0.0,
            index_adjusted: median.unwrap_or(1.0),
        }
    }

    fn action(id: &str, factor: &str, leq: i64, impact: u8, effort: u8) -> Action {
        Action {
            action_id: id.to_string(),
            factor_id: factor.to_string(),
            if_level_leq: leq,
            action_text: "Improve {factor}".to_string(),
            impact,
            effort,
            timeframe: Timeframe::Short,
            dependency_action_id: None,
        }
    }

    fn catalog(actions: Vec<Action>, ids: &[&str]) -> ActionCatalog {
        let factors = FactorCatalog::new(
            ids.iter()
                .map(|id| Factor::new(*id, Area::ProjectManagement, format!("{id} name"), 4, "PMO"))
                .collect(),
        )
        .unwrap();
        ActionCatalog::new(actions, &factors)
    }

    #[test]
    fn test_priority_formula() {
        let scores = vec![factor_score("PM_01", 4, Some(2.0), 5)];
        let actions = catalog(vec![action("A1", "PM_01", 2, 4, 2)], &["PM_01"]);

        let gaps = GapAnalyzer::default().analyze(&scores, &actions);

        assert_eq!(gaps.len(), 1);
        let gap = &gaps[0];
        assert!((gap.gap_levels - 2.0).abs() < f64::EPSILON);
        assert!((gap.quality_factor - 1.0).abs() < f64::EPSILON);
        assert!((gap.priority_score - 4.0).abs() < f64::EPSILON);
        assert_eq!(gap.transition, "Level 2 → 3");
        assert_eq!(gap.action_text, "Improve PM_01 name");
    }

    #[test]
    fn test_threshold_and_target_filtering() {
        let scores = vec![
            factor_score("PM_01", 4, Some(3.0), 5),
            factor_score("PM_02", 3, Some(3.0), 5),
        ];
        let actions = catalog(
            vec![
                action("A1", "PM_01", 2, 5, 1),
                action("A2", "PM_01", 3, 3, 3),
                action("A3", "PM_02", 4, 5, 1),
            ],
            &["PM_01", "PM_02"],
        );

        let gaps = GapAnalyzer::default().analyze(&scores, &actions);
        let ids: Vec<_> = gaps.iter().map(|g| g.action_id.as_str()).collect();
        assert_eq!(ids, ["A2"]);
    }

    #[test]
    fn test_unsampled_factor_uses_flat_quality_factor() {
        let scores = vec![factor_score("PM_01", 3, None, 0)];
        let actions = catalog(vec![action("A1", "PM_01", 1, 5, 1)], &["PM_01"]);

        let gaps = GapAnalyzer::default().analyze(&scores, &actions);
        assert_eq!(gaps.len(), 1);
        assert!((gaps[0].current_level - 1.0).abs() < f64::EPSILON);
        assert!((gaps[0].quality_factor - 0.1).abs() < f64::EPSILON);
        assert!((gaps[0].priority_score - 1.0).abs() < 1e-12);
        assert_eq!(gaps[0].proficiency_level, None);
    }

    #[test]
    fn test_quality_factor_terms() {
        let analyzer = GapAnalyzer::default();
        let mut score = factor_score("PM_01", 4, Some(2.0), 2);
        score.dispersion = Some(1.0);
        score.evidence_rate = Some(0.5);
        // 0.4 * 0.5 * 0.5
        assert!((analyzer.quality_factor(&score) - 0.1).abs() < 1e-12);

        score.dispersion = Some(3.0);
        assert!(analyzer.quality_factor(&score).abs() < f64::EPSILON);
    }

    #[test]
    fn test_sorted_descending_and_stable() {
        let scores = vec![
            factor_score("PM_01", 5, Some(1.0), 5),
            factor_score("PM_02", 5, Some(1.0), 5),
        ];
        let actions = catalog(
            vec![
                action("A1", "PM_01", 1, 1, 1),
                action("A2", "PM_01", 1, 5, 1),
                action("B1", "PM_02", 1, 1, 1),
            ],
            &["PM_01", "PM_02"],
        );

        let gaps = GapAnalyzer::default().analyze(&scores, &actions);
        let ids: Vec<_> = gaps.iter().map(|g| g.action_id.as_str()).collect();
        assert_eq!(ids, ["A2", "A1", "B1"]);
    }

    #[test]
    fn test_gap_filter() {
        let scores = vec![factor_score("PM_01", 5, Some(1.0), 5)];
        let mut long = action("A2", "PM_01", 1, 2, 1);
        long.timeframe = Timeframe::Long;
        let actions = catalog(vec![action("A1", "PM_01", 1, 5, 1), long], &["PM_01"]);
        let gaps = GapAnalyzer::default().analyze(&scores, &actions);

        let filter = GapFilter {
            timeframes: vec![Timeframe::Long],
            ..GapFilter::default()
        };
        let kept = filter.apply(gaps.clone());
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].action_id, "A2");

        let top = GapFilter {
            limit: Some(1),
            ..GapFilter::default()
        };
        assert_eq!(top.apply(gaps.clone())[0].action_id, "A1");

        let other_owner = GapFilter {
            owners: vec!["Finance".to_string()],
            ..GapFilter::default()
        };
        assert!(other_owner.apply(gaps).is_empty());
    }
}
