//! Area roll-up.

use super::factor::FactorScore;
use super::stats;
use crate::model::{round_level, Area};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Weighted maturity of one area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaScore {
    pub area: Area,
    /// Weight-weighted mean of member `index_adjusted`
    pub area_index: f64,
    pub area_level: u8,
    pub n_factors: usize,
    pub avg_responses: f64,
    /// Mean of defined member proficiency medians
    pub avg_proficiency: Option<f64>,
    /// Mean of defined member coverage medians
    pub avg_coverage: Option<f64>,
}

/// Groups factor scores by area.
#[derive(Debug, Clone, Copy, Default)]
pub struct AreaAggregator;

impl AreaAggregator {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// One [`AreaScore`] per area present, in order of first appearance.
    #[must_use]
    pub fn aggregate(&self, scores: &[FactorScore]) -> Vec<AreaScore> {
        let mut by_area: IndexMap<Area, Vec<&FactorScore>> = IndexMap::new();
        for score in scores {
            by_area.entry(score.factor.area).or_default().push(score);
        }

        by_area
            .into_iter()
            .map(|(area, members)| Self::area_score(area, &members))
            .collect()
    }

    fn area_score(area: Area, members: &[&FactorScore]) -> AreaScore {
        let total_weight: f64 = members.iter().map(|s| s.factor.weight).sum();
        let area_index = if total_weight > 0.0 {
            members
                .iter()
                .map(|s| s.index_adjusted * s.factor.weight)
                .sum::<f64>()
                / total_weight
        } else {
            1.0
        };

        let responses: Vec<f64> = members.iter().map(|s| s.n_responses as f64).collect();
        let proficiency: Vec<f64> = members.iter().filter_map(|s| s.proficiency_median).collect();
        let coverage: Vec<f64> = members.iter().filter_map(|s| s.coverage_median).collect();

        AreaScore {
            area,
            area_index,
            area_level: round_level(area_index),
            n_factors: members.len(),
            avg_responses: stats::mean(&responses).unwrap_or(0.0),
            avg_proficiency: stats::mean(&proficiency),
            avg_coverage: stats::mean(&coverage),
        }
    }
}
