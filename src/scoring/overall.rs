//! Organization-wide roll-up.

use super::area::AreaScore;
use super::stats;
use crate::model::{round_level, MaturityLevel};
use serde::{Deserialize, Serialize};

/// Organization-wide maturity. Every area counts equally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallScore {
    pub overall_index: f64,
    pub overall_level: u8,
    pub overall_proficiency: Option<f64>,
    pub overall_coverage: Option<f64>,
}

impl OverallScore {
    #[must_use]
    pub fn maturity(&self) -> MaturityLevel {
        MaturityLevel::from_index(self.overall_index)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct OverallAggregator;

impl OverallAggregator {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Unweighted mean of area indices; 1.0 when there are no areas.
    #[must_use]
    pub fn aggregate(&self, areas: &[AreaScore]) -> OverallScore {
        let indices: Vec<f64> = areas.iter().map(|a| a.area_index).collect();
        let proficiency: Vec<f64> = areas.iter().filter_map(|a| a.avg_proficiency).collect();
        let coverage: Vec<f64> = areas.iter().filter_map(|a| a.avg_coverage).collect();

        let overall_index = stats::mean(&indices).unwrap_or(1.0);
        OverallScore {
            overall_index,
            overall_level: round_level(overall_index),
            overall_proficiency: stats::mean(&proficiency),
            overall_coverage: stats::mean(&coverage),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Area;

    fn area(area: Area, index: f64, dims: Option<f64>) -> AreaScore {
        AreaScore {
            area,
            area_index: index,
            area_level: round_level(index),
            n_factors: 1,
            avg_responses: 3.0,
            avg_proficiency: dims,
            avg_coverage: dims,
        }
    }

    #[test]
    fn test_unweighted_mean() {
        let overall = OverallAggregator::new().aggregate(&[
            area(Area::ProjectManagement, 2.0, Some(2.0)),
            area(Area::EvaluationImpact, 3.0, None),
            area(Area::Invoicing, 4.6, Some(4.0)),
        ]);
        assert!((overall.overall_index - 3.2).abs() < 1e-12);
        assert_eq!(overall.overall_level, 3);
        assert_eq!(overall.overall_proficiency, Some(3.0));
        assert_eq!(overall.maturity(), MaturityLevel::Defined);
    }

    #[test]
    fn test_no_areas() {
        let overall = OverallAggregator::new().aggregate(&[]);
        assert!((overall.overall_index - 1.0).abs() < f64::EPSILON);
        assert_eq!(overall.overall_level, 1);
        assert_eq!(overall.overall_coverage, None);
    }
}
