//! Multi-cycle trend tables.
//!
//! Every cycle is scored from scratch with no state carried between cycles,
//! so cycles are scored in parallel and reassembled in order.

use super::area::AreaAggregator;
use super::factor::FactorScorer;
use super::overall::OverallAggregator;
use crate::config::ScoringConfig;
use crate::model::{Area, FactorCatalog, Response};
use indexmap::IndexSet;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallTrendRow {
    pub cycle_id: String,
    pub overall_index: f64,
    pub overall_level: u8,
    pub overall_proficiency: Option<f64>,
    pub overall_coverage: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaTrendRow {
    pub cycle_id: String,
    pub area: Area,
    pub area_index: f64,
    pub area_level: u8,
    pub avg_proficiency: Option<f64>,
    pub avg_coverage: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorTrendRow {
    pub cycle_id: String,
    pub factor_id: String,
    pub factor_name: String,
    pub index_adjusted: f64,
}

/// The three trend tables, rows ordered by cycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrendTables {
    pub overall: Vec<OverallTrendRow>,
    pub by_area: Vec<AreaTrendRow>,
    pub by_factor: Vec<FactorTrendRow>,
}

/// Baseline-to-latest movement of one index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendDelta {
    pub baseline: f64,
    pub latest: f64,
    pub change: f64,
    /// Relative change in percent; `None` when the baseline is zero
    pub change_pct: Option<f64>,
}

impl TrendDelta {
    #[must_use]
    pub fn new(baseline: f64, latest: f64) -> Self {
        let change = latest - baseline;
        Self {
            baseline,
            latest,
            change,
            change_pct: (baseline != 0.0).then(|| change / baseline * 100.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaTrendDelta {
    pub area: Area,
    #[serde(flatten)]
    pub delta: TrendDelta,
}

/// Comparison of the first and last cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendSummary {
    pub baseline_cycle: String,
    pub latest_cycle: String,
    pub cycles: usize,
    pub overall: TrendDelta,
    /// Areas present in both cycles
    pub areas: Vec<AreaTrendDelta>,
}

impl TrendTables {
    /// Distinct cycles in table order.
    pub fn cycles(&self) -> impl Iterator<Item = &str> {
        self.overall.iter().map(|row| row.cycle_id.as_str())
    }

    /// Deltas between the first and last cycle, or `None` with fewer than
    /// two cycles.
    #[must_use]
    pub fn summary(&self) -> Option<TrendSummary> {
        let (first, last) = match self.overall.as_slice() {
            [first, .., last] => (first, last),
            _ => return None,
        };

        let area_index = |cycle: &str, area: Area| {
            self.by_area
                .iter()
                .find(|row| row.cycle_id == cycle && row.area == area)
                .map(|row| row.area_index)
        };
        let areas = Area::ALL
            .into_iter()
            .filter_map(|area| {
                let baseline = area_index(&first.cycle_id, area)?;
                let latest = area_index(&last.cycle_id, area)?;
                Some(AreaTrendDelta {
                    area,
                    delta: TrendDelta::new(baseline, latest),
                })
            })
            .collect();

        Some(TrendSummary {
            baseline_cycle: first.cycle_id.clone(),
            latest_cycle: last.cycle_id.clone(),
            cycles: self.overall.len(),
            overall: TrendDelta::new(first.overall_index, last.overall_index),
            areas,
        })
    }
}

/// Scores every cycle present in a response set.
#[derive(Debug, Clone, Default)]
pub struct TrendComputer {
    config: ScoringConfig,
}

impl TrendComputer {
    #[must_use]
    pub const fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// Build the trend tables with cycles in order of first appearance.
    #[must_use]
    pub fn compute(&self, responses: &[Response], factors: &FactorCatalog) -> TrendTables {
        let cycles: IndexSet<&str> = responses.iter().map(|r| r.cycle_id.as_str()).collect();
        tracing::info!("Computing trends over {} cycles", cycles.len());

        let scorer = FactorScorer::new(self.config.clone());
        let limit = self.config.trend_factor_limit;

        let per_cycle: Vec<TrendTables> = cycles
            .into_iter()
            .collect::<Vec<_>>()
            .into_par_iter()
            .map(|cycle| {
                let scores = scorer.score(responses, factors, cycle, None);
                let areas = AreaAggregator::new().aggregate(&scores);
                let overall = OverallAggregator::new().aggregate(&areas);

                TrendTables {
                    overall: vec![OverallTrendRow {
                        cycle_id: cycle.to_string(),
                        overall_index: overall.overall_index,
                        overall_level: overall.overall_level,
                        overall_proficiency: overall.overall_proficiency,
                        overall_coverage: overall.overall_coverage,
                    }],
                    by_area: areas
                        .into_iter()
                        .map(|area| AreaTrendRow {
                            cycle_id: cycle.to_string(),
                            area: area.area,
                            area_index: area.area_index,
                            area_level: area.area_level,
                            avg_proficiency: area.avg_proficiency,
                            avg_coverage: area.avg_coverage,
                        })
                        .collect(),
                    by_factor: scores
                        .into_iter()
                        .take(limit)
                        .map(|score| FactorTrendRow {
                            cycle_id: cycle.to_string(),
                            factor_id: score.factor.factor_id,
                            factor_name: score.factor.factor_name,
                            index_adjusted: score.index_adjusted,
                        })
                        .collect(),
                }
            })
            .collect();

        per_cycle
            .into_iter()
            .fold(TrendTables::default(), |mut acc, cycle| {
                acc.overall.extend(cycle.overall);
                acc.by_area.extend(cycle.by_area);
                acc.by_factor.extend(cycle.by_factor);
                acc
            })
    }
}
