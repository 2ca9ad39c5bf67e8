//! Trend stage.

use super::load::Dataset;
use crate::config::ScoringConfig;
use crate::error::{OptionContext, Result};
use crate::scoring::{TrendComputer, TrendSummary, TrendTables};
use serde::Serialize;

/// Trend tables plus the baseline-to-latest comparison.
#[derive(Debug, Clone, Serialize)]
pub struct TrendReport {
    pub tables: TrendTables,
    pub summary: TrendSummary,
}

/// Score every cycle in `dataset`. Fails with fewer than two cycles.
pub fn run_trends(dataset: &Dataset, config: &ScoringConfig) -> Result<TrendReport> {
    let tables = TrendComputer::new(config.clone()).compute(&dataset.responses, &dataset.factors);
    let summary = tables.summary().with_context_none(|| {
        format!(
            "trend analysis needs at least two cycles, found {}",
            tables.overall.len()
        )
    })?;
    tracing::info!(
        "Overall index moved {:+.2} from {} to {}",
        summary.overall.change,
        summary.baseline_cycle,
        summary.latest_cycle
    );
    Ok(TrendReport { tables, summary })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RmmError;
    use crate::model::{Area, Factor, Response};

    fn dataset(cycles: &[&str]) -> Dataset {
        let factors = vec![Factor::new("EVAL_01", Area::EvaluationImpact, "Metrics", 4, "M&E")];
        let responses = cycles
            .iter()
            .enumerate()
            .map(|(i, cycle)| Response::new(*cycle, "R1", "Ops", "EVAL_01", i as i64 + 1))
            .collect();
        Dataset::from_parts(factors, responses, Vec::new()).unwrap()
    }

    #[test]
    fn test_trends_over_two_cycles() {
        let report = run_trends(&dataset(&["2024-Q4", "2025-Q1"]), &ScoringConfig::default())
            .unwrap();
        assert_eq!(report.tables.overall.len(), 2);
        assert_eq!(report.summary.cycles, 2);
        assert_eq!(report.summary.areas.len(), 1);
    }

    #[test]
    fn test_single_cycle_is_rejected() {
        let err = run_trends(&dataset(&["2025-Q1"]), &ScoringConfig::default()).unwrap_err();
        assert!(matches!(err, RmmError::Validation(_)));
        assert!(err.to_string().contains("at least two cycles"));
    }
}
