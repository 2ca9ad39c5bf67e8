//! Maturity scoring engine.
//!
//! Turns validated survey responses into quality-adjusted maturity indices
//! and a ranked improvement backlog.
//!
//! # Pipeline
//!
//! - **[`Validator`]**: drops rows for unknown factors or out-of-range ratings
//! - **[`FactorScorer`]**: per-factor median, IQR and quality penalty
//! - **[`AreaAggregator`]** / **[`OverallAggregator`]**: weighted area and
//!   unweighted overall roll-ups
//! - **[`QuadrantClassifier`]**: proficiency/coverage archetypes
//! - **[`GapAnalyzer`]**: matches under-target factors to actions
//! - **[`TrendComputer`]**: repeats the roll-ups for every cycle
//!
//! # Usage
//!
//! ```no_run
//! use rmm_tools::model::{ActionCatalog, FactorCatalog};
//! use rmm_tools::scoring::{AreaAggregator, FactorScorer, GapAnalyzer, OverallAggregator};
//!
//! # fn run(factors: FactorCatalog, actions: ActionCatalog, responses: Vec<rmm_tools::model::Response>) {
//! let scores = FactorScorer::default().score(&responses, &factors, "2025-Q1", None);
//! let areas = AreaAggregator::new().aggregate(&scores);
//! let overall = OverallAggregator::new().aggregate(&areas);
//! println!("Overall index: {:.2} ({})", overall.overall_index, overall.maturity());
//!
//! for gap in GapAnalyzer::default().analyze(&scores, &actions).iter().take(5) {
//!     println!("{:>6.2}  {}  {}", gap.priority_score, gap.factor_name, gap.action_text);
//! }
//! # }
//! ```

mod area;
mod data_quality;
mod factor;
mod filter;
mod gaps;
mod overall;
mod participation;
mod quadrant;
pub mod stats;
mod trends;
mod validate;

pub use area::{AreaAggregator, AreaScore};
pub use data_quality::{
    DataQualityIssue, DataQualitySummary, DisputedFactor, EvidenceBuckets, ResponseBuckets,
};
pub use factor::{FactorScore, FactorScorer, ALL_GROUPS};
pub use filter::FactorFilter;
pub use gaps::{Gap, GapAnalyzer, GapFilter};
pub use overall::{OverallAggregator, OverallScore};
pub use participation::{GroupParticipation, ParticipationStats};
pub use quadrant::{Quadrant, QuadrantClassifier};
pub use trends::{
    AreaTrendDelta, AreaTrendRow, FactorTrendRow, OverallTrendRow, TrendComputer, TrendDelta,
    TrendSummary, TrendTables,
};
pub use validate::{RejectReason, ValidationReport, Validator};
