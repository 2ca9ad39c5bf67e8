//! Factor score filtering applied before aggregation.

use super::factor::FactorScore;
use crate::config::FilterConfig;
use crate::model::Area;

/// Keeps factor scores that pass every configured criterion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FactorFilter {
    pub area: Option<Area>,
    pub min_responses: Option<usize>,
    /// Also drops rows whose dispersion is undefined
    pub max_dispersion: Option<f64>,
    /// Keep rows with a positive evidence rate only
    pub evidence_only: bool,
}

impl From<&FilterConfig> for FactorFilter {
    fn from(config: &FilterConfig) -> Self {
        Self {
            area: config.area,
            min_responses: config.min_responses,
            max_dispersion: config.max_dispersion,
            evidence_only: config.evidence_only,
        }
    }
}

impl FactorFilter {
    /// Whether no criterion is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    #[must_use]
    pub fn matches(&self, score: &FactorScore) -> bool {
        if self.area.is_some_and(|area| score.factor.area != area) {
            return false;
        }
        if self.min_responses.is_some_and(|min| score.n_responses < min) {
            return false;
        }
        if let Some(max) = self.max_dispersion {
            if !score.dispersion.is_some_and(|d| d <= max) {
                return false;
            }
        }
        if self.evidence_only && !score.evidence_rate.is_some_and(|rate| rate > 0.0) {
            return false;
        }
        true
    }

    #[must_use]
    pub fn apply(&self, scores: Vec<FactorScore>) -> Vec<FactorScore> {
        if self.is_empty() {
            return scores;
        }
        let before = scores.len();
        let kept: Vec<FactorScore> = scores.into_iter().filter(|s| self.matches(s)).collect();
        tracing::debug!("Factor filter kept {} of {before} factors", kept.len());
        kept
    }
}
