//! Data-quality summary for one cycle's factor scores.
//!
//! Percentages are on a 0-100 scale.

use super::factor::FactorScore;
use super::participation::ParticipationStats;
use super::stats;
use crate::config::{ScoringConfig, EXPECTED_RESPONSES_PER_FACTOR};
use serde::{Deserialize, Serialize};

/// Factors listed in [`DataQualitySummary::high_disagreement`].
const MAX_DISPUTED_FACTORS: usize = 5;

/// Thresholds above which a [`DataQualityIssue`] is raised.
const LOW_RESPONSE_ISSUE_THRESHOLD: usize = 5;
const NO_EVIDENCE_ISSUE_THRESHOLD: usize = 3;
const DISAGREEMENT_ISSUE_THRESHOLD: usize = 5;

/// Factor counts by number of responses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseBuckets {
    /// Fewer than the minimum response count
    pub low: usize,
    /// At least the minimum but below full confidence
    pub medium: usize,
    pub high: usize,
}

/// Evidence-required factor counts by evidence rate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceBuckets {
    pub none: usize,
    pub partial: usize,
    pub good: usize,
}

/// A factor whose raters disagree strongly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisputedFactor {
    pub factor_id: String,
    pub factor_name: String,
    pub dispersion: f64,
}

/// A data-collection problem worth acting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataQualityIssue {
    /// Many factors have too few responses
    LowParticipation { factors: usize },
    /// Several evidence-required factors have no evidence at all
    MissingEvidence { factors: usize },
    /// Many factors show high rater disagreement
    HighDisagreement { factors: usize },
    /// Group respondent counts differ by more than a factor of three
    UnbalancedGroups,
}

impl DataQualityIssue {
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::LowParticipation { factors } => format!(
                "Increase participation: {factors} factors have too few responses. Consider targeted outreach."
            ),
            Self::MissingEvidence { factors } => format!(
                "Improve documentation: {factors} required factors lack supporting evidence."
            ),
            Self::HighDisagreement { factors } => format!(
                "Resolve disagreements: {factors} factors show high disagreement. Consider facilitated discussions."
            ),
            Self::UnbalancedGroups => {
                "Balance participation: response rates vary significantly across groups.".to_string()
            }
        }
    }
}

/// How far one cycle's scores can be trusted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataQualitySummary {
    pub n_factors: usize,
    pub avg_responses: f64,
    /// Mean response count relative to full confidence, capped at 100
    pub response_coverage: f64,
    /// Mean IQR, `None` when no factor was rated
    pub avg_dispersion: Option<f64>,
    pub consensus: f64,
    /// Mean evidence rate over evidence-required factors
    pub evidence_completeness: Option<f64>,
    pub overall_quality: f64,
    pub response_buckets: ResponseBuckets,
    /// `None` when no factor requires evidence
    pub evidence_buckets: Option<EvidenceBuckets>,
    /// Most disputed first
    pub high_disagreement: Vec<DisputedFactor>,
    pub high_disagreement_count: usize,
    pub average_confidence: Option<f64>,
    pub completion_percentage: f64,
}

impl DataQualitySummary {
    #[must_use]
    pub fn compute(scores: &[FactorScore], config: &ScoringConfig) -> Self {
        let n_factors = scores.len();
        let responses: Vec<f64> = scores.iter().map(|s| s.n_responses as f64).collect();
        let avg_responses = stats::mean(&responses).unwrap_or(0.0);
        let response_coverage =
            (avg_responses / config.full_confidence_responses * 100.0).min(100.0);

        let dispersions: Vec<f64> = scores.iter().filter_map(|s| s.dispersion).collect();
        let avg_dispersion = stats::mean(&dispersions);
        let consensus = avg_dispersion.map_or(0.0, |d| {
            (100.0 - d / config.dispersion_scale * 100.0).max(0.0)
        });

        let evidence_required: Vec<&FactorScore> =
            scores.iter().filter(|s| s.factor.evidence_required).collect();
        let evidence_rates: Vec<f64> = evidence_required
            .iter()
            .map(|s| s.evidence_rate.unwrap_or(0.0))
            .collect();
        let evidence_completeness = stats::mean(&evidence_rates).map(|rate| rate * 100.0);

        let overall_quality =
            (response_coverage + consensus + evidence_completeness.unwrap_or(100.0)) / 3.0;

        let mut response_buckets = ResponseBuckets::default();
        for score in scores {
            let n = score.n_responses as f64;
            if score.n_responses < config.min_responses {
                response_buckets.low += 1;
            } else if n < config.full_confidence_responses {
                response_buckets.medium += 1;
            } else {
                response_buckets.high += 1;
            }
        }

        let evidence_buckets = (!evidence_rates.is_empty()).then(|| {
            let mut buckets = EvidenceBuckets::default();
            for &rate in &evidence_rates {
                if rate <= 0.0 {
                    buckets.none += 1;
                } else if rate < config.min_evidence_rate {
                    buckets.partial += 1;
                } else {
                    buckets.good += 1;
                }
            }
            buckets
        });

        let mut disputed: Vec<DisputedFactor> = scores
            .iter()
            .filter_map(|s| {
                let dispersion = s.dispersion.filter(|&d| d > config.max_dispersion)?;
                Some(DisputedFactor {
                    factor_id: s.factor.factor_id.clone(),
                    factor_name: s.factor.factor_name.clone(),
                    dispersion,
                })
            })
            .collect();
        disputed.sort_by(|a, b| b.dispersion.total_cmp(&a.dispersion));
        let high_disagreement_count = disputed.len();
        disputed.truncate(MAX_DISPUTED_FACTORS);

        let confidences: Vec<f64> = scores.iter().filter_map(|s| s.confidence_avg).collect();

        let expected = (n_factors * EXPECTED_RESPONSES_PER_FACTOR) as f64;
        let actual: usize = scores.iter().map(|s| s.n_responses).sum();
        let completion_percentage = if expected > 0.0 {
            (actual as f64 / expected * 100.0).min(100.0)
        } else {
            0.0
        };

        Self {
            n_factors,
            avg_responses,
            response_coverage,
            avg_dispersion,
            consensus,
            evidence_completeness,
            overall_quality,
            response_buckets,
            evidence_buckets,
            high_disagreement: disputed,
            high_disagreement_count,
            average_confidence: stats::mean(&confidences),
            completion_percentage,
        }
    }

    /// Issues worth raising for this cycle, most fundamental first.
    #[must_use]
    pub fn issues(&self, participation: Option<&ParticipationStats>) -> Vec<DataQualityIssue> {
        let mut issues = Vec::new();
        if self.response_buckets.low > LOW_RESPONSE_ISSUE_THRESHOLD {
            issues.push(DataQualityIssue::LowParticipation {
                factors: self.response_buckets.low,
            });
        }
        if let Some(buckets) = self.evidence_buckets {
            if buckets.none > NO_EVIDENCE_ISSUE_THRESHOLD {
                issues.push(DataQualityIssue::MissingEvidence {
                    factors: buckets.none,
                });
            }
        }
        if self.high_disagreement_count > DISAGREEMENT_ISSUE_THRESHOLD {
            issues.push(DataQualityIssue::HighDisagreement {
                factors: self.high_disagreement_count,
            });
        }
        if participation.is_some_and(ParticipationStats::is_unbalanced) {
            issues.push(DataQualityIssue::UnbalancedGroups);
        }
        issues
    }
}
