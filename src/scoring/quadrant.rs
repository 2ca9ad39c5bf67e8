//! Proficiency/coverage quadrants.

use crate::config::DEFAULT_QUADRANT_THRESHOLD;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maturity archetype from the two rating dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quadrant {
    /// High proficiency, high coverage
    InstitutionalMaturity,
    /// High proficiency, low coverage
    StrongNotScaled,
    /// Low proficiency, high coverage
    WidespreadQualityNeeded,
    /// Low proficiency, low coverage
    EarlyStage,
}

impl Quadrant {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::InstitutionalMaturity => "Institutional maturity",
            Self::StrongNotScaled => "Strong, not yet scaled",
            Self::WidespreadQualityNeeded => "Widespread, quality needed",
            Self::EarlyStage => "Early stage",
        }
    }

    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::InstitutionalMaturity => "Institutional maturity and stable programme",
            Self::StrongNotScaled => "Strong practices not yet scaled across the organisation",
            Self::WidespreadQualityNeeded => {
                "Widespread implementation requiring quality improvement"
            }
            Self::EarlyStage => "Early-stage capability requiring structural improvements",
        }
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Splits each axis at a threshold, inclusive on the high side.
#[derive(Debug, Clone, Copy)]
pub struct QuadrantClassifier {
    threshold: f64,
}

impl Default for QuadrantClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_QUADRANT_THRESHOLD)
    }
}

impl QuadrantClassifier {
    #[must_use]
    pub const fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    #[must_use]
    pub fn classify(&self, proficiency: f64, coverage: f64) -> Quadrant {
        match (proficiency >= self.threshold, coverage >= self.threshold) {
            (true, true) => Quadrant::InstitutionalMaturity,
            (true, false) => Quadrant::StrongNotScaled,
            (false, true) => Quadrant::WidespreadQualityNeeded,
            (false, false) => Quadrant::EarlyStage,
        }
    }
}
