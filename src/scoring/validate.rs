//! Response validation.
//!
//! Bad survey rows shrink the sample rather than abort the run: anything
//! referencing an unknown factor or carrying a missing, non-integer or
//! out-of-range rating is dropped and counted.

use crate::model::{FactorCatalog, Response};
use serde::{Deserialize, Serialize};

/// Valid rating range on every scale.
const RATING_RANGE: std::ops::RangeInclusive<i64> = 1..=5;

/// Why a response row was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    UnknownFactor,
    MalformedRating,
    LevelOutOfRange,
    ProficiencyOutOfRange,
    CoverageOutOfRange,
}

impl RejectReason {
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::UnknownFactor => "factor not in catalog",
            Self::MalformedRating => "level missing or not an integer",
            Self::LevelOutOfRange => "level outside 1-5",
            Self::ProficiencyOutOfRange => "proficiency outside 1-5",
            Self::CoverageOutOfRange => "coverage outside 1-5",
        }
    }
}

/// Counts collected while validating one response collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Rows received
    pub total: usize,
    /// Rows kept
    pub kept: usize,
    pub unknown_factor: usize,
    pub malformed_rating: usize,
    pub level_out_of_range: usize,
    pub proficiency_out_of_range: usize,
    pub coverage_out_of_range: usize,
    /// Kept rows whose combined level is not `min(proficiency, coverage)`
    pub inconsistent_combined: usize,
}

impl ValidationReport {
    /// Total rows dropped for any reason.
    #[must_use]
    pub const fn dropped(&self) -> usize {
        self.total - self.kept
    }

    fn record(&mut self, reason: RejectReason) {
        match reason {
            RejectReason::UnknownFactor => self.unknown_factor += 1,
            RejectReason::MalformedRating => self.malformed_rating += 1,
            RejectReason::LevelOutOfRange => self.level_out_of_range += 1,
            RejectReason::ProficiencyOutOfRange => self.proficiency_out_of_range += 1,
            RejectReason::CoverageOutOfRange => self.coverage_out_of_range += 1,
        }
    }
}

/// Filters responses down to rows the scorer can use.
#[derive(Debug, Clone, Copy)]
pub struct Validator<'a> {
    factors: &'a FactorCatalog,
}

impl<'a> Validator<'a> {
    #[must_use]
    pub const fn new(factors: &'a FactorCatalog) -> Self {
        Self { factors }
    }

    /// Check a single row. The first failing rule wins.
    pub fn check(&self, response: &Response) -> Result<(), RejectReason> {
        if !self.factors.contains(&response.factor_id) {
            return Err(RejectReason::UnknownFactor);
        }
        let Some(level) = response.level else {
            return Err(RejectReason::MalformedRating);
        };
        if !RATING_RANGE.contains(&level) {
            return Err(RejectReason::LevelOutOfRange);
        }
        if response
            .proficiency_level
            .is_some_and(|p| !RATING_RANGE.contains(&p))
        {
            return Err(RejectReason::ProficiencyOutOfRange);
        }
        if response
            .coverage_level
            .is_some_and(|c| !RATING_RANGE.contains(&c))
        {
            return Err(RejectReason::CoverageOutOfRange);
        }
        Ok(())
    }

    /// Keep only valid rows, preserving their order.
    pub fn validate(&self, responses: Vec<Response>) -> (Vec<Response>, ValidationReport) {
        let mut report = ValidationReport {
            total: responses.len(),
            ..ValidationReport::default()
        };

        let kept: Vec<Response> = responses
            .into_iter()
            .filter(|response| match self.check(response) {
                Ok(()) => {
                    if !response.is_consistent() {
                        report.inconsistent_combined += 1;
                    }
                    true
                }
                Err(reason) => {
                    report.record(reason);
                    false
                }
            })
            .collect();
        report.kept = kept.len();

        if report.dropped() > 0 {
            tracing::warn!(
                "Dropped {} of {} responses (unknown factor: {}, malformed: {}, level: {}, proficiency: {}, coverage: {})",
                report.dropped(),
                report.total,
                report.unknown_factor,
                report.malformed_rating,
                report.level_out_of_range,
                report.proficiency_out_of_range,
                report.coverage_out_of_range,
            );
        }
        if report.inconsistent_combined > 0 {
            tracing::warn!(
                "{} responses have a combined level that differs from min(proficiency, coverage)",
                report.inconsistent_combined
            );
        }
        tracing::debug!("Validated responses: {} kept", report.kept);

        (kept, report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Area, Factor};

    fn catalog() -> FactorCatalog {
        FactorCatalog::new(vec![Factor::new(
            "PM_01",
            Area::ProjectManagement,
            "Scope",
            3,
            "Program Office",
        )])
        .unwrap()
    }

    fn row(factor: &str, level: i64) -> Response {
        Response::new("2025-Q1", "R1", "Finance", factor, level)
    }

    #[test]
    fn test_drops_unknown_and_out_of_range() {
        let catalog = catalog();
        let responses = vec![
            row("PM_01", 3),
            row("PM_99", 3),
            row("PM_01", 0),
            row("PM_01", 6),
            row("PM_01", 2).with_dimensions(7, 2),
            row("PM_01", 2).with_dimensions(2, 0),
            row("PM_01", 5),
        ];

        let (kept, report) = Validator::new(&catalog).validate(responses);

        assert_eq!(
            kept.iter().map(|r| r.level).collect::<Vec<_>>(),
            [Some(3), Some(5)]
        );
        assert_eq!(report.total, 7);
        assert_eq!(report.kept, 2);
        assert_eq!(report.dropped(), 5);
        assert_eq!(report.unknown_factor, 1);
        assert_eq!(report.level_out_of_range, 2);
        assert_eq!(report.proficiency_out_of_range, 1);
        assert_eq!(report.coverage_out_of_range, 1);
    }

    #[test]
    fn test_inconsistent_rows_are_kept_and_counted() {
        let catalog = catalog();
        let responses = vec![
            row("PM_01", 2).with_dimensions(2, 4),
            row("PM_01", 4).with_dimensions(2, 4),
        ];

        let (kept, report) = Validator::new(&catalog).validate(responses);
        assert_eq!(kept.len(), 2);
        assert_eq!(report.inconsistent_combined, 1);
    }

    #[test]
    fn test_check_reports_first_failure() {
        let catalog = catalog();
        let validator = Validator::new(&catalog);
        assert_eq!(
            validator.check(&row("X", 9)),
            Err(RejectReason::UnknownFactor)
        );
        assert_eq!(
            validator.check(&row("PM_01", 9).with_dimensions(9, 9)),
            Err(RejectReason::LevelOutOfRange)
        );
        assert_eq!(validator.check(&row("PM_01", 1)), Ok(()));
    }

    #[test]
    fn test_missing_level_is_malformed() {
        let catalog = catalog();
        let mut blank = row("PM_01", 3);
        blank.level = None;
        let responses = vec![row("PM_01", 2), blank.clone()];

        assert_eq!(
            Validator::new(&catalog).check(&blank),
            Err(RejectReason::MalformedRating)
        );
        let (kept, report) = Validator::new(&catalog).validate(responses);
        assert_eq!(kept.len(), 1);
        assert_eq!(report.malformed_rating, 1);
        assert_eq!(report.level_out_of_range, 0);
    }
}
