//! Survey response records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// One respondent's rating of one factor in one assessment cycle.
///
/// Ratings are read leniently and kept as raw integers: a null, missing or
/// non-integer rating reads as `None`, and range checks happen in the
/// [`Validator`](crate::scoring::Validator), which drops unusable rows
/// instead of failing the load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub cycle_id: String,
    pub respondent_id: String,
    pub org_group: String,
    pub factor_id: String,
    /// Combined maturity rating, `min(proficiency, coverage)` when both exist
    #[serde(default, deserialize_with = "deserialize_rating")]
    pub level: Option<i64>,
    #[serde(
        default,
        deserialize_with = "deserialize_rating",
        skip_serializing_if = "Option::is_none"
    )]
    pub proficiency_level: Option<i64>,
    #[serde(
        default,
        deserialize_with = "deserialize_rating",
        skip_serializing_if = "Option::is_none"
    )]
    pub coverage_level: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub free_text: Option<String>,
    /// Submission time; `None` when the export omitted it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl Response {
    /// Create a response carrying only the combined level.
    pub fn new(
        cycle_id: impl Into<String>,
        respondent_id: impl Into<String>,
        org_group: impl Into<String>,
        factor_id: impl Into<String>,
        level: i64,
    ) -> Self {
        Self {
            cycle_id: cycle_id.into(),
            respondent_id: respondent_id.into(),
            org_group: org_group.into(),
            factor_id: factor_id.into(),
            level: Some(level),
            proficiency_level: None,
            coverage_level: None,
            confidence: None,
            evidence_link: None,
            free_text: None,
            timestamp: None,
        }
    }

    /// Attach both rating dimensions.
    #[must_use]
    pub const fn with_dimensions(mut self, proficiency: i64, coverage: i64) -> Self {
        self.proficiency_level = Some(proficiency);
        self.coverage_level = Some(coverage);
        self
    }

    #[must_use]
    pub const fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }

    #[must_use]
    pub fn with_evidence(mut self, link: impl Into<String>) -> Self {
        self.evidence_link = Some(link.into());
        self
    }

    /// Whether a non-blank evidence reference was supplied.
    #[must_use]
    pub fn has_evidence(&self) -> bool {
        self.evidence_link
            .as_deref()
            .is_some_and(|link| !link.trim().is_empty())
    }

    /// `false` only when both dimensions are present and the combined level
    /// is not their minimum.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        match (self.level, self.proficiency_level, self.coverage_level) {
            (Some(level), Some(p), Some(c)) => level == p.min(c),
            _ => true,
        }
    }
}

/// Accepts integers, integer-valued floats (`3.0`) and numeric strings.
/// Anything else, `null` included, reads as no rating.
fn deserialize_rating<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Rating {
        Int(i64),
        Float(f64),
        Text(String),
        Other(serde::de::IgnoredAny),
    }

    fn integral(value: f64) -> Option<i64> {
        (value.is_finite() && value.fract() == 0.0).then_some(value as i64)
    }

    Ok(match Rating::deserialize(deserializer)? {
        Rating::Int(i) => Some(i),
        Rating::Float(f) => integral(f),
        Rating::Text(s) => s.trim().parse::<f64>().ok().and_then(integral),
        Rating::Other(serde::de::IgnoredAny) => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_columns_default_to_none() {
        let json = r#"{
            "cycle_id": "2024-Q1",
            "respondent_id": "R001",
            "org_group": "Finance",
            "factor_id": "INV_03",
            "level": 3,
            "timestamp": "2024-02-01T10:00:00Z"
        }"#;
        let response: Response = serde_json::from_str(json).expect("valid response");
        assert_eq!(response.level, Some(3));
        assert_eq!(response.proficiency_level, None);
        assert_eq!(response.confidence, None);
        assert!(!response.has_evidence());
        assert!(response.is_consistent());
    }

    #[test]
    fn test_ratings_read_leniently() {
        let json = r#"[
            {"cycle_id": "C1", "respondent_id": "R1", "org_group": "G", "factor_id": "F",
             "level": 3.0, "proficiency_level": "4", "coverage_level": 3,
             "timestamp": "2025-03-01T09:00:00Z"},
            {"cycle_id": "C1", "respondent_id": "R2", "org_group": "G", "factor_id": "F",
             "level": null, "proficiency_level": 2.5, "timestamp": "2025-03-01T09:00:00Z"},
            {"cycle_id": "C1", "respondent_id": "R3", "org_group": "G", "factor_id": "F",
             "level": "n/a", "timestamp": "2025-03-01T09:00:00Z"},
            {"cycle_id": "C1", "respondent_id": "R4", "org_group": "G", "factor_id": "F",
             "timestamp": "2025-03-01T09:00:00Z"}
        ]"#;
        let rows: Vec<Response> = serde_json::from_str(json).expect("lenient ratings");

        assert_eq!(rows[0].level, Some(3));
        assert_eq!(rows[0].proficiency_level, Some(4));
        assert_eq!(rows[0].coverage_level, Some(3));
        assert_eq!(rows[1].level, None);
        assert_eq!(rows[1].proficiency_level, None);
        assert_eq!(rows[2].level, None);
        assert_eq!(rows[3].level, None);
    }

    #[test]
    fn test_missing_timestamp_stays_visible() {
        let json = r#"{"cycle_id": "C1", "respondent_id": "R1", "org_group": "G",
                       "factor_id": "F", "level": 3}"#;
        let response: Response = serde_json::from_str(json).expect("timestamp is optional");
        assert_eq!(response.timestamp, None);

        let json = r#"{"cycle_id": "C1", "respondent_id": "R1", "org_group": "G",
                       "factor_id": "F", "level": 3, "timestamp": "2025-03-01T09:00:00Z"}"#;
        let response: Response = serde_json::from_str(json).expect("valid response");
        assert_eq!(
            response.timestamp.map(|t| t.to_rfc3339()).as_deref(),
            Some("2025-03-01T09:00:00+00:00")
        );
    }

    #[test]
    fn test_blank_evidence_is_absent() {
        let r = Response::new("C1", "R1", "G", "F", 2).with_evidence("   ");
        assert!(!r.has_evidence());
        let r = r.with_evidence("https://wiki/evidence/1");
        assert!(r.has_evidence());
    }

    #[test]
    fn test_consistency_is_min_of_dimensions() {
        let ok = Response::new("C1", "R1", "G", "F", 2).with_dimensions(4, 2);
        assert!(ok.is_consistent());
        let bad = Response::new("C1", "R1", "G", "F", 4).with_dimensions(4, 2);
        assert!(!bad.is_consistent());
    }
}
