//! Factor catalog: the assessed practices and the domains they belong to.

use crate::error::{CatalogErrorKind, Result, RmmError};
use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the three assessed domains.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
pub enum Area {
    #[serde(rename = "Project Management")]
    ProjectManagement,
    #[serde(rename = "Evaluation & Impact Measurement")]
    EvaluationImpact,
    #[serde(rename = "Invoicing Process")]
    Invoicing,
}

impl Area {
    /// All domains, in questionnaire order.
    pub const ALL: [Self; 3] = [Self::ProjectManagement, Self::EvaluationImpact, Self::Invoicing];

    /// Canonical domain label
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ProjectManagement => "Project Management",
            Self::EvaluationImpact => "Evaluation & Impact Measurement",
            Self::Invoicing => "Invoicing Process",
        }
    }

    /// Short code used in factor ids and on the command line
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::ProjectManagement => "PM",
            Self::EvaluationImpact => "EIM",
            Self::Invoicing => "INV",
        }
    }

    /// Parse a domain from its label or short code (case-insensitive).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let needle = name.trim();
        Self::ALL.into_iter().find(|area| {
            area.name().eq_ignore_ascii_case(needle) || area.code().eq_ignore_ascii_case(needle)
        })
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Area {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| {
            format!(
                "unknown area '{s}'. Valid options: {}",
                Self::ALL.map(|a| a.code()).join(", ")
            )
        })
    }
}

/// Catalog entry for a single assessed practice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Factor {
    pub factor_id: String,
    pub area: Area,
    pub factor_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default = "default_weight")]
    pub weight: f64,
    pub target_level: u8,
    pub owner_group: String,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub evidence_required: bool,
}

const fn default_weight() -> f64 {
    1.0
}

impl Factor {
    /// Create a factor with unit weight and no evidence requirement.
    pub fn new(
        factor_id: impl Into<String>,
        area: Area,
        factor_name: impl Into<String>,
        target_level: u8,
        owner_group: impl Into<String>,
    ) -> Self {
        Self {
            factor_id: factor_id.into(),
            area,
            factor_name: factor_name.into(),
            description: None,
            weight: default_weight(),
            target_level,
            owner_group: owner_group.into(),
            evidence_required: false,
        }
    }

    #[must_use]
    pub const fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    #[must_use]
    pub const fn with_evidence_required(mut self, required: bool) -> Self {
        self.evidence_required = required;
        self
    }
}

/// Accepts `true`/`false`, `0`/`1` and their string spellings.
fn deserialize_flag<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
        Text(String),
    }

    match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => Ok(b),
        Flag::Int(i) => Ok(i != 0),
        Flag::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Ok(true),
            "false" | "no" | "0" | "" => Ok(false),
            other => Err(de::Error::custom(format!("invalid boolean flag '{other}'"))),
        },
    }
}

/// Immutable, ordered factor catalog keyed by `factor_id`.
///
/// Catalog order is the order factors were supplied in and is the order every
/// per-factor output is produced in.
#[derive(Debug, Clone, Default)]
pub struct FactorCatalog {
    factors: IndexMap<String, Factor>,
}

impl FactorCatalog {
    /// Build a catalog, rejecting duplicate ids, non-positive weights and
    /// target levels outside 1-5.
    pub fn new(factors: Vec<Factor>) -> Result<Self> {
        let mut map = IndexMap::with_capacity(factors.len());
        for factor in factors {
            if !(factor.weight.is_finite() && factor.weight > 0.0) {
                return Err(RmmError::catalog(
                    "building factor catalog",
                    CatalogErrorKind::InvalidWeight {
                        factor_id: factor.factor_id,
                        weight: factor.weight,
                    },
                ));
            }
            if !(1..=5).contains(&factor.target_level) {
                return Err(RmmError::catalog(
                    "building factor catalog",
                    CatalogErrorKind::InvalidTargetLevel {
                        factor_id: factor.factor_id,
                        target: factor.target_level,
                    },
                ));
            }
            if map.contains_key(&factor.factor_id) {
                return Err(RmmError::catalog(
                    "building factor catalog",
                    CatalogErrorKind::DuplicateFactor(factor.factor_id),
                ));
            }
            map.insert(factor.factor_id.clone(), factor);
        }
        Ok(Self { factors: map })
    }

    #[must_use]
    pub fn get(&self, factor_id: &str) -> Option<&Factor> {
        self.factors.get(factor_id)
    }

    #[must_use]
    pub fn contains(&self, factor_id: &str) -> bool {
        self.factors.contains_key(factor_id)
    }

    /// Factors in catalog order
    pub fn iter(&self) -> impl Iterator<Item = &Factor> {
        self.factors.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.factors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pm(id: &str) -> Factor {
        Factor::new(id, Area::ProjectManagement, "Scope", 3, "Program Office")
    }

    #[test]
    fn test_area_labels_roundtrip() {
        for area in Area::ALL {
            assert_eq!(Area::from_name(area.name()), Some(area));
            assert_eq!(Area::from_name(area.code()), Some(area));
        }
        assert_eq!("inv".parse::<Area>(), Ok(Area::Invoicing));
        assert!("Finance".parse::<Area>().is_err());
    }

    #[test]
    fn test_factor_deserializes_integer_flag() {
        let json = r#"{
            "factor_id": "EIM_04",
            "area": "Evaluation & Impact Measurement",
            "factor_name": "Implementation Tracking",
            "weight": 1.2,
            "target_level": 4,
            "owner_group": "Technical Leads",
            "evidence_required": 1
        }"#;
        let factor: Factor = serde_json::from_str(json).expect("valid factor");
        assert!(factor.evidence_required);
        assert_eq!(factor.area, Area::EvaluationImpact);
        assert!((factor.weight - 1.2).abs() < f64::EPSILON);
    }

    #[test]
    fn test_factor_rejects_unknown_area() {
        let json = r#"{"factor_id": "X", "area": "Finance", "factor_name": "X",
                       "target_level": 3, "owner_group": "Admin"}"#;
        assert!(serde_json::from_str::<Factor>(json).is_err());
    }

    #[test]
    fn test_catalog_preserves_order() {
        let catalog = FactorCatalog::new(vec![pm("PM_02"), pm("PM_01"), pm("PM_03")])
            .expect("valid catalog");
        let ids: Vec<_> = catalog.iter().map(|f| f.factor_id.as_str()).collect();
        assert_eq!(ids, ["PM_02", "PM_01", "PM_03"]);
        assert!(catalog.contains("PM_01"));
        assert!(!catalog.contains("PM_04"));
    }

    #[test]
    fn test_catalog_rejects_duplicates() {
        let err = FactorCatalog::new(vec![pm("PM_01"), pm("PM_01")]).unwrap_err();
        assert!(matches!(
            err,
            RmmError::Catalog {
                source: CatalogErrorKind::DuplicateFactor(ref id),
                ..
            } if id == "PM_01"
        ));
    }

    #[test]
    fn test_catalog_rejects_bad_weight_and_target() {
        assert!(FactorCatalog::new(vec![pm("PM_01").with_weight(0.0)]).is_err());
        assert!(FactorCatalog::new(vec![pm("PM_01").with_weight(f64::NAN)]).is_err());

        let mut bad_target = pm("PM_01");
        bad_target.target_level = 6;
        assert!(FactorCatalog::new(vec![bad_target]).is_err());
    }
}
