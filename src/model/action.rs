//! Improvement action catalog.

use super::factor::FactorCatalog;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Placeholder replaced by the factor name when the catalog is built.
const FACTOR_PLACEHOLDER: &str = "{factor}";

/// Expected delivery horizon of an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    Short,
    Medium,
    Long,
}

impl Timeframe {
    pub const ALL: [Self; 3] = [Self::Short, Self::Medium, Self::Long];

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Medium => "medium",
            Self::Long => "long",
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Timeframe {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "short" => Ok(Self::Short),
            "medium" => Ok(Self::Medium),
            "long" => Ok(Self::Long),
            other => Err(format!(
                "unknown timeframe '{other}'. Valid options: short, medium, long"
            )),
        }
    }
}

/// Improvement guidance for one factor, applicable while the factor's
/// current level is at or below `if_level_leq`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub action_id: String,
    pub factor_id: String,
    pub if_level_leq: i64,
    pub action_text: String,
    pub impact: u8,
    pub effort: u8,
    pub timeframe: Timeframe,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependency_action_id: Option<String>,
}

impl Action {
    /// Level transition this action moves the factor through.
    #[must_use]
    pub fn transition(&self) -> String {
        format!("Level {} → {}", self.if_level_leq, self.if_level_leq + 1)
    }
}

/// Actions with `{factor}` substituted, ready for gap matching.
#[derive(Debug, Clone, Default)]
pub struct ActionCatalog {
    actions: Vec<Action>,
}

impl ActionCatalog {
    /// Build the catalog. Actions for factors missing from `factors` are kept
    /// but can never match a gap.
    #[must_use]
    pub fn new(actions: Vec<Action>, factors: &FactorCatalog) -> Self {
        let mut orphaned = 0usize;
        let actions = actions
            .into_iter()
            .map(|mut action| {
                match factors.get(&action.factor_id) {
                    Some(factor) => {
                        action.action_text = action
                            .action_text
                            .replace(FACTOR_PLACEHOLDER, &factor.factor_name);
                    }
                    None => orphaned += 1,
                }
                if action
                    .dependency_action_id
                    .as_deref()
                    .is_some_and(|dep| dep.trim().is_empty())
                {
                    action.dependency_action_id = None;
                }
                action
            })
            .collect::<Vec<_>>();

        if orphaned > 0 {
            tracing::warn!("{orphaned} action(s) reference factors missing from the catalog");
        }

        Self { actions }
    }

    /// Actions attached to one factor, in catalog order.
    pub fn for_factor<'a>(&'a self, factor_id: &'a str) -> impl Iterator<Item = &'a Action> + 'a {
        self.actions.iter().filter(move |a| a.factor_id == factor_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Action> {
        self.actions.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Area, Factor};

    fn action(id: &str, factor: &str, text: &str) -> Action {
        Action {
            action_id: id.to_string(),
            factor_id: factor.to_string(),
            if_level_leq: 2,
            action_text: text.to_string(),
            impact: 4,
            effort: 2,
            timeframe: Timeframe::Short,
            dependency_action_id: Some(String::new()),
        }
    }

    #[test]
    fn test_factor_substitution() {
        let factors = FactorCatalog::new(vec![Factor::new(
            "PM_05",
            Area::ProjectManagement,
            "Progress Reporting",
            4,
            "Program Office",
        )])
        .expect("valid catalog");

        let catalog = ActionCatalog::new(
            vec![
                action("A1", "PM_05", "Standardise {factor} templates"),
                action("A2", "PM_99", "Pilot {factor}"),
            ],
            &factors,
        );

        let texts: Vec<_> = catalog.iter().map(|a| a.action_text.as_str()).collect();
        assert_eq!(texts, ["Standardise Progress Reporting templates", "Pilot {factor}"]);
        assert_eq!(catalog.for_factor("PM_05").count(), 1);
        assert!(catalog.iter().all(|a| a.dependency_action_id.is_none()));
    }

    #[test]
    fn test_transition_label() {
        assert_eq!(action("A1", "F", "").transition(), "Level 2 → 3");
    }

    #[test]
    fn test_timeframe_parse() {
        assert_eq!("Medium".parse::<Timeframe>(), Ok(Timeframe::Medium));
        assert!("soon".parse::<Timeframe>().is_err());
        let tf: Timeframe = serde_json::from_str("\"long\"").expect("valid timeframe");
        assert_eq!(tf, Timeframe::Long);
    }
}
