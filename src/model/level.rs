//! The five-stage maturity scale and its dimension descriptors.

use serde::{Deserialize, Serialize};

/// Maturity stage on the 1-5 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MaturityLevel {
    /// Level 1
    Initial,
    /// Level 2
    Development,
    /// Level 3
    Defined,
    /// Level 4
    Managed,
    /// Level 5
    Optimising,
}

impl MaturityLevel {
    pub const ALL: [Self; 5] = [
        Self::Initial,
        Self::Development,
        Self::Defined,
        Self::Managed,
        Self::Optimising,
    ];

    /// Look up a stage by its integer level.
    #[must_use]
    pub const fn from_level(level: i64) -> Option<Self> {
        match level {
            1 => Some(Self::Initial),
            2 => Some(Self::Development),
            3 => Some(Self::Defined),
            4 => Some(Self::Managed),
            5 => Some(Self::Optimising),
            _ => None,
        }
    }

    /// Stage for a continuous index, rounded half-to-even and clamped to 1-5.
    #[must_use]
    pub fn from_index(index: f64) -> Self {
        match Self::from_level(i64::from(round_level(index))) {
            Some(level) => level,
            None => Self::Initial,
        }
    }

    #[must_use]
    pub const fn number(&self) -> u8 {
        match self {
            Self::Initial => 1,
            Self::Development => 2,
            Self::Defined => 3,
            Self::Managed => 4,
            Self::Optimising => 5,
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Initial => "Initial",
            Self::Development => "Development",
            Self::Defined => "Defined",
            Self::Managed => "Managed",
            Self::Optimising => "Optimising",
        }
    }

    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Initial => {
                "Inconsistent practices and limited adoption; processes are ad hoc and person-dependent"
            }
            Self::Development => {
                "Emerging structure with partial organisational use; basic processes exist but are inconsistent"
            }
            Self::Defined => {
                "Standardised practices used across multiple groups; documented processes broadly followed"
            }
            Self::Managed => {
                "Performance-driven processes widely adopted; quantitative objectives tracked and decisions data-driven"
            }
            Self::Optimising => {
                "Organisation-wide continuous improvement and learning; improvement mechanisms are embedded"
            }
        }
    }

    /// What this level means on the proficiency (how well) axis.
    #[must_use]
    pub const fn proficiency_description(&self) -> &'static str {
        match self {
            Self::Initial => "Practices are ad hoc and dependent on individuals",
            Self::Development => "Partial structure exists but remains inconsistent",
            Self::Defined => "Standardised and documented processes are established",
            Self::Managed => "Performance is measured and used for decision-making",
            Self::Optimising => "Continuous improvement mechanisms are embedded",
        }
    }

    /// What this level means on the coverage (how widely) axis.
    #[must_use]
    pub const fn coverage_description(&self) -> &'static str {
        match self {
            Self::Initial => "Isolated or individual use only",
            Self::Development => "Limited adoption among few groups",
            Self::Defined => "Implementation across several groups",
            Self::Managed => "Broad organisational adoption",
            Self::Optimising => "Organisation-wide, institutionalised use",
        }
    }
}

impl std::fmt::Display for MaturityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Level {} ({})", self.number(), self.name())
    }
}

/// Round an index to a whole level (ties to even) and clamp it to 1-5.
#[must_use]
pub fn round_level(index: f64) -> u8 {
    if index.is_nan() {
        return 1;
    }
    index.round_ties_even().clamp(1.0, 5.0) as u8
}
