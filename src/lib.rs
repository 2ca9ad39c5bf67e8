//! **Quality-adjusted maturity scoring for results-management assessments.**
//!
//! `rmm-tools` turns survey responses about an organisation's results-management
//! practices into maturity indices on a 1-5 scale and a prioritized improvement
//! backlog. Every index is discounted for thin participation, rater disagreement
//! and missing evidence, so weakly supported ratings never look as good as
//! well-supported ones.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: typed input records: the factor catalog, survey responses,
//!   improvement actions and the five-stage [`MaturityLevel`] scale.
//! - **[`scoring`]**: the pure scoring engine, from response validation through
//!   factor, area and overall indices to gap analysis and multi-cycle trends.
//! - **[`pipeline`]**: loads a data directory once into a [`Dataset`] and
//!   orchestrates the scoring components into assessment, backlog and trend
//!   reports.
//! - **[`reports`]**: summary, JSON and CSV renderers.
//! - **[`config`]**: YAML configuration with discovery, merging, validation and
//!   JSON Schema generation.
//!
//! ## Getting Started
//!
//! ```no_run
//! use std::path::Path;
//! use rmm_tools::config::ScoringConfig;
//! use rmm_tools::pipeline::{run_assessment, AssessmentOptions, Dataset};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let dataset = Dataset::load(Path::new("data/"))?;
//!     let report = run_assessment(
//!         &dataset,
//!         &ScoringConfig::default(),
//!         &AssessmentOptions::default(),
//!     )?;
//!
//!     println!(
//!         "{}: {:.2} ({}), {}",
//!         report.cycle_id,
//!         report.overall.overall_index,
//!         report.overall.maturity(),
//!         report.quadrant
//!     );
//!     for gap in report.gaps.iter().take(3) {
//!         println!("  {:.2} {}", gap.priority_score, gap.action_text);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Command-Line Interface (CLI)
//!
//! The `rmm-tools` binary exposes the same pipeline through the `assess`,
//! `gaps`, `participation` and `trends` subcommands.

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
// Pedantic lints: allow categories that are design choices for this codebase
#![allow(
    // Counts are converted to f64 for every mean and rate
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::too_many_lines,
    clippy::struct_excessive_bools,
    clippy::unused_self,
    // Variable names like `min`/`mid` are clear in context
    clippy::similar_names
)]

pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod reports;
pub mod scoring;

// Re-export main types for convenience
pub use config::{AppConfig, AppConfigBuilder, FilterConfig, OutputConfig, ScoringConfig};
pub use config::{ConfigError, Validatable};
pub use error::{ErrorContext, OptionContext, Result, RmmError};
pub use model::{Action, ActionCatalog, Area, Factor, FactorCatalog, MaturityLevel, Response};
pub use pipeline::{AssessmentOptions, AssessmentReport, Dataset, TrendReport};
pub use reports::{ReportFormat, ReportGenerator};
pub use scoring::{FactorScorer, Gap, GapAnalyzer, TrendComputer};
