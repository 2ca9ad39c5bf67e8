//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.
//! Each handler implements the business logic for a specific CLI subcommand.

mod assess;
mod gaps;
mod participation;
mod trends;

pub use assess::{run_assess, AssessConfig};
pub use gaps::{run_gaps, GapsConfig};
pub use participation::run_participation;
pub use trends::run_trends;

// Re-export config types used by handlers
pub use crate::config::{AppConfig, OutputConfig};
