//! Configuration module for rmm-tools.
//!
//! This module provides a unified configuration system with:
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - YAML config file loading and discovery
//! - CLI argument merging
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use rmm_tools::config::AppConfig;
//!
//! // Use defaults
//! let config = AppConfig::default();
//!
//! // Use builder
//! let config = AppConfig::builder()
//!     .min_responses(3)
//!     .max_dispersion(1.5)
//!     .evidence_only(true)
//!     .build();
//!
//! // Load from file
//! use rmm_tools::config::file::load_or_default;
//! let (config, loaded_from) = load_or_default(None);
//! ```
//!
//! # Configuration File
//!
//! Place a `.rmm-tools.yaml` file in your project root or `~/.config/rmm-tools/`:
//!
//! ```yaml
//! scoring:
//!   min_responses: 5
//!   max_dispersion: 1.0
//! output:
//!   format: json
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::{
    DEFAULT_CONFIDENCE, DEFAULT_MAX_DISPERSION, DEFAULT_MIN_EVIDENCE_RATE,
    DEFAULT_MIN_RESPONSES, DEFAULT_PENALTY_STEP, DEFAULT_QUADRANT_THRESHOLD,
    EXPECTED_RESPONSES_PER_FACTOR,
};
pub use types::{AppConfig, AppConfigBuilder, FilterConfig, OutputConfig, ScoringConfig};
pub use validation::{ConfigError, Validatable};

pub use file::{
    discover_config_file, generate_example_config, generate_full_example_config, load_config_file,
    load_or_default, ConfigFileError, CONFIG_FILE_NAMES,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// The schema documents every option accepted in `.rmm-tools.yaml` and can
/// be used by editors for validation and completion.
pub fn generate_json_schema() -> serde_json::Result<String> {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema)
}
