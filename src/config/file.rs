//! Configuration file loading and discovery.
//!
//! Configuration is read from YAML. CLI flags are layered on top with
//! [`AppConfig::merge`].

use super::types::{AppConfig, ScoringConfig};
use crate::reports::ReportFormat;
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
pub const CONFIG_FILE_NAMES: &[&str] = &[
    ".rmm-tools.yaml",
    ".rmm-tools.yml",
    "rmm-tools.yaml",
    "rmm-tools.yml",
];

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. Git repository root (if in a repo)
/// 4. User config directory (~/.config/rmm-tools/)
/// 5. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
        tracing::warn!("Config file {} does not exist, searching defaults", path.display());
    }

    let cwd = std::env::current_dir().ok();
    if let Some(path) = cwd.as_deref().and_then(find_config_in_dir) {
        return Some(path);
    }

    if let Some(path) = find_git_root().as_deref().and_then(find_config_in_dir) {
        return Some(path);
    }

    if let Some(config_dir) = dirs::config_dir() {
        if let Some(path) = find_config_in_dir(&config_dir.join("rmm-tools")) {
            return Some(path);
        }
    }

    dirs::home_dir().as_deref().and_then(find_config_in_dir)
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// Find the git repository root by walking up from the current directory.
fn find_git_root() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    cwd.ancestors()
        .find(|dir| dir.join(".git").exists())
        .map(Path::to_path_buf)
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Load an `AppConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    // An empty file is a valid, all-defaults configuration.
    if content.trim().is_empty() {
        return Ok(AppConfig::default());
    }
    Ok(serde_yaml::from_str(&content)?)
}

/// Load config from discovered file, or return default.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (AppConfig, Option<PathBuf>) {
    discover_config_file(explicit_path).map_or_else(
        || (AppConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => {
                tracing::debug!("Loaded configuration from {}", path.display());
                (config, Some(path))
            }
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (AppConfig::default(), None)
            }
        },
    )
}

// ============================================================================
// Configuration Merging
// ============================================================================

impl AppConfig {
    /// Merge another config into this one, with `other` taking precedence.
    ///
    /// Only values that differ from the defaults override, so a CLI layer
    /// built from defaults leaves file settings alone.
    pub fn merge(&mut self, other: &Self) {
        if other.scoring != ScoringConfig::default() {
            self.scoring = other.scoring.clone();
        }

        if other.filter.area.is_some() {
            self.filter.area = other.filter.area;
        }
        if other.filter.min_responses.is_some() {
            self.filter.min_responses = other.filter.min_responses;
        }
        if other.filter.max_dispersion.is_some() {
            self.filter.max_dispersion = other.filter.max_dispersion;
        }
        if other.filter.evidence_only {
            self.filter.evidence_only = true;
        }

        if other.output.format != ReportFormat::Summary {
            self.output.format = other.output.format;
        }
        if other.output.file.is_some() {
            self.output.file.clone_from(&other.output.file);
        }
        if other.output.no_color {
            self.output.no_color = true;
        }
        if other.output.top_gaps != super::types::OutputConfig::default().top_gaps {
            self.output.top_gaps = other.output.top_gaps;
        }
    }

    /// Load from file and merge with CLI overrides.
    #[must_use]
    pub fn from_file_with_overrides(
        config_path: Option<&Path>,
        cli_overrides: &Self,
    ) -> (Self, Option<PathBuf>) {
        let (mut config, loaded_from) = load_or_default(config_path);
        config.merge(cli_overrides);
        (config, loaded_from)
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate an example config file from the defaults.
#[must_use]
pub fn generate_example_config() -> String {
    format!(
        "# rmm-tools configuration\n\
         # Place this file at .rmm-tools.yaml in your project root or ~/.config/rmm-tools/\n\n{}",
        serde_yaml::to_string(&AppConfig::default()).unwrap_or_default()
    )
}

/// Generate a commented example config with all options.
#[must_use]
pub fn generate_full_example_config() -> String {
    r"# rmm-tools configuration file
# =============================
#
# Place it at:
#   - .rmm-tools.yaml in your project root
#   - ~/.config/rmm-tools/rmm-tools.yaml for global config
#
# CLI arguments always override file settings.

# Scoring model
scoring:
  # Size of each quality penalty, in levels
  penalty_step: 0.5
  # Penalize factors with fewer responses than this
  min_responses: 3
  # Penalize factors whose IQR exceeds this
  max_dispersion: 1.5
  # Penalize evidence-required factors below this evidence rate
  min_evidence_rate: 0.5
  # Confidence reported when no response carries one
  default_confidence: 3.5
  # Gap quality factor: responses needed for full trust
  full_confidence_responses: 5.0
  # Gap quality factor: IQR at which agreement reaches zero
  dispersion_scale: 2.0
  # Gap quality factor: agreement term when IQR is undefined
  undefined_dispersion_factor: 0.5
  # Gap quality factor for factors nobody rated
  unsampled_quality_factor: 0.1
  # Proficiency/coverage value that counts as high
  quadrant_threshold: 3.0
  # Factors carried into the per-factor trend table
  trend_factor_limit: 10

# Factor filters applied before aggregation
filter:
  # area: Project Management
  # min_responses: 3
  # max_dispersion: 1.5
  evidence_only: false

# Output configuration
output:
  # Format: summary, json, csv
  format: summary
  # Output file path (omit for stdout)
  # file: assessment.json
  no_color: false
  # Backlog rows shown in summaries
  top_gaps: 10
"
    .to_string()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Area;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_in_dir() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join(".rmm-tools.yaml");
        std::fs::write(&config_path, "scoring:\n  min_responses: 5\n").unwrap();

        assert_eq!(find_config_in_dir(tmp.path()), Some(config_path));
    }

    #[test]
    fn test_find_config_in_dir_not_found() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(find_config_in_dir(tmp.path()), None);
    }

    #[test]
    fn test_load_config_file() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.yaml");

        let yaml = r"
scoring:
  min_responses: 5
  max_dispersion: 1.0
filter:
  area: Invoicing Process
output:
  format: json
";
        std::fs::write(&config_path, yaml).unwrap();

        let config = load_config_file(&config_path).unwrap();
        assert_eq!(config.scoring.min_responses, 5);
        assert!((config.scoring.max_dispersion - 1.0).abs() < f64::EPSILON);
        assert!((config.scoring.penalty_step - 0.5).abs() < f64::EPSILON);
        assert_eq!(config.filter.area, Some(Area::Invoicing));
        assert_eq!(config.output.format, ReportFormat::Json);
    }

    #[test]
    fn test_load_empty_config_file() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("rmm-tools.yml");
        std::fs::write(&config_path, "\n").unwrap();

        assert_eq!(load_config_file(&config_path).unwrap(), AppConfig::default());
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config_file(Path::new("/nonexistent/config.yaml"));
        assert!(matches!(result, Err(ConfigFileError::NotFound(_))));
    }

    #[test]
    fn test_load_config_file_invalid_yaml() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.yaml");
        std::fs::write(&config_path, "scoring: [unclosed").unwrap();

        assert!(matches!(
            load_config_file(&config_path),
            Err(ConfigFileError::Parse(_))
        ));
    }

    #[test]
    fn test_config_merge() {
        let mut base = AppConfig::builder()
            .area(Some(Area::ProjectManagement))
            .min_responses(2)
            .build();
        let overrides = AppConfig::builder()
            .min_responses(4)
            .output_format(ReportFormat::Csv)
            .evidence_only(true)
            .build();

        base.merge(&overrides);

        assert_eq!(base.filter.area, Some(Area::ProjectManagement));
        assert_eq!(base.filter.min_responses, Some(4));
        assert!(base.filter.evidence_only);
        assert_eq!(base.output.format, ReportFormat::Csv);
    }

    #[test]
    fn test_merge_defaults_keeps_file_values() {
        let mut base = AppConfig::default();
        base.scoring.min_responses = 7;
        base.output.top_gaps = Some(3);

        base.merge(&AppConfig::default());

        assert_eq!(base.scoring.min_responses, 7);
        assert_eq!(base.output.top_gaps, Some(3));
    }

    #[test]
    fn test_generated_configs_parse() {
        let example = generate_example_config();
        assert!(example.contains("scoring:"));
        let parsed: AppConfig = serde_yaml::from_str(&example).unwrap();
        assert_eq!(parsed, AppConfig::default());

        let full: AppConfig = serde_yaml::from_str(&generate_full_example_config()).unwrap();
        assert_eq!(full, AppConfig::default());
    }

    #[test]
    fn test_discover_explicit_path() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("custom-config.yaml");
        std::fs::write(&config_path, "output:\n  no_color: true\n").unwrap();

        assert_eq!(discover_config_file(Some(&config_path)), Some(config_path));
    }
}
