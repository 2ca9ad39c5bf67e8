//! Dataset loading.
//!
//! The three input tables are read once, validated, and held immutably for
//! every later scoring pass.

use crate::error::{ErrorContext, LoadErrorKind, OptionContext, Result, RmmError};
use crate::model::{Action, ActionCatalog, Factor, FactorCatalog, Response};
use crate::scoring::{ValidationReport, Validator};
use indexmap::IndexSet;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Extensions probed for each table, in order.
const TABLE_EXTENSIONS: &[&str] = &["json", "yaml", "yml"];

/// Serialization format of an input table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Json,
    Yaml,
}

impl TableFormat {
    /// Detect the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("yaml" | "yml") => Ok(Self::Yaml),
            _ => Err(RmmError::load(
                format!("reading {}", path.display()),
                LoadErrorKind::UnsupportedFormat(ext.unwrap_or_default()),
            )),
        }
    }
}

/// Parse a table: a top-level sequence of records.
pub fn parse_table<T: DeserializeOwned>(content: &str, format: TableFormat) -> Result<Vec<T>> {
    match format {
        TableFormat::Json => Ok(serde_json::from_str(content)?),
        TableFormat::Yaml => Ok(serde_yaml::from_str(content)?),
    }
}

/// Read and parse one table file.
pub fn read_table<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let format = TableFormat::from_path(path)?;
    let content = std::fs::read_to_string(path).map_err(|e| RmmError::io(path, e))?;
    parse_table(&content, format).with_context(|| format!("parsing {}", path.display()))
}

/// Locate `<name>.{json,yaml,yml}` in `dir`.
fn find_table(dir: &Path, name: &str) -> Result<PathBuf> {
    let candidates: Vec<PathBuf> = TABLE_EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("{name}.{ext}")))
        .collect();
    candidates
        .iter()
        .find(|p| p.is_file())
        .cloned()
        .ok_or_else(|| RmmError::missing_table(name, &candidates))
}

/// Validated, immutable assessment data.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub factors: FactorCatalog,
    pub actions: ActionCatalog,
    /// Responses that passed validation
    pub responses: Vec<Response>,
    pub validation: ValidationReport,
}

impl Dataset {
    /// Load `factors`, `responses` and `actions` tables from a directory.
    pub fn load(dir: &Path) -> Result<Self> {
        tracing::info!("Loading assessment data from {}", dir.display());

        let factors: Vec<Factor> = read_table(&find_table(dir, "factors")?)?;
        let responses: Vec<Response> = read_table(&find_table(dir, "responses")?)?;
        let actions: Vec<Action> = read_table(&find_table(dir, "actions")?)?;

        tracing::info!(
            "Read {} factors, {} responses, {} actions",
            factors.len(),
            responses.len(),
            actions.len()
        );

        Self::from_parts(factors, responses, actions)
            .with_context(|| format!("loading dataset from {}", dir.display()))
    }

    /// Build catalogs and validate responses from in-memory tables.
    pub fn from_parts(
        factors: Vec<Factor>,
        responses: Vec<Response>,
        actions: Vec<Action>,
    ) -> Result<Self> {
        let factors = FactorCatalog::new(factors)?;
        let actions = ActionCatalog::new(actions, &factors);
        let (responses, validation) = Validator::new(&factors).validate(responses);
        Ok(Self {
            factors,
            actions,
            responses,
            validation,
        })
    }

    /// Distinct cycles in order of first appearance.
    #[must_use]
    pub fn cycles(&self) -> Vec<&str> {
        self.responses
            .iter()
            .map(|r| r.cycle_id.as_str())
            .collect::<IndexSet<_>>()
            .into_iter()
            .collect()
    }

    /// Lexicographically greatest cycle id.
    #[must_use]
    pub fn latest_cycle(&self) -> Option<&str> {
        self.responses.iter().map(|r| r.cycle_id.as_str()).max()
    }

    /// Distinct organizational groups, sorted.
    #[must_use]
    pub fn groups(&self) -> Vec<&str> {
        let mut groups: Vec<&str> = self
            .responses
            .iter()
            .map(|r| r.org_group.as_str())
            .collect::<IndexSet<_>>()
            .into_iter()
            .collect();
        groups.sort_unstable();
        groups
    }

    /// The requested cycle if present, else the latest one.
    pub fn resolve_cycle(&self, requested: Option<&str>) -> Result<String> {
        match requested {
            Some(cycle) if self.responses.iter().any(|r| r.cycle_id == cycle) => {
                Ok(cycle.to_string())
            }
            Some(cycle) => Err(RmmError::validation(format!(
                "unknown cycle '{cycle}' (available: {})",
                self.cycles().join(", ")
            ))),
            None => self
                .latest_cycle()
                .map(str::to_string)
                .context_none("no valid responses to score"),
        }
    }
}
