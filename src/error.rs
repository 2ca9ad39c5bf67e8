//! Unified error types for rmm-tools.
//!
//! The scoring core itself never fails on data: malformed rows are dropped and
//! empty samples have defined floors. Errors only arise at the boundaries,
//! when loading input tables, building the reference catalogs, reading
//! configuration or writing reports.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for rmm-tools operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum RmmError {
    /// Errors while loading an input table
    #[error("Failed to load assessment data: {context}")]
    Load {
        context: String,
        #[source]
        source: LoadErrorKind,
    },

    /// Reference catalog contract violations
    #[error("Invalid catalog: {context}")]
    Catalog {
        context: String,
        #[source]
        source: CatalogErrorKind,
    },

    /// Errors during report generation
    #[error("Report generation failed: {context}")]
    Report {
        context: String,
        #[source]
        source: ReportErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Specific load error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum LoadErrorKind {
    #[error("Invalid JSON structure: {0}")]
    InvalidJson(String),

    #[error("Invalid YAML structure: {0}")]
    InvalidYaml(String),

    #[error("Missing input table '{table}' (looked for {candidates})")]
    MissingTable { table: String, candidates: String },

    #[error("Unsupported table format: {0}")]
    UnsupportedFormat(String),
}

/// Specific catalog error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CatalogErrorKind {
    #[error("Duplicate factor_id: {0}")]
    DuplicateFactor(String),

    #[error("Factor '{factor_id}' has invalid weight {weight} (must be positive and finite)")]
    InvalidWeight { factor_id: String, weight: f64 },

    #[error("Factor '{factor_id}' has target level {target} (must be 1-5)")]
    InvalidTargetLevel { factor_id: String, target: u8 },
}

/// Specific report error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ReportErrorKind {
    #[error("Serialization failed: {0}")]
    Serialization(String),

    #[error("Formatting failed: {0}")]
    Format(String),
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for rmm-tools operations
pub type Result<T> = std::result::Result<T, RmmError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl RmmError {
    /// Create a load error with context
    pub fn load(context: impl Into<String>, source: LoadErrorKind) -> Self {
        Self::Load {
            context: context.into(),
            source,
        }
    }

    /// Create a load error for a table that could not be found
    pub fn missing_table(table: impl Into<String>, candidates: &[PathBuf]) -> Self {
        let candidates = candidates
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        Self::load(
            "resolving input tables",
            LoadErrorKind::MissingTable {
                table: table.into(),
                candidates,
            },
        )
    }

    /// Create a catalog error with context
    pub fn catalog(context: impl Into<String>, source: CatalogErrorKind) -> Self {
        Self::Catalog {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a report error
    pub fn report(context: impl Into<String>, source: ReportErrorKind) -> Self {
        Self::Report {
            context: context.into(),
            source,
        }
    }
}

// ============================================================================
// Conversions from IO, parser and report errors
// ============================================================================

impl From<std::io::Error> for RmmError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for RmmError {
    fn from(err: serde_json::Error) -> Self {
        Self::load(
            "JSON deserialization",
            LoadErrorKind::InvalidJson(err.to_string()),
        )
    }
}

impl From<serde_yaml::Error> for RmmError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::load(
            "YAML deserialization",
            LoadErrorKind::InvalidYaml(err.to_string()),
        )
    }
}

impl From<crate::reports::ReportError> for RmmError {
    fn from(err: crate::reports::ReportError) -> Self {
        use crate::reports::ReportError;
        let kind = match err {
            ReportError::SerializationError(msg) => ReportErrorKind::Serialization(msg),
            ReportError::FormatError(e) => ReportErrorKind::Format(e.to_string()),
        };
        Self::report("", kind)
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// Context strings are chained outermost-first, so a failure deep inside the
/// loader reads like `loading dataset: reading responses.json: ...`.
///
/// # Example
///
/// ```ignore
/// use rmm_tools::error::ErrorContext;
///
/// fn load_factors(path: &Path) -> Result<Vec<Factor>> {
///     let content = std::fs::read_to_string(path)
///         .with_context(|| format!("reading {}", path.display()))?;
///     serde_json::from_str(&content).context("parsing factor table")
/// }
/// ```
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<RmmError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let context = context.into();
        self.map_err(|e| e.into().prepend_context(&context))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| e.into().prepend_context(&f().into()))
    }
}

impl RmmError {
    /// The free-text part of the error that context is chained onto.
    fn context_mut(&mut self) -> &mut String {
        match self {
            Self::Load { context, .. }
            | Self::Catalog { context, .. }
            | Self::Report { context, .. } => context,
            Self::Io { message, .. } => message,
            Self::Config(message) | Self::Validation(message) => message,
        }
    }

    /// Prefix `outer` to the existing context as `outer: inner`.
    fn prepend_context(mut self, outer: &str) -> Self {
        let inner = self.context_mut();
        *inner = if inner.is_empty() {
            outer.to_string()
        } else {
            format!("{outer}: {inner}")
        };
        self
    }
}

/// Extension trait for Option types to convert to errors with context.
pub trait OptionContext<T> {
    /// Convert None to an error with the given context.
    fn context_none(self, context: impl Into<String>) -> Result<T>;

    /// Convert None to an error with context from a closure.
    fn with_context_none<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T> OptionContext<T> for Option<T> {
    fn context_none(self, context: impl Into<String>) -> Result<T> {
        self.ok_or_else(|| RmmError::Validation(context.into()))
    }

    fn with_context_none<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.ok_or_else(|| RmmError::Validation(f().into()))
    }
}
