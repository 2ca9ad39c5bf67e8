//! Report destinations.

use crate::config::OutputConfig;
use anyhow::{Context, Result};
use std::io::IsTerminal;
use std::path::PathBuf;

/// Where a rendered report goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
}

impl OutputTarget {
    /// The configured output file, or stdout when none is set.
    #[must_use]
    pub fn from_config(output: &OutputConfig) -> Self {
        output.file.clone().map_or(Self::Stdout, Self::File)
    }

    /// Whether a summary written here should carry ANSI colors.
    ///
    /// Only an interactive stdout is colored, and never when `--no-color` or
    /// `NO_COLOR` is set.
    #[must_use]
    pub fn wants_color(&self, no_color: bool) -> bool {
        should_use_color(no_color)
            && matches!(self, Self::Stdout)
            && std::io::stdout().is_terminal()
    }
}

/// Color is allowed unless disabled by flag or the `NO_COLOR` convention.
pub fn should_use_color(no_color_flag: bool) -> bool {
    !no_color_flag && std::env::var_os("NO_COLOR").is_none()
}

/// Write a rendered report, creating the output directory if needed.
pub fn write_output(content: &str, target: &OutputTarget, quiet: bool) -> Result<()> {
    let path = match target {
        OutputTarget::Stdout => {
            println!("{content}");
            return Ok(());
        }
        OutputTarget::File(path) => path,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write report to {}", path.display()))?;

    if !quiet {
        tracing::info!("Wrote {} bytes to {}", content.len(), path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_target_from_config() {
        assert_eq!(
            OutputTarget::from_config(&OutputConfig::default()),
            OutputTarget::Stdout
        );

        let output = OutputConfig {
            file: Some(PathBuf::from("reports/backlog.csv")),
            ..OutputConfig::default()
        };
        assert_eq!(
            OutputTarget::from_config(&output),
            OutputTarget::File(PathBuf::from("reports/backlog.csv"))
        );
    }

    #[test]
    fn test_file_target_is_never_colored() {
        let target = OutputTarget::File(PathBuf::from("summary.txt"));
        assert!(!target.wants_color(false));
        assert!(!OutputTarget::Stdout.wants_color(true));
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("2025-Q1").join("backlog.csv");
        write_output("Rank,Factor ID", &OutputTarget::File(path.clone()), true).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "Rank,Factor ID");
    }

    #[test]
    fn test_no_color_flag_wins() {
        assert!(!should_use_color(true));
        assert_eq!(
            should_use_color(false),
            std::env::var_os("NO_COLOR").is_none()
        );
    }
}
