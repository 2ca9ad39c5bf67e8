//! Pipeline orchestration for assessment runs.
//!
//! This module provides shared orchestration logic for load → score → report
//! workflows, reducing duplication across CLI command handlers.

mod assess_stage;
mod load;
mod output;
mod report_stage;
mod trend_stage;

pub use assess_stage::{
    run_assessment, run_backlog, AssessmentOptions, AssessmentReport, BacklogReport,
};
pub use load::{parse_table, read_table, Dataset, TableFormat};
pub use output::{should_use_color, write_output, OutputTarget};
pub use report_stage::{output_report, render_report, ReportKind};
pub use trend_stage::{run_trends, TrendReport};

/// Exit codes for CI/CD integration
pub mod exit_codes {
    /// Success
    pub const SUCCESS: i32 = 0;
    /// Overall index is below the requested minimum
    pub const BELOW_THRESHOLD: i32 = 1;
    /// An error occurred
    pub const ERROR: i32 = 3;
}
