//! rmm-tools: quality-adjusted maturity scoring and backlog prioritization
//!
//! Scores survey-based maturity assessments and ranks improvement actions.

#![allow(clippy::needless_pass_by_value)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use rmm_tools::{
    cli,
    config::{self, AppConfig, Validatable},
    model::{Area, Timeframe},
    pipeline::exit_codes,
    reports::ReportFormat,
    scoring::GapFilter,
};
use std::io;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Build long version string with model info
const fn build_long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        "\n\nInput Tables:",
        "\n  factors, responses, actions (JSON or YAML)",
        "\n\nOutput Formats:",
        "\n  summary, json, csv",
        "\n\nAreas:",
        "\n  Project Management, Evaluation & Impact, Invoicing"
    )
}

#[derive(Parser)]
#[command(name = "rmm-tools")]
#[command(version, long_version = build_long_version())]
#[command(about = "Quality-adjusted maturity scoring and backlog prioritization", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Success
    1  Overall index below --min-index
    3  Error occurred

EXAMPLES:
    # Score the latest cycle
    rmm-tools assess data/

    # CI gate on the organisation-wide index
    rmm-tools assess data/ --min-index 3.0 -o summary

    # Short-term actions for the finance team as CSV
    rmm-tools gaps data/ --owner Finance --timeframe short -o csv > backlog.csv

    # Compare every cycle against the baseline
    rmm-tools trends data/ -o json")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output (also respects `NO_COLOR` env)
    #[arg(long, global = true)]
    no_color: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

// ============================================================================
// Command argument structs (extracted for readability)
// ============================================================================

/// Cycle and group selection shared by the scoring commands
#[derive(Parser)]
struct SelectionArgs {
    /// Directory holding factors, responses and actions tables
    data_dir: PathBuf,

    /// Assessment cycle (defaults to the latest)
    #[arg(long)]
    cycle: Option<String>,

    /// Organizational group ("All" for every group)
    #[arg(long)]
    group: Option<String>,
}

/// Output flags shared by every report command
#[derive(Parser)]
struct OutputArgs {
    /// Output format
    #[arg(short, long)]
    output: Option<ReportFormat>,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,
}

/// Arguments for the `assess` subcommand
#[derive(Parser)]
struct AssessArgs {
    #[command(flatten)]
    selection: SelectionArgs,

    /// Only score factors in this area
    #[arg(long)]
    area: Option<Area>,

    /// Drop factors with fewer responses
    #[arg(long)]
    min_responses: Option<usize>,

    /// Drop factors with a larger (or undefined) interquartile range
    #[arg(long)]
    max_dispersion: Option<f64>,

    /// Only keep factors with some supporting evidence
    #[arg(long)]
    evidence_only: bool,

    /// Backlog entries to show
    #[arg(long)]
    top: Option<usize>,

    /// Exit with code 1 when the overall index is below this value
    #[arg(long)]
    min_index: Option<f64>,

    #[command(flatten)]
    output: OutputArgs,
}

/// Arguments for the `gaps` subcommand
#[derive(Parser)]
struct GapsArgs {
    #[command(flatten)]
    selection: SelectionArgs,

    /// Restrict to these areas (repeatable)
    #[arg(long)]
    area: Vec<Area>,

    /// Restrict to these timeframes (repeatable)
    #[arg(long)]
    timeframe: Vec<Timeframe>,

    /// Restrict to these owner groups (repeatable)
    #[arg(long)]
    owner: Vec<String>,

    /// Maximum number of actions
    #[arg(long)]
    top: Option<usize>,

    #[command(flatten)]
    output: OutputArgs,
}

/// Arguments for the `participation` subcommand
#[derive(Parser)]
struct ParticipationArgs {
    /// Directory holding factors, responses and actions tables
    data_dir: PathBuf,

    /// Assessment cycle (defaults to the latest)
    #[arg(long)]
    cycle: Option<String>,

    #[command(flatten)]
    output: OutputArgs,
}

/// Arguments for the `trends` subcommand
#[derive(Parser)]
struct TrendsArgs {
    /// Directory holding factors, responses and actions tables
    data_dir: PathBuf,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Score one cycle: factors, areas, overall index and backlog
    Assess(AssessArgs),

    /// Ranked improvement backlog for one cycle
    Gaps(GapsArgs),

    /// Respondent counts per organizational group
    Participation(ParticipationArgs),

    /// Index movement across all cycles
    Trends(TrendsArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Show, discover, or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (merged from defaults + file)
    Show,
    /// Print config file search paths and discovered config file
    Path,
    /// Generate an example .rmm-tools.yaml in the current directory
    Init,
    /// Print a minimal example configuration
    Example,
    /// Print the JSON Schema for the config file format
    Schema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(exit_codes::ERROR);
        }
    }
}

/// Layer CLI flags over the discovered config file and validate the result.
fn effective_config(cli_config: Option<&Path>, overrides: &AppConfig) -> Result<AppConfig> {
    let (config, loaded_from) = AppConfig::from_file_with_overrides(cli_config, overrides);
    if let Some(path) = &loaded_from {
        tracing::debug!("Using configuration from {}", path.display());
    }

    config.ensure_valid()?;
    Ok(config)
}

fn run(cli: Cli) -> Result<i32> {
    // Dispatch to command handlers
    match cli.command {
        Commands::Assess(args) => {
            let mut overrides = AppConfig::builder()
                .area(args.area)
                .evidence_only(args.evidence_only)
                .output_file(args.output.output_file)
                .no_color(cli.no_color);
            if let Some(min) = args.min_responses {
                overrides = overrides.min_responses(min);
            }
            if let Some(max) = args.max_dispersion {
                overrides = overrides.max_dispersion(max);
            }
            if let Some(format) = args.output.output {
                overrides = overrides.output_format(format);
            }
            if args.top.is_some() {
                overrides = overrides.top_gaps(args.top);
            }
            let app = effective_config(cli.config.as_deref(), &overrides.build())?;

            cli::run_assess(cli::AssessConfig {
                data_dir: args.selection.data_dir,
                app,
                cycle: args.selection.cycle,
                group: args.selection.group,
                min_index: args.min_index,
                quiet: cli.quiet,
            })
        }

        Commands::Gaps(args) => {
            let mut overrides = AppConfig::builder()
                .output_file(args.output.output_file)
                .no_color(cli.no_color);
            if let Some(format) = args.output.output {
                overrides = overrides.output_format(format);
            }
            let app = effective_config(cli.config.as_deref(), &overrides.build())?;

            cli::run_gaps(cli::GapsConfig {
                data_dir: args.selection.data_dir,
                app,
                cycle: args.selection.cycle,
                group: args.selection.group,
                gap_filter: GapFilter {
                    areas: args.area,
                    timeframes: args.timeframe,
                    owners: args.owner,
                    limit: args.top,
                },
                quiet: cli.quiet,
            })?;
            Ok(exit_codes::SUCCESS)
        }

        Commands::Participation(args) => {
            let mut overrides = AppConfig::builder()
                .output_file(args.output.output_file)
                .no_color(cli.no_color);
            if let Some(format) = args.output.output {
                overrides = overrides.output_format(format);
            }
            let app = effective_config(cli.config.as_deref(), &overrides.build())?;

            cli::run_participation(
                &args.data_dir,
                args.cycle.as_deref(),
                &app.output,
                cli.quiet,
            )?;
            Ok(exit_codes::SUCCESS)
        }

        Commands::Trends(args) => {
            let mut overrides = AppConfig::builder()
                .output_file(args.output.output_file)
                .no_color(cli.no_color);
            if let Some(format) = args.output.output {
                overrides = overrides.output_format(format);
            }
            let app = effective_config(cli.config.as_deref(), &overrides.build())?;

            cli::run_trends(&args.data_dir, &app, cli.quiet)?;
            Ok(exit_codes::SUCCESS)
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "rmm-tools", &mut io::stdout());
            Ok(exit_codes::SUCCESS)
        }

        Commands::Config { action } => {
            run_config(action, cli.config.as_deref())?;
            Ok(exit_codes::SUCCESS)
        }
    }
}

fn run_config(action: ConfigAction, explicit: Option<&Path>) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let (config, loaded_from) = config::load_or_default(explicit);
            if let Some(path) = &loaded_from {
                eprintln!("# Loaded from: {}", path.display());
            } else {
                eprintln!("# No config file found; showing defaults");
            }
            let yaml = serde_yaml::to_string(&config).context("failed to serialize config")?;
            print!("{yaml}");
        }
        ConfigAction::Path => {
            let search_paths: [Option<String>; 3] = [
                std::env::current_dir()
                    .ok()
                    .map(|p| p.display().to_string()),
                dirs::config_dir().map(|p| p.join("rmm-tools").display().to_string()),
                dirs::home_dir().map(|p| p.display().to_string()),
            ];
            eprintln!("Config file search paths (in order):");
            for path in search_paths.into_iter().flatten() {
                eprintln!("  {path}");
            }
            eprintln!();
            eprintln!("Recognized file names:");
            for name in config::CONFIG_FILE_NAMES {
                eprintln!("  {name}");
            }
            eprintln!();
            match config::discover_config_file(explicit) {
                Some(path) => eprintln!("Active config file: {}", path.display()),
                None => eprintln!("No config file found."),
            }
        }
        ConfigAction::Init => {
            let target = std::env::current_dir()
                .context("cannot determine current directory")?
                .join(".rmm-tools.yaml");
            if target.exists() {
                anyhow::bail!(
                    "{} already exists. Remove it first to re-initialize.",
                    target.display()
                );
            }
            let content = config::generate_full_example_config();
            std::fs::write(&target, content)
                .with_context(|| format!("failed to write {}", target.display()))?;
            eprintln!("Created {}", target.display());
        }
        ConfigAction::Example => {
            print!("{}", config::generate_example_config());
        }
        ConfigAction::Schema { output } => {
            let schema =
                config::generate_json_schema().context("failed to generate config schema")?;
            match output {
                Some(path) => {
                    std::fs::write(&path, &schema)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => println!("{schema}"),
            }
        }
    }
    Ok(())
}
