//! deck-diff: slide-level diff for presentation decks
//!
//! Aligns two decks by slide content, detects moved slides and lays the
//! result out as side-by-side pages.

#![allow(clippy::needless_pass_by_value)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use deck_diff::{
    cli,
    config::{
        AppConfig, CONFIG_FILE_NAMES, CompareConfig, ComparePaths, ConfigPreset, HashConfig, HistoryConfig,
        LayoutOverrides, Validatable,
    },
    pipeline::exit_codes,
    reports::ReportFormat,
    sources::RevisionSpec,
};
use std::io;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Build long version string with supported inputs
const fn build_long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        "\n\nInputs:",
        "\n  Presentations: pptx, ppt, odp, key, pdf (rendered with LibreOffice + pdftoppm)",
        "\n  Directories:   slide_NNN.png images or slide_NNN.sha256 sidecars",
        "\n  Manifests:     sha256sum-style <hash>  <file> lines",
        "\n\nOutput Formats:",
        "\n  summary, json, side-by-side, html"
    )
}

#[derive(Parser)]
#[command(name = "deck-diff")]
#[command(version, long_version = build_long_version())]
#[command(about = "Slide-level diff for presentation decks", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  No differences (or differences without --fail-on-change)
    1  Differences found with --fail-on-change
    3  Error occurred

EXAMPLES:
    # Side-by-side view of two versions
    deck-diff compare talk-v1.pptx talk-v2.pptx

    # HTML report including unchanged slides
    deck-diff compare v1.pptx v2.pptx -o html -O diff.html --show-common

    # Compare the working copy against the last commit
    deck-diff history talk.pptx

    # Render and hash once, compare the hashes later
    deck-diff hash talk.pptx --out-dir talk_slides")]
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
    #[arg(long, global = true, env = "DECK_DIFF_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

// ============================================================================
// Command argument structs
// ============================================================================

/// Report and layout options shared by `compare` and `history`
#[derive(clap::Args)]
struct ReportArgs {
    /// Output format (auto: side-by-side on a terminal, summary otherwise)
    #[arg(short, long, default_value = "auto")]
    output: ReportFormat,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Include slides that are unchanged and in place
    #[arg(long, conflicts_with = "hide_common")]
    show_common: bool,

    /// Leave out unchanged slides even if the config file shows them
    #[arg(long)]
    hide_common: bool,

    /// Group moved slides after the in-order pages instead of interleaving them
    #[arg(long, conflicts_with = "moved_pages")]
    no_moved_pages: bool,

    /// Interleave moved slides with arrows even if the config file groups them
    #[arg(long)]
    moved_pages: bool,

    /// Exit with code 1 if the decks differ
    #[arg(long)]
    fail_on_change: bool,

    /// Report title
    #[arg(long)]
    title: Option<String>,

    /// Configuration preset (default, review, ci-cd)
    #[arg(long)]
    preset: Option<String>,

    #[command(flatten)]
    conversion: ConversionArgs,
}

/// Rendering options
#[derive(clap::Args)]
struct ConversionArgs {
    /// Raster resolution for rendered slides
    #[arg(long)]
    dpi: Option<u32>,

    /// Timeout in seconds for each external tool
    #[arg(long)]
    timeout: Option<u64>,

    /// Render into this directory instead of a temporary one
    #[arg(long)]
    work_dir: Option<PathBuf>,

    /// Keep rendered slide images after the run
    #[arg(long)]
    keep_images: bool,
}

/// Arguments for the `compare` subcommand
#[derive(Parser)]
struct CompareArgs {
    /// Earlier deck: presentation, image/sidecar directory or manifest
    source: PathBuf,

    /// Later deck
    target: PathBuf,

    #[command(flatten)]
    report: ReportArgs,
}

/// Arguments for the `history` subcommand
#[derive(Parser)]
struct HistoryArgs {
    /// Presentation in a git work tree
    file: PathBuf,

    /// Revision to compare against
    #[arg(long, default_value = "HEAD", conflicts_with = "pr")]
    rev: String,

    /// Compare against the head of this pull request
    #[arg(long)]
    pr: Option<u64>,

    /// Remote to fetch the pull request from
    #[arg(long, default_value = "origin", requires = "pr")]
    remote: String,

    #[command(flatten)]
    report: ReportArgs,
}

/// Arguments for the `hash` subcommand
#[derive(Parser)]
struct HashArgs {
    /// Presentation, PDF or image directory
    input: PathBuf,

    /// Directory for images and sidecars (default: <input>_slides next to the input)
    #[arg(long)]
    out_dir: Option<PathBuf>,

    #[command(flatten)]
    conversion: ConversionArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two decks slide by slide
    Compare(CompareArgs),

    /// Compare a presentation with an earlier git revision of itself
    History(HistoryArgs),

    /// Render a presentation and write per-slide hash sidecars
    Hash(HashArgs),

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
    /// Generate an example .deck-diff.yaml in the current directory
    Init,
    /// Generate JSON Schema for the config file format
    Schema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging; stdout carries reports
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
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
        Ok(code) => {
            if code != exit_codes::SUCCESS {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(exit_codes::ERROR);
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    // Dispatch to command handlers
    match cli.command {
        Commands::Compare(args) => {
            let app = effective_config(cli.config.as_deref(), cli.quiet, cli.no_color, &args.report)?;
            cli::run_compare(CompareConfig {
                paths: ComparePaths {
                    source: args.source,
                    target: args.target,
                },
                app,
            })
        }

        Commands::History(args) => {
            let app = effective_config(cli.config.as_deref(), cli.quiet, cli.no_color, &args.report)?;
            let revision = match args.pr {
                Some(number) => RevisionSpec::PullRequest {
                    number,
                    remote: args.remote,
                },
                None => RevisionSpec::Commit(args.rev),
            };
            cli::run_history(HistoryConfig {
                file: args.file,
                revision,
                app,
            })
        }

        Commands::Hash(args) => {
            let overrides = conversion_overrides(AppConfig::builder(), &args.conversion).build();
            let (config, _) = AppConfig::from_file_with_overrides(cli.config.as_deref(), &overrides);
            check(&config)?;
            cli::run_hash(HashConfig {
                input: args.input,
                out_dir: args.out_dir,
                conversion: config.conversion,
            })
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "deck-diff", &mut io::stdout());
            Ok(exit_codes::SUCCESS)
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                let (config, loaded_from) = deck_diff::config::load_or_default(cli.config.as_deref());
                if let Some(path) = &loaded_from {
                    eprintln!("# Loaded from: {}", path.display());
                } else {
                    eprintln!("# No config file found; showing defaults");
                }
                let yaml = serde_yaml::to_string(&config).context("failed to serialize config")?;
                print!("{yaml}");
                Ok(exit_codes::SUCCESS)
            }
            ConfigAction::Path => {
                let search_paths: [Option<String>; 3] = [
                    std::env::current_dir().ok().map(|p| p.display().to_string()),
                    deck_diff::config::file::user_config_dir().map(|p| p.display().to_string()),
                    ::dirs::home_dir().map(|p| p.display().to_string()),
                ];
                eprintln!("Config file search paths (in order):");
                for path in search_paths.into_iter().flatten() {
                    eprintln!("  {path}");
                }
                eprintln!();
                eprintln!("Recognized file names:");
                for name in CONFIG_FILE_NAMES {
                    eprintln!("  {name}");
                }
                eprintln!();
                match deck_diff::config::discover_config_file(cli.config.as_deref()) {
                    Some(path) => eprintln!("Active config file: {}", path.display()),
                    None => eprintln!("No config file found."),
                }
                Ok(exit_codes::SUCCESS)
            }
            ConfigAction::Init => {
                let target = std::env::current_dir()
                    .context("cannot determine current directory")?
                    .join(CONFIG_FILE_NAMES[0]);
                if target.exists() {
                    anyhow::bail!(
                        "{} already exists. Remove it first to re-initialize.",
                        target.display()
                    );
                }
                let content = deck_diff::config::generate_example_config();
                std::fs::write(&target, content)
                    .with_context(|| format!("failed to write {}", target.display()))?;
                eprintln!("Created {}", target.display());
                Ok(exit_codes::SUCCESS)
            }
            ConfigAction::Schema { output } => {
                let schema = deck_diff::config::generate_json_schema()?;
                match output {
                    Some(path) => {
                        std::fs::write(&path, &schema)
                            .with_context(|| format!("failed to write {}", path.display()))?;
                        eprintln!("Schema written to {}", path.display());
                    }
                    None => {
                        println!("{schema}");
                    }
                }
                Ok(exit_codes::SUCCESS)
            }
        },
    }
}

/// Layer file, preset and CLI settings; later layers win.
fn effective_config(config_path: Option<&Path>, quiet: bool, no_color: bool, args: &ReportArgs) -> Result<AppConfig> {
    let builder = AppConfig::builder()
        .output_format(args.output)
        .output_file(args.output_file.clone())
        .no_color(no_color)
        .fail_on_change(args.fail_on_change)
        .quiet(quiet)
        .title(args.title.clone());
    let overrides = conversion_overrides(builder, &args.conversion).build();

    let (mut config, loaded_from) = deck_diff::config::load_or_default(config_path);
    if let Some(path) = &loaded_from {
        tracing::debug!("Loaded config from {}", path.display());
    }
    if let Some(name) = &args.preset {
        let preset = ConfigPreset::from_name(name).with_context(|| {
            let known: Vec<_> = ConfigPreset::all().iter().map(ConfigPreset::name).collect();
            format!("unknown preset '{name}' (expected one of: {})", known.join(", "))
        })?;
        config.merge(&AppConfig::from_preset(preset));
    }
    config.merge(&overrides);
    config.apply_layout_overrides(layout_overrides(args));
    check(&config)?;
    Ok(config)
}

fn layout_overrides(args: &ReportArgs) -> LayoutOverrides {
    let flag = |on: bool, off: bool| match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    };
    LayoutOverrides {
        suppress_common_slides: flag(args.hide_common, args.show_common),
        show_moved_pages: flag(args.moved_pages, args.no_moved_pages),
    }
}

fn conversion_overrides(
    mut builder: deck_diff::config::AppConfigBuilder,
    args: &ConversionArgs,
) -> deck_diff::config::AppConfigBuilder {
    if let Some(dpi) = args.dpi {
        builder = builder.dpi(dpi);
    }
    if let Some(timeout) = args.timeout {
        builder = builder.timeout_secs(timeout);
    }
    builder.work_dir(args.work_dir.clone()).keep_images(args.keep_images)
}

/// Reject invalid merged settings with every problem listed.
fn check(config: &AppConfig) -> Result<()> {
    let errors = config.validate();
    if errors.is_empty() {
        return Ok(());
    }
    let list: Vec<String> = errors.iter().map(ToString::to_string).collect();
    anyhow::bail!("invalid configuration:\n  {}", list.join("\n  "))
}
