//! sbom-prep: normalize scanner inventories for SPDX document generation
//!
//! Reads a JSON inventory snapshot, reconciles its license data and writes
//! the canonical snapshot consumed by document renderers.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use sbom_prep::{
    cli::{self, NormalizeConfig},
    config::{AppConfig, ConfigPreset, CONFIG_DIR_NAME},
    pipeline::exit_codes,
};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "sbom-prep")]
#[command(version)]
#[command(about = "Normalize scanner inventories for SPDX document generation", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Success
    3  Error occurred

EXAMPLES:
    # Normalize a snapshot to stdout
    sbom-prep normalize scan.json

    # Write compact output to a file
    sbom-prep normalize scan.json -O normalized.json --compact

    # Use the CI preset (compact output)
    sbom-prep --preset ci-cd normalize scan.json -O normalized.json

    # Show the license catalog
    sbom-prep licenses scan.json")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Configuration preset (default, ci-cd)
    #[arg(long, global = true, default_value = "default")]
    preset: String,

    #[command(subcommand)]
    command: Commands,
}

/// Arguments for the `normalize` subcommand
#[derive(Parser)]
struct NormalizeArgs {
    /// Path to the scanner snapshot (JSON)
    input: PathBuf,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Write compact JSON instead of pretty-printed
    #[arg(long)]
    compact: bool,
}

/// Arguments for the `licenses` subcommand
#[derive(Parser)]
struct LicensesArgs {
    /// Path to the scanner snapshot (JSON)
    input: PathBuf,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Print the listing as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize a scanner snapshot
    Normalize(NormalizeArgs),

    /// Print the normalized license catalog in presentation order
    Licenses(LicensesArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Generate JSON Schema for the config file format
    ConfigSchema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
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
    /// Print current effective configuration (merged from defaults + file + preset)
    Show,
    /// Print config file search paths and discovered config file
    Path,
    /// Generate an example .sbom-prep.yaml in the current directory
    Init,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    if let Err(err) = run(cli) {
        eprintln!("Error: {err:#}");
        std::process::exit(exit_codes::ERROR);
    }
}

fn run(cli: Cli) -> Result<()> {
    let preset = ConfigPreset::from_name_or_default(&cli.preset);
    match cli.command {
        Commands::Normalize(args) => {
            let overrides = AppConfig::builder()
                .pretty(!args.compact)
                .output_file(args.output_file)
                .build();
            let (app, loaded_from) =
                AppConfig::from_file_with_overrides(cli.config.as_deref(), preset, &overrides);
            if let Some(path) = &loaded_from {
                tracing::debug!("Using config from {}", path.display());
            }
            cli::run_normalize(&NormalizeConfig {
                input: args.input,
                app,
                quiet: cli.quiet,
            })?;
            Ok(())
        }

        Commands::Licenses(args) => {
            let overrides = AppConfig::builder().output_file(args.output_file).build();
            let (app, _) =
                AppConfig::from_file_with_overrides(cli.config.as_deref(), preset, &overrides);
            cli::run_licenses(&args.input, &app, args.json, cli.quiet)
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "sbom-prep", &mut io::stdout());
            Ok(())
        }

        Commands::ConfigSchema { output } => {
            let schema = sbom_prep::config::generate_json_schema()
                .context("failed to serialize schema")?;
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
            Ok(())
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                let (config, loaded_from) = AppConfig::from_file_with_overrides(
                    cli.config.as_deref(),
                    preset,
                    &AppConfig::default(),
                );
                if let Some(path) = &loaded_from {
                    eprintln!("# Loaded from: {}", path.display());
                } else {
                    eprintln!("# No config file found; showing defaults");
                }
                let yaml =
                    serde_yaml_ng::to_string(&config).context("failed to serialize config")?;
                print!("{yaml}");
                Ok(())
            }
            ConfigAction::Path => {
                let search_paths: [Option<String>; 3] = [
                    std::env::current_dir()
                        .ok()
                        .map(|p| p.display().to_string()),
                    dirs::config_dir().map(|p| p.join(CONFIG_DIR_NAME).display().to_string()),
                    dirs::home_dir().map(|p| p.display().to_string()),
                ];
                eprintln!("Config file search paths (in order):");
                for path in search_paths.into_iter().flatten() {
                    eprintln!("  {path}");
                }
                eprintln!();
                match sbom_prep::config::discover_config_file(cli.config.as_deref()) {
                    Some(path) => eprintln!("Discovered: {}", path.display()),
                    None => eprintln!("No config file found"),
                }
                Ok(())
            }
            ConfigAction::Init => {
                let target = std::env::current_dir()
                    .context("cannot determine current directory")?
                    .join(".sbom-prep.yaml");
                if target.exists() {
                    anyhow::bail!(
                        "{} already exists. Remove it first to re-initialize.",
                        target.display()
                    );
                }
                let content = sbom_prep::config::generate_example_config();
                std::fs::write(&target, content)
                    .with_context(|| format!("failed to write {}", target.display()))?;
                eprintln!("Created {}", target.display());
                Ok(())
            }
        },
    }
}
