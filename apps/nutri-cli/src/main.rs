//! # nutri
//!
//! Command-line front end for the nutrition aggregation engine.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                               nutri                                     │
//! │                                                                         │
//! │  args ──► CliConfig::load_or_default ──► init_tracing (stderr)          │
//! │                                               │                         │
//! │                     ┌─────────────────────────┴──────────┐              │
//! │                     ▼                                    ▼              │
//! │             nutri aggregate FILE                  nutri check FILE      │
//! │             RecipeDocument ──► cache/engine       RecipeDocument::check │
//! │                     │                                    │              │
//! │                     ▼                                    ▼              │
//! │              JSON reports (stdout)                JSON report (stdout)  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Logs go to stderr so stdout stays machine-readable. The exit code is
//! non-zero on any error, including a `check` that finds problems.

mod commands;
mod config;
mod document;
mod error;

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use nutri_core::{CompositeCache, ProductId};

use crate::config::{CliConfig, OutputFormat};
use crate::document::RecipeDocument;
use crate::error::{CliError, CliResult};

#[derive(Parser, Debug)]
#[command(name = "nutri")]
#[command(version)]
#[command(about = "Derive composite nutrition and allergens from recipes", long_about = None)]
struct Cli {
    /// Config file (default: platform config dir, nutri/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Aggregate the products of a recipe document
    Aggregate {
        /// Recipe document (JSON)
        file: PathBuf,

        /// Only aggregate this product
        #[arg(long, value_name = "ID")]
        product: Option<ProductId>,

        /// Also report values per 100 g of finished product
        #[arg(long = "per-100g")]
        per_100g: bool,
    },

    /// Validate a recipe document without aggregating
    Check {
        /// Recipe document (JSON)
        file: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let (config, load_error) = CliConfig::load_or_default(cli.config.clone());
    init_tracing(&config.log.filter);
    if let Some(e) = load_error {
        warn!("Failed to load config: {}. Using defaults.", e);
    }

    match run(cli.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Command failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command, config: &CliConfig) -> CliResult<()> {
    match command {
        Command::Aggregate {
            file,
            product,
            per_100g,
        } => {
            let document = RecipeDocument::load(&file)?;
            let cache = CompositeCache::new();
            let reports = commands::aggregate(
                &document,
                product,
                per_100g || config.output.per_100g,
                &cache,
            )?;
            print_json(&reports, config.output.format)
        }
        Command::Check { file } => {
            let document = RecipeDocument::load(&file)?;
            let report = commands::check(&document);
            print_json(&report, config.output.format)?;

            if report.is_clean() {
                info!(?file, "Document is consistent");
                Ok(())
            } else {
                Err(CliError::CheckFailed {
                    issues: report.issues.len(),
                })
            }
        }
    }
}

fn print_json<T: Serialize>(value: &T, format: OutputFormat) -> CliResult<()> {
    let json = match format {
        OutputFormat::Pretty => serde_json::to_string_pretty(value)?,
        OutputFormat::Compact => serde_json::to_string(value)?,
    };
    println!("{json}");
    Ok(())
}

/// Initializes the tracing subscriber.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=nutri_core=trace` - Trace the engine only
/// - Default: the configured filter (`info,nutri=debug`)
fn init_tracing(configured: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(configured))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
