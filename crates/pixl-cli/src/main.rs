//! pixl - headless front end for the pixl editing engine
//!
//! Loads a PNG, drives the edit controller the way an interactive host
//! would, and exports the displayed image.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::edit::EditStep;
use pixl_ops::Filter;

#[derive(Parser)]
#[command(name = "pixl")]
#[command(author, version, about = "Headless image editor: tone presets, filters, undo/redo")]
#[command(long_about = "
Applies the pixl editing presets to PNG images without a UI.

Examples:
  pixl info photo.png
  pixl apply photo.png -o out.png --op vintage
  pixl apply photo.png -o out.png -b 20 -c 35
  pixl edit photo.png -o out.png --step vivid --step rotate --step brightness=-30
  pixl edit photo.png -o out.png --step noir --step undo --step sharpen
  pixl edit photo.png -o out.png --step resize=4 --filter nearest
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Worker pool threads (0 = auto); overrides the config file
    #[arg(short = 'j', long, global = true)]
    threads: Option<usize>,

    /// Editor config file (RON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    log: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Display image information
    #[command(visible_alias = "i")]
    Info(InfoArgs),

    /// Apply one operation and export
    #[command(visible_alias = "a")]
    Apply(ApplyArgs),

    /// Replay an edit session step by step and export
    #[command(visible_alias = "e")]
    Edit(EditArgs),
}

#[derive(Args)]
struct InfoArgs {
    /// Input image(s)
    #[arg(required = true)]
    input: Vec<PathBuf>,
}

#[derive(Args)]
struct ApplyArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// Operation: adjust, vintage, vivid, noir, blur, sharpen
    #[arg(long, default_value = "adjust")]
    op: String,

    /// Brightness offset
    #[arg(short, long, default_value = "0", allow_negative_numbers = true)]
    brightness: f64,

    /// Contrast amount (-255..255)
    #[arg(short, long, default_value = "0", allow_negative_numbers = true)]
    contrast: f64,
}

#[derive(Args)]
struct EditArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// Edit step: an operation name, brightness=N, contrast=N, rotate,
    /// resize=F, undo, redo or reset (repeatable, applied in order)
    #[arg(short, long = "step", required = true, allow_hyphen_values = true)]
    steps: Vec<EditStep>,

    /// Resampling filter for resize steps: nearest, bilinear
    #[arg(short, long, default_value = "bilinear")]
    filter: Filter,
}

/// Installs the global subscriber. The returned guard flushes the log file on drop.
fn init_logging(verbose: u8, log: Option<&PathBuf>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    match log {
        Some(path) => {
            let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(".".as_ref());
            let name = path
                .file_name()
                .with_context(|| format!("Invalid log path: {}", path.display()))?;
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(dir, name));
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
            Ok(None)
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _guard = init_logging(cli.verbose, cli.log.as_ref())?;

    let verbose = cli.verbose > 0;
    match cli.command {
        Commands::Info(args) => commands::info::run(args, verbose),
        Commands::Apply(args) => {
            let config = commands::load_config(cli.config.as_deref(), cli.threads)?;
            commands::apply::run(args, config, verbose)
        }
        Commands::Edit(args) => {
            let config = commands::load_config(cli.config.as_deref(), cli.threads)?;
            commands::edit::run(args, config, verbose)
        }
    }
}
