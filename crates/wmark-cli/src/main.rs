//! wmark - watermark compositing CLI
//!
//! Blends a watermark image onto a base image and writes the result as
//! JPEG or PNG.

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod commands;
mod error;

#[derive(Parser)]
#[command(name = "wmark")]
#[command(author, version, about = "Watermark compositing CLI")]
#[command(long_about = "
Blends a watermark image onto a base image.

Without a subcommand the settings are collected interactively.

Examples:
  wmark                                 # Interactive session
  wmark apply -i photo.png -w logo.png -o out.png -t 40 --method grid
  wmark apply -i photo.jpg -w logo.png -o out.jpg -t 75 --method single --position \"10 20\"
  wmark apply -i photo.png -w logo.png -o out.png -t 50 --transparency-color \"0 255 0\"
  wmark info photo.png logo.png         # Show color models
")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Collect settings interactively (default)
    Run,

    /// Composite with settings given as flags
    #[command(visible_alias = "a")]
    Apply(ApplyArgs),

    /// Display image color model information
    #[command(visible_alias = "i")]
    Info(InfoArgs),
}

#[derive(Args)]
struct ApplyArgs {
    /// Base image
    #[arg(short, long)]
    image: PathBuf,

    /// Watermark image
    #[arg(short, long)]
    watermark: PathBuf,

    /// Output image (.jpg or .png)
    #[arg(short, long)]
    output: PathBuf,

    /// Watermark transparency percentage (0-100)
    #[arg(short, long, allow_negative_numbers = true)]
    transparency: i32,

    /// Honor the watermark alpha channel (translucent watermarks only)
    #[arg(long)]
    use_alpha: bool,

    /// Watermark color treated as transparent, "R G B"
    #[arg(long, value_name = "R G B")]
    transparency_color: Option<String>,

    /// Position method: single, grid; anything else overlays
    #[arg(short, long, default_value = "overlay")]
    method: String,

    /// Top-left corner for the single method, "X Y"
    #[arg(short, long, value_name = "X Y", allow_hyphen_values = true)]
    position: Option<String>,
}

#[derive(Args)]
struct InfoArgs {
    /// Input image(s)
    #[arg(required = true)]
    input: Vec<PathBuf>,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => commands::run::run(cli.verbose),
        Commands::Apply(args) => commands::apply::run(args, cli.verbose),
        Commands::Info(args) => commands::info::run(args, cli.verbose),
    }
}

/// Exit status for a command line that failed to parse.
///
/// Help and version requests keep clap's own handling and return `None`.
fn usage_exit_code(err: &clap::Error) -> Option<u8> {
    match err.kind() {
        ErrorKind::DisplayHelp
        | ErrorKind::DisplayVersion
        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => None,
        _ => Some(1),
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match usage_exit_code(&err) {
            None => err.exit(),
            Some(code) => {
                let _ = err.print();
                return ExitCode::from(code);
            }
        },
    };
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(error::exit_code(&err))
        }
    }
}
