//! Blood Bowl 2 replay (.bbrz) block dice extractor CLI
//!
//! Scans a directory of replay archives and writes the dice of every block
//! roll to an output file.
//!
//! ## Report modes
//!
//! - default - every roll of every replay, one sorted list
//! - `-s` - rolls grouped per replay file
//! - `-r` - all dice per coach on one line
//!
//! ## Exit codes
//!
//! - `1` - output exists and `-f` was not given
//! - `2` - input directory not found
//! - `3` - `-s` and `-r` given together

use clap::{Parser, ValueEnum};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::filter::EnvFilter;

use bbrz_dice::archive::walk_archives;
use bbrz_dice::report::{Report, ReportMode};

/// Takes a directory containing Blood Bowl 2 BBRZ replay files and extracts
/// dice values from all block rolls.
#[derive(Parser)]
#[command(name = "bbrz-dice")]
#[command(version, long_about = None)]
struct Cli {
    /// Source directory containing 1 or more bbrz files
    #[arg(short, long)]
    dir: PathBuf,

    /// Output file to save dice values
    #[arg(short, long)]
    out: PathBuf,

    /// Force overwrite of output file if it exists
    #[arg(short = 'f')]
    force: bool,

    /// Sort by replay file, default is to merge into a single list
    #[arg(short = 's')]
    sort_replay: bool,

    /// Raw dice results per coach (default displays each roll discreetly)
    #[arg(short = 'r')]
    raw: bool,

    /// Output format
    #[arg(long, default_value = "text")]
    format: OutputFormat,
}

/// Output format options
#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    let mode = match (cli.sort_replay, cli.raw) {
        (true, true) => {
            error!(
                "Raw mode and sort by replay mode are not mutually compatible, choose only one."
            );
            return ExitCode::from(3);
        }
        (true, false) => ReportMode::ByReplay,
        (false, true) => ReportMode::Raw,
        (false, false) => ReportMode::Merged,
    };

    if let Err(code) = prepare_output(&cli.out, cli.force) {
        return code;
    }

    if !cli.dir.is_dir() {
        error!(
            "Input directory {} not found, specify a different input directory",
            cli.dir.display()
        );
        return ExitCode::from(2);
    }

    let report = match collect_report(&cli.dir, mode) {
        Ok(r) => r,
        Err(e) => {
            error!("Error scanning {}: {}", cli.dir.display(), e);
            return ExitCode::FAILURE;
        }
    };

    match write_report(&report, &cli.out, cli.format) {
        Ok(()) => {
            info!(
                replays = report.replays().len(),
                rolls = report.roll_count(),
                "wrote {}",
                cli.out.display()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Error writing {}: {}", cli.out.display(), e);
            ExitCode::FAILURE
        }
    }
}

/// Initialize logging to stderr, `info` unless `RUST_LOG` says otherwise.
fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

// ============================================================================
// Output Handling
// ============================================================================

/// Refuses an existing output unless forced; when forced, removes it.
fn prepare_output(out: &Path, force: bool) -> Result<(), ExitCode> {
    if !out.exists() {
        return Ok(());
    }
    if !force {
        error!(
            "Output file {} already exists, specify a different output file.",
            out.display()
        );
        return Err(ExitCode::from(1));
    }

    let removed = if out.is_dir() {
        std::fs::remove_dir_all(out)
    } else {
        std::fs::remove_file(out)
    };
    removed.map_err(|e| {
        error!("Failed to remove {}: {}", out.display(), e);
        ExitCode::FAILURE
    })
}

fn write_report(report: &Report, out: &Path, format: OutputFormat) -> std::io::Result<()> {
    let writer = BufWriter::new(File::create(out)?);
    match format {
        OutputFormat::Text => report.write_text(writer),
        OutputFormat::Json => report.write_json(writer),
    }
}

// ============================================================================
// Replay Scanning
// ============================================================================

fn collect_report(dir: &Path, mode: ReportMode) -> bbrz_dice::Result<Report> {
    let mut report = Report::new(mode);
    let mut skipped = 0usize;

    for (path, archive) in walk_archives(dir)? {
        match archive.and_then(|a| a.block_rolls().map(|rolls| (a, rolls))) {
            Ok((archive, rolls)) => {
                info!(rolls = rolls.len(), "processed {}", archive.file_name());
                report.add_replay(archive.file_name(), rolls);
            }
            Err(e) => {
                warn!("Skipping {}: {}", path.display(), e);
                skipped += 1;
            }
        }
    }

    if report.replays().is_empty() && skipped == 0 {
        warn!("No .bbrz files found in {}", dir.display());
    }

    Ok(report)
}
