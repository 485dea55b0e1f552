//! Command implementations for the pointload CLI
//!
//! Contains command dispatch, logging setup, and the import workflow:
//! build the effective configuration, run the reader, report a summary.

use tracing::info;

use crate::app::services::point_reader::PointReader;
use crate::cli::args::{Args, Commands, ImportArgs, OutputFormat};
use crate::{Error, Result};

/// Summary of one import run
#[derive(Debug, Clone, serde::Serialize)]
pub struct ImportSummary {
    /// Number of sources processed
    pub sources: usize,

    /// Total points produced, gap markers included
    pub points: usize,

    /// Gap markers among the points
    pub gap_points: usize,

    /// Inline notes collected
    pub notes: usize,

    /// Rows dropped under the ignore-invalid-rows policy
    pub rows_rejected: usize,

    /// Duplicate points removed during normalization
    pub duplicates_removed: usize,
}

/// Main command runner for pointload
pub fn run(args: Args) -> Result<ImportSummary> {
    match args.get_command() {
        Commands::Import(import_args) => run_import(import_args),
    }
}

/// Execute the import command
pub fn run_import(args: ImportArgs) -> Result<ImportSummary> {
    let config = args.to_config()?;

    let reader = PointReader::new(&config)?;
    let result = reader.load_points()?;

    let summary = ImportSummary {
        sources: config.sources.len(),
        points: result.points.len(),
        gap_points: result.points.iter().filter(|point| point.is_gap()).count(),
        notes: result.notes.len(),
        rows_rejected: result.stats.rows_rejected,
        duplicates_removed: result.stats.duplicates_removed,
    };

    info!(
        "Import complete: {} points from {} sources ({:.1}% of rows decoded).",
        summary.points,
        summary.sources,
        result.stats.success_rate()
    );

    match args.output_format {
        OutputFormat::Human => {
            println!(
                "Loaded {} points ({} gaps) and {} notes from {} source(s).",
                summary.points, summary.gap_points, summary.notes, summary.sources
            );

            if summary.rows_rejected > 0 {
                println!("Dropped {} undecodable row(s).", summary.rows_rejected);
            }
            if summary.duplicates_removed > 0 {
                println!("Removed {} duplicate point(s).", summary.duplicates_removed);
            }
        }
        OutputFormat::Json => {
            let encoded = serde_json::to_string_pretty(&summary).map_err(|error| {
                Error::configuration(format!("Failed to encode summary: {}", error))
            })?;
            println!("{}", encoded);
        }
    }

    Ok(summary)
}

/// Initialize tracing with the given default level.
///
/// `RUST_LOG` takes precedence when set.
pub fn init_logging(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
