use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use tract_labelmap::{AssignerConfig, JobOutcome, LabelMapJob, LoaderRegistry, DEFAULT_CHUNK_SIZE};

/// Compute assignment map from bundle and centroid streamline.
/// This can be very memory hungry on large fiber bundles.
#[derive(Debug, Parser)]
#[command(name = "tract-labelmap", version, about, long_about = None)]
struct Cli {
    /// Fiber bundle file (.tck or .trk)
    bundle: PathBuf,

    /// Centroid streamline associated to the input fiber bundle
    centroid_streamline: PathBuf,

    /// Output (.npz) file containing the label of the nearest point on the
    /// centroid streamline for each point of the bundle
    output_label: PathBuf,

    /// Output (.npz) file containing the distance (in mm) to the nearest
    /// centroid streamline point for each point of the bundle
    output_distance: PathBuf,

    /// Force overwriting of the output files
    #[arg(short = 'f', long)]
    overwrite: bool,

    /// Bundle points processed per chunk; bounds memory to chunk x centroid
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
    chunk_size: usize,

    /// Worker threads (0 = one per CPU)
    #[arg(long, default_value_t = 0)]
    workers: usize,

    /// Increase logging verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt().with_env_filter(filter).with_target(false).init();

    let start_time = Instant::now();
    let registry = LoaderRegistry::new();
    let job = LabelMapJob::new(
        cli.bundle,
        cli.centroid_streamline,
        cli.output_label,
        cli.output_distance,
    )
    .overwrite(cli.overwrite)
    .config(AssignerConfig {
        chunk_size: cli.chunk_size,
        workers: cli.workers,
    });

    match job.run(&registry)? {
        JobOutcome::Skipped { .. } => {}
        JobOutcome::Written {
            label_path,
            distance_path,
            points,
            ..
        } => {
            info!(
                labels = %label_path.display(),
                distances = %distance_path.display(),
                points,
                elapsed_s = start_time.elapsed().as_secs_f64(),
                "done"
            );
        }
    }

    Ok(())
}
