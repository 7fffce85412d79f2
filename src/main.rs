//! Entry point for the RuNeDiag application.
//! Handles CLI parsing, loads a plot job and renders its figure.

use clap::Parser;
use ru_ne_diag::job::PlotJob;
use ru_ne_diag::parallel::ParallelConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::Args;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let parallel = args
        .threads
        .map_or_else(ParallelConfig::all_cores, ParallelConfig::with_threads);
    parallel.setup_global_pool()?;

    let mut job = PlotJob::from_json_file(&args.job)?;
    info!("Successfully loaded plot job: {}", args.job.display());

    if let Some(dir) = args.results_dir {
        job.parameters.results_dir = dir;
    }
    if let Some(formats) = args.output_format {
        job.parameters.output_format = formats;
    }
    if let Some(formats) = args.output_format_subplot {
        job.parameters.output_format_subplot = formats;
    }
    if let Some(dpi) = args.dpi {
        job.parameters.dpi = dpi;
    }
    job.parameters.validate()?;

    let written = job.run()?;
    for path in &written {
        println!("✅ Saved {}", path.display());
    }

    Ok(())
}
