//! Defines command-line interface options using `clap` for the RuNeDiag application.

use clap::Parser;
use std::path::PathBuf;

/// A CLI tool for rendering test/reference/difference diagnostic figures
#[derive(Parser, Debug)]
#[command(
    author = "Sam Green",
    version = "1.1.0",
    name = "RuNeDiag",
    about = "Renders climate diagnostic comparison figures"
)]
pub struct Args {
    /// Path to the JSON plot job (fields, metrics and parameters)
    #[arg(short, long)]
    pub job: PathBuf,

    /// Override the job's results directory
    #[arg(long)]
    pub results_dir: Option<PathBuf>,

    /// Override the whole-figure formats, comma separated (png, svg)
    #[arg(long, value_delimiter = ',')]
    pub output_format: Option<Vec<String>>,

    /// Override the per-panel formats, comma separated (png, svg)
    #[arg(long, value_delimiter = ',')]
    pub output_format_subplot: Option<Vec<String>>,

    /// Override the figure resolution in dots per inch
    #[arg(long, value_parser = parse_dpi)]
    pub dpi: Option<f64>,

    /// Enable verbose output.
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Number of threads to use for rasterisation. Defaults to number of CPU cores.
    #[arg(short = 't', long)]
    pub threads: Option<usize>,
}

fn parse_dpi(s: &str) -> Result<f64, String> {
    let dpi = s
        .parse::<f64>()
        .map_err(|_| format!("Invalid dpi '{}': expected a number", s))?;
    if dpi > 0.0 && dpi.is_finite() {
        Ok(dpi)
    } else {
        Err(format!("Invalid dpi '{}': must be positive", s))
    }
}
