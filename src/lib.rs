//! RuNeDiag: climate diagnostic comparison figures
//!
//! RuNeDiag renders the standard three-panel comparison of a test dataset, a
//! reference dataset and their difference. It is a presentation layer only:
//! fields arrive already regridded and statistics arrive already computed.
//!
//! ## Figures
//!
//! - **Annual-cycle zonal mean**: pseudocolor panels of month against
//!   latitude, see [`render::plot_annual_cycle_zonal_mean`]
//! - **Polar**: filled contours on a polar stereographic projection with a
//!   statistics box per panel, see [`render::plot_polar`]
//!
//! Both write the whole figure in every requested format and, optionally,
//! one cropped image per panel.
//!
//! ## Module Organization
//!
//! - [`field`]: gridded fields and their coordinate axes
//! - [`metrics`]: precomputed summary statistics
//! - [`parameters`]: figure configuration and output directories
//! - [`colormap`], [`levels`]: colour lookup, contour levels, colorbar labels
//! - [`projection`], [`coastline`]: polar stereographic maps
//! - [`layout`]: panel geometry in page coordinates
//! - [`render`]: figure drawing
//! - [`output`]: PNG/SVG files and per-panel crops
//! - [`job`]: JSON plot jobs for the command-line tool
//! - [`parallel`]: rasterisation thread pool
//! - [`errors`]: centralized error handling
//!
//! ## Usage
//!
//! ```rust,no_run
//! use ndarray::Array2;
//! use ru_ne_diag::prelude::*;
//!
//! let lat: Vec<f64> = (0..9).map(|i| 50.0 + 5.0 * i as f64).collect();
//! let lon: Vec<f64> = (0..36).map(|i| 10.0 * i as f64).collect();
//! let data = Array2::from_shape_fn((9, 36), |(j, _)| lat[j]);
//! let test = GriddedField::new("TREFHT", data.clone(), lon.clone(), lat.clone(), "K").unwrap();
//! let reference = GriddedField::new("TREFHT", data, lon, lat, "K").unwrap();
//! let diff = test.clone();
//!
//! let metrics: MetricsDict = serde_json::from_str(
//!     r#"{"test": {"min": 50, "mean": 70, "max": 90},
//!         "ref":  {"min": 50, "mean": 70, "max": 90},
//!         "diff": {"min": 0, "mean": 0, "max": 0},
//!         "misc": {"rmse": 0, "corr": 1}}"#,
//! ).unwrap();
//!
//! let params = PlotParameters {
//!     var_region: "polar_N".to_string(),
//!     output_file: "TREFHT-ANN-polar_N".to_string(),
//!     ..PlotParameters::default()
//! };
//! let written = ru_ne_diag::render::plot_polar(&reference, &test, &diff, &metrics, &params).unwrap();
//! println!("{:?}", written);
//! ```

pub mod coastline;
pub mod colormap;
pub mod errors;
pub mod field;
pub mod job;
pub mod layout;
pub mod levels;
pub mod metrics;
pub mod output;
pub mod parallel;
pub mod parameters;
pub mod projection;
pub mod render;

pub use errors::*;

// High-level convenience API
pub mod prelude {
    //! Commonly used imports for convenience
    pub use crate::errors::{Result, RuNeDiagError};
    pub use crate::field::GriddedField;
    pub use crate::job::{PlotJob, PlotKind};
    pub use crate::metrics::{FieldStats, MetricsDict, MiscMetrics, PanelStats};
    pub use crate::output::OutputFormat;
    pub use crate::parallel::ParallelConfig;
    pub use crate::parameters::PlotParameters;
    pub use crate::render::{plot_annual_cycle_zonal_mean, plot_polar, Figure};
}
