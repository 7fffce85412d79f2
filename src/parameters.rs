//! Plot parameters shared by both figure types
//!
//! Parameters are read from JSON. Every field has a default, so a document
//! only needs to name what differs from a stock diagnostics run.

use crate::errors::{Result, RuNeDiagError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

fn default_figsize() -> [f64; 2] {
    [8.5, 11.0]
}

fn default_dpi() -> f64 {
    150.0
}

fn default_cmap() -> String {
    "cet_rainbow".to_string()
}

fn default_diff_cmap() -> String {
    "diverging_bwr".to_string()
}

fn default_results_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_output_file() -> String {
    "output".to_string()
}

fn default_output_format() -> Vec<String> {
    vec!["png".to_string()]
}

/// Figure configuration for one plot call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotParameters {
    /// Figure width and height in inches
    pub figsize: [f64; 2],
    pub dpi: f64,

    pub test_colormap: String,
    pub reference_colormap: String,
    pub diff_colormap: String,
    /// Directory searched for `.rgb` colormap files given by bare name
    pub colormap_dir: Option<PathBuf>,

    /// Levels for the test and reference panels; empty means automatic
    pub contour_levels: Vec<f64>,
    /// Levels for the difference panel; empty means automatic
    pub diff_levels: Vec<f64>,

    pub test_name_yrs: String,
    pub ref_name_yrs: String,
    pub test_title: String,
    pub reference_title: String,
    pub diff_title: String,
    pub main_title: String,

    pub results_dir: PathBuf,
    pub current_set: String,
    pub case_id: String,
    pub output_file: String,
    pub output_format: Vec<String>,
    pub output_format_subplot: Vec<String>,

    /// Region name for polar plots, e.g. `polar_N` or `polar_S`
    pub var_region: String,
    /// Optional coastline polylines for polar plots
    pub coastline_file: Option<PathBuf>,
}

impl Default for PlotParameters {
    fn default() -> Self {
        Self {
            figsize: default_figsize(),
            dpi: default_dpi(),
            test_colormap: default_cmap(),
            reference_colormap: default_cmap(),
            diff_colormap: default_diff_cmap(),
            colormap_dir: None,
            contour_levels: Vec::new(),
            diff_levels: Vec::new(),
            test_name_yrs: String::new(),
            ref_name_yrs: String::new(),
            test_title: "Test".to_string(),
            reference_title: "Reference".to_string(),
            diff_title: "Test - Reference".to_string(),
            main_title: String::new(),
            results_dir: default_results_dir(),
            current_set: String::new(),
            case_id: String::new(),
            output_file: default_output_file(),
            output_format: default_output_format(),
            output_format_subplot: Vec::new(),
            var_region: String::new(),
            coastline_file: None,
        }
    }
}

impl PlotParameters {
    /// Load parameters from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let params: Self = serde_json::from_str(&text)?;
        params.validate()?;
        Ok(params)
    }

    /// Reject geometry that cannot produce an image.
    pub fn validate(&self) -> Result<()> {
        if !(self.figsize[0] > 0.0 && self.figsize[1] > 0.0) {
            return Err(RuNeDiagError::InvalidParameter {
                name: "figsize".to_string(),
                message: format!("{:?} must be positive", self.figsize),
            });
        }
        if !(self.dpi > 0.0) {
            return Err(RuNeDiagError::InvalidParameter {
                name: "dpi".to_string(),
                message: format!("{} must be positive", self.dpi),
            });
        }
        for (name, levels) in [
            ("contour_levels", &self.contour_levels),
            ("diff_levels", &self.diff_levels),
        ] {
            if levels.windows(2).any(|w| !(w[0] < w[1])) {
                return Err(RuNeDiagError::InvalidParameter {
                    name: name.to_string(),
                    message: "levels must be strictly increasing".to_string(),
                });
            }
        }
        if self.output_file.is_empty() {
            return Err(RuNeDiagError::InvalidParameter {
                name: "output_file".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// Directory receiving the figures of a diagnostics set:
/// `results_dir/current_set/case_id`, created if missing.
pub fn get_output_dir(current_set: &str, params: &PlotParameters) -> Result<PathBuf> {
    let dir = params.results_dir.join(current_set).join(&params.case_id);
    if !dir.exists() {
        fs::create_dir_all(&dir)?;
    }
    Ok(dir)
}
