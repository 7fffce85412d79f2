//! Plot jobs: everything one figure needs, as a single JSON document
//!
//! ```json
//! {
//!   "kind": "polar",
//!   "test":      {"name": "TREFHT", "units": "K", "x": [...], "lat": [...], "data": [[...]]},
//!   "reference": {...},
//!   "diff":      {...},
//!   "metrics":   {"test": {...}, "ref": {...}, "diff": {...}, "misc": {...}},
//!   "parameters": {"var_region": "polar_N", "output_file": "TREFHT-ANN-polar_N"}
//! }
//! ```
//!
//! Field `data` rows follow `layout`: `lat_x` (default, one row per latitude)
//! or `x_lat` (one row per time step / longitude). `null` marks missing values.

use crate::errors::{Result, RuNeDiagError};
use crate::field::GriddedField;
use crate::metrics::MetricsDict;
use crate::parameters::PlotParameters;
use crate::render::{plot_annual_cycle_zonal_mean, plot_polar};
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Which figure a job renders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlotKind {
    AnnualCycleZonalMean,
    Polar,
}

/// Row orientation of inline field data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataLayout {
    #[default]
    LatX,
    XLat,
}

/// A field as it appears in a job document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub units: String,
    pub x: Vec<f64>,
    pub lat: Vec<f64>,
    #[serde(default)]
    pub layout: DataLayout,
    pub data: Vec<Vec<Option<f64>>>,
}

impl FieldSpec {
    pub fn to_field(&self, fallback_name: &str) -> Result<GriddedField> {
        let name = if self.name.is_empty() {
            fallback_name.to_string()
        } else {
            self.name.clone()
        };

        let rows = self.data.len();
        let cols = self.data.first().map_or(0, Vec::len);
        if let Some(bad) = self.data.iter().position(|row| row.len() != cols) {
            return Err(RuNeDiagError::ShapeMismatch {
                field: name,
                message: format!(
                    "row {} has {} values, expected {}",
                    bad,
                    self.data[bad].len(),
                    cols
                ),
            });
        }

        let values: Vec<f64> = self
            .data
            .iter()
            .flatten()
            .map(|v| v.unwrap_or(f64::NAN))
            .collect();
        let data = Array2::from_shape_vec((rows, cols), values)?;

        match self.layout {
            DataLayout::LatX => {
                GriddedField::new(name, data, self.x.clone(), self.lat.clone(), self.units.clone())
            }
            DataLayout::XLat => GriddedField::from_time_lat(
                name,
                data,
                self.x.clone(),
                self.lat.clone(),
                self.units.clone(),
            ),
        }
    }
}

/// One figure to render
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotJob {
    pub kind: PlotKind,
    pub test: FieldSpec,
    pub reference: FieldSpec,
    pub diff: FieldSpec,
    pub metrics: MetricsDict,
    #[serde(default)]
    pub parameters: PlotParameters,
}

impl PlotJob {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let job: Self = serde_json::from_str(text)?;
        job.parameters.validate()?;
        Ok(job)
    }

    /// Render the job's figure and return the files written.
    pub fn run(&self) -> Result<Vec<PathBuf>> {
        let test = self.test.to_field("test")?;
        let reference = self.reference.to_field("reference")?;
        let diff = self.diff.to_field("diff")?;

        info!(
            "Rendering {:?} figure '{}'",
            self.kind, self.parameters.output_file
        );
        match self.kind {
            PlotKind::AnnualCycleZonalMean => plot_annual_cycle_zonal_mean(
                &reference,
                &test,
                &diff,
                &self.metrics,
                &self.parameters,
            ),
            PlotKind::Polar => {
                plot_polar(&reference, &test, &diff, &self.metrics, &self.parameters)
            }
        }
    }
}
