//! Summary statistics computed upstream and annotated on the figures
//!
//! The plotting routines never compute statistics themselves; they receive a
//! [`MetricsDict`] whose JSON form is
//!
//! ```json
//! {
//!   "test": {"min": 0.0, "mean": 1.0, "max": 2.0},
//!   "ref":  {"min": 0.0, "mean": 1.0, "max": 2.0},
//!   "diff": {"min": -1.0, "mean": 0.0, "max": 1.0},
//!   "misc": {"rmse": 0.5, "corr": 0.9}
//! }
//! ```

use serde::{Deserialize, Serialize};

/// Min/mean/max of a single field
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldStats {
    pub min: f64,
    pub mean: f64,
    pub max: f64,
}

/// Statistics comparing test and reference
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MiscMetrics {
    pub rmse: f64,
    pub corr: f64,
}

/// All statistics for one comparison figure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsDict {
    pub test: FieldStats,
    #[serde(rename = "ref")]
    pub reference: FieldStats,
    pub diff: FieldStats,
    pub misc: MiscMetrics,
}

/// The statistics box drawn next to one panel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelStats {
    pub max: f64,
    pub mean: f64,
    pub min: f64,
    /// RMSE and correlation, shown on the difference panel only
    pub comparison: Option<MiscMetrics>,
}

impl PanelStats {
    pub fn from_field(stats: &FieldStats) -> Self {
        Self {
            max: stats.max,
            mean: stats.mean,
            min: stats.min,
            comparison: None,
        }
    }

    pub fn with_comparison(stats: &FieldStats, misc: &MiscMetrics) -> Self {
        Self {
            comparison: Some(*misc),
            ..Self::from_field(stats)
        }
    }

    /// Values of the `Max`/`Mean`/`Min` column, formatted `%.2f`.
    pub fn summary_lines(&self) -> [String; 3] {
        [
            format!("{:.2}", self.max),
            format!("{:.2}", self.mean),
            format!("{:.2}", self.min),
        ]
    }

    /// Values of the `RMSE`/`CORR` column, if present.
    pub fn comparison_lines(&self) -> Option<[String; 2]> {
        self.comparison
            .map(|m| [format!("{:.2}", m.rmse), format!("{:.2}", m.corr)])
    }
}

impl MetricsDict {
    /// Statistics for the test, reference and difference panels, in panel order.
    pub fn panel_stats(&self) -> [PanelStats; 3] {
        [
            PanelStats::from_field(&self.test),
            PanelStats::from_field(&self.reference),
            PanelStats::with_comparison(&self.diff, &self.misc),
        ]
    }
}
