//! Contour level handling, value-to-colour normalisation and colorbar labels
//!
//! Configured levels are wrapped in two open-ended bins at ±1e8 so values
//! beyond the outermost level still receive the extreme colours. The colour of
//! each bin follows the 256-entry boundary-norm rule: bin `i` of `n` maps to
//! colormap index `floor(i * 255 / (n - 1))`.

use crate::errors::{Result, RuNeDiagError};

/// Outer boundary added on both sides of configured levels
pub const EXTENSION_BOUND: f64 = 1.0e8;

/// Number of discrete colours a boundary norm spreads its bins over
pub const NCOLORS: usize = 256;

/// Wrap configured levels in the open-ended extension bins.
///
/// Returns `None` when no levels are configured.
pub fn extend_levels(clevels: &[f64]) -> Option<Vec<f64>> {
    if clevels.is_empty() {
        return None;
    }
    let mut levels = Vec::with_capacity(clevels.len() + 2);
    levels.push(-EXTENSION_BOUND);
    levels.extend_from_slice(clevels);
    levels.push(EXTENSION_BOUND);
    Some(levels)
}

/// Wrap automatically chosen levels in extension bins.
///
/// The open-ended bounds are ±1e8 unless the levels themselves reach that
/// far, in which case they sit one level step beyond the outermost level.
pub fn extend_auto_levels(levels: &[f64]) -> Option<Vec<f64>> {
    let (first, last) = (*levels.first()?, *levels.last()?);
    let step = levels
        .windows(2)
        .map(|w| w[1] - w[0])
        .next()
        .unwrap_or(1.0);
    let mut extended = Vec::with_capacity(levels.len() + 2);
    extended.push((-EXTENSION_BOUND).min(first - step));
    extended.extend_from_slice(levels);
    extended.push(EXTENSION_BOUND.max(last + step));
    Some(extended)
}

/// Maps values to discrete bins between boundaries
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryNorm {
    boundaries: Vec<f64>,
    ncolors: usize,
}

impl BoundaryNorm {
    pub fn new(boundaries: Vec<f64>, ncolors: usize) -> Result<Self> {
        if boundaries.len() < 2 {
            return Err(RuNeDiagError::InvalidParameter {
                name: "levels".to_string(),
                message: "at least two boundaries are required".to_string(),
            });
        }
        if boundaries.windows(2).any(|w| !(w[0] < w[1])) {
            return Err(RuNeDiagError::InvalidParameter {
                name: "levels".to_string(),
                message: "boundaries must be strictly increasing".to_string(),
            });
        }
        Ok(Self {
            boundaries,
            ncolors,
        })
    }

    pub fn boundaries(&self) -> &[f64] {
        &self.boundaries
    }

    /// Number of bins between boundaries.
    pub fn n_bins(&self) -> usize {
        self.boundaries.len() - 1
    }

    /// Bin holding `value`; values beyond the outer boundaries fall into the
    /// outermost bins. `NaN` has no bin.
    pub fn bin(&self, value: f64) -> Option<usize> {
        if value.is_nan() {
            return None;
        }
        let upper = self.boundaries.partition_point(|&b| b <= value);
        Some(upper.saturating_sub(1).min(self.n_bins() - 1))
    }

    /// Colormap index assigned to a bin.
    pub fn color_index(&self, bin: usize) -> usize {
        let bins = self.n_bins();
        if bins == 1 {
            return (self.ncolors - 1) / 2;
        }
        let scale = (self.ncolors - 1) as f64 / (bins - 1) as f64;
        (bin.min(bins - 1) as f64 * scale).floor() as usize
    }

    /// Colormap position in `[0, 1]` for a bin.
    pub fn bin_fraction(&self, bin: usize) -> f64 {
        self.color_index(bin) as f64 / (self.ncolors - 1) as f64
    }

    /// Colormap position for a value.
    pub fn normalize(&self, value: f64) -> Option<f64> {
        self.bin(value).map(|b| self.bin_fraction(b))
    }
}

/// Linear scaling of `[vmin, vmax]` onto `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearNorm {
    pub vmin: f64,
    pub vmax: f64,
}

impl LinearNorm {
    pub fn new(vmin: f64, vmax: f64) -> Self {
        Self { vmin, vmax }
    }

    pub fn normalize(&self, value: f64) -> Option<f64> {
        if !value.is_finite() {
            return None;
        }
        let span = self.vmax - self.vmin;
        if span.abs() < f64::EPSILON {
            return Some(0.5);
        }
        Some(((value - self.vmin) / span).clamp(0.0, 1.0))
    }
}

/// Smallest "nice" step (1, 2, 2.5, 5 × 10^k) dividing `span` into at most
/// `max_intervals` intervals.
pub fn nice_step(span: f64, max_intervals: usize) -> f64 {
    if !(span > 0.0) || max_intervals == 0 {
        return 1.0;
    }
    let raw = span / max_intervals as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    [1.0, 2.0, 2.5, 5.0, 10.0]
        .iter()
        .map(|m| m * magnitude)
        .find(|&step| step >= raw * (1.0 - 1e-9))
        .unwrap_or(10.0 * magnitude)
}

/// Evenly spaced nice levels covering `[min, max]`.
pub fn auto_levels(min: f64, max: f64, max_intervals: usize) -> Vec<f64> {
    if !(min.is_finite() && max.is_finite()) {
        return Vec::new();
    }
    let (min, max) = if max - min < f64::EPSILON {
        let pad = if min.abs() > 0.0 { min.abs() * 0.1 } else { 1.0 };
        (min - pad, max + pad)
    } else {
        (min, max)
    };

    let step = nice_step(max - min, max_intervals);
    let start = (min / step).floor() as i64;
    let end = (max / step).ceil() as i64;
    (start..=end).map(|k| snap(k as f64 * step, step)).collect()
}

/// Nice tick positions strictly inside `[min, max]`.
pub fn ticks_within(min: f64, max: f64, max_intervals: usize) -> Vec<f64> {
    let step = nice_step(max - min, max_intervals);
    auto_levels(min, max, max_intervals)
        .into_iter()
        .filter(|&t| t >= min - step * 1e-6 && t <= max + step * 1e-6)
        .collect()
}

// Remove accumulated float noise such as 0.30000000000000004
fn snap(value: f64, step: f64) -> f64 {
    let decimals = decimals_for_step(step) as i32 + 2;
    let factor = 10f64.powi(decimals);
    let snapped = (value * factor).round() / factor;
    if snapped == 0.0 {
        0.0
    } else {
        snapped
    }
}

fn decimals_for_step(step: f64) -> usize {
    if !(step > 0.0) {
        return 0;
    }
    let mut decimals = 0;
    let mut scaled = step;
    while decimals < 6 && (scaled - scaled.round()).abs() > 1e-9 * scaled.abs().max(1.0) {
        scaled *= 10.0;
        decimals += 1;
    }
    decimals
}

/// Format an automatic tick with just enough decimals for its spacing.
pub fn format_tick(value: f64, step: f64) -> String {
    let decimals = decimals_for_step(step);
    let text = format!("{:.*}", decimals, value);
    // Avoid "-0" and "-0.0"
    if text.trim_start_matches('-').chars().all(|c| c == '0' || c == '.') {
        text.trim_start_matches('-').to_string()
    } else {
        text
    }
}

/// Colorbar tick labels and the gap (in points) between bar and label anchor
#[derive(Debug, Clone, PartialEq)]
pub struct ColorbarLabels {
    pub labels: Vec<String>,
    pub pad_points: f64,
}

/// Labels for the interior levels of a configured colorbar.
///
/// The printf-style width/precision depends on the largest magnitude: below 10
/// `%5.2f`, below 100 `%5.1f`, otherwise `%6.1f`. When `strip_integral` is set
/// and every label ends in `.0`, the suffix is dropped and the pad shrinks by
/// 5 points.
pub fn colorbar_labels(levels: &[f64], strip_integral: bool) -> ColorbarLabels {
    let maxval = levels.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
    let (width, precision, mut pad) = if maxval < 10.0 {
        (5, 2, 25.0)
    } else if maxval < 100.0 {
        (5, 1, 25.0)
    } else {
        (6, 1, 30.0)
    };

    let mut labels: Vec<String> = levels
        .iter()
        .map(|v| format!("{:width$.prec$}", v, width = width, prec = precision))
        .collect();

    if strip_integral && !labels.is_empty() && labels.iter().all(|l| l.ends_with(".0")) {
        labels = labels
            .into_iter()
            .map(|l| l[..l.len() - 2].to_string())
            .collect();
        pad -= 5.0;
    }

    ColorbarLabels {
        labels,
        pad_points: pad,
    }
}
