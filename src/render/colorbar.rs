//! Colour scales and vertical colorbars

use super::canvas::Canvas;
use crate::colormap::Colormap;
use crate::errors::Result;
use crate::layout::{PageRect, COLORBAR_LABEL_PT};
use crate::levels::{
    auto_levels, colorbar_labels, extend_auto_levels, extend_levels, format_tick, nice_step,
    ticks_within, BoundaryNorm, LinearNorm, NCOLORS,
};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, VPos};

/// Length of each triangular extension, as a fraction of the bar
const EXTEND_FRAC: f64 = 0.05;

/// Strips used to draw a continuous gradient
const GRADIENT_STEPS: usize = 64;

/// Gap between bar and automatically placed labels, in points
const DEFAULT_LABEL_PAD: f64 = 3.5;

/// How values of a panel become colours
#[derive(Debug, Clone, PartialEq)]
pub enum ColorScale {
    /// Discrete bins; `configured` is false for automatically chosen levels
    Levels { norm: BoundaryNorm, configured: bool },
    /// Continuous scaling over the data range
    Continuous(LinearNorm),
}

impl ColorScale {
    /// Configured levels, or a continuous scale over the field's range.
    pub fn levels_or_continuous(clevels: &[f64], range: Option<(f64, f64)>) -> Result<Self> {
        match extend_levels(clevels) {
            Some(levels) => Ok(ColorScale::Levels {
                norm: BoundaryNorm::new(levels, NCOLORS)?,
                configured: true,
            }),
            None => {
                let (lo, hi) = range.unwrap_or((0.0, 1.0));
                Ok(ColorScale::Continuous(LinearNorm::new(lo, hi)))
            }
        }
    }

    /// Configured levels, or nice levels chosen over the field's range.
    pub fn levels_or_auto(
        clevels: &[f64],
        range: Option<(f64, f64)>,
        max_intervals: usize,
    ) -> Result<Self> {
        if !clevels.is_empty() {
            return Self::levels_or_continuous(clevels, range);
        }
        let (lo, hi) = range.unwrap_or((0.0, 1.0));
        let auto = auto_levels(lo, hi, max_intervals);
        let levels = extend_auto_levels(&auto).unwrap_or_else(|| vec![lo, hi]);
        Ok(ColorScale::Levels {
            norm: BoundaryNorm::new(levels, NCOLORS)?,
            configured: false,
        })
    }

    /// Colour of a value, `None` for missing data.
    pub fn color(&self, cmap: &Colormap, value: f64) -> Option<RGBColor> {
        let t = match self {
            ColorScale::Levels { norm, .. } => norm.normalize(value)?,
            ColorScale::Continuous(norm) => norm.normalize(value)?,
        };
        Some(cmap.at(t))
    }

    /// Tick positions along the bar (0 bottom, 1 top) and their labels.
    pub fn ticks(&self, strip_integral: bool) -> ColorbarTicks {
        match self {
            ColorScale::Levels { norm, configured } => {
                let bins = norm.n_bins();
                let bounds = norm.boundaries();
                let interior = &bounds[1..bounds.len() - 1];
                let positions = (1..bins).map(|k| k as f64 / bins as f64).collect();
                if *configured {
                    let labels = colorbar_labels(interior, strip_integral);
                    ColorbarTicks {
                        positions,
                        labels: labels.labels,
                        pad_points: labels.pad_points,
                        align: LabelAlign::Right,
                    }
                } else {
                    let step = interior
                        .windows(2)
                        .map(|w| w[1] - w[0])
                        .next()
                        .unwrap_or(1.0);
                    ColorbarTicks {
                        positions,
                        labels: interior.iter().map(|&v| format_tick(v, step)).collect(),
                        pad_points: DEFAULT_LABEL_PAD,
                        align: LabelAlign::Left,
                    }
                }
            }
            ColorScale::Continuous(norm) => {
                let span = norm.vmax - norm.vmin;
                if span.abs() < f64::EPSILON {
                    return ColorbarTicks {
                        positions: vec![0.5],
                        labels: vec![format_tick(norm.vmin, 1.0)],
                        pad_points: DEFAULT_LABEL_PAD,
                        align: LabelAlign::Left,
                    };
                }
                let step = nice_step(span, 6);
                let ticks = ticks_within(norm.vmin, norm.vmax, 6);
                ColorbarTicks {
                    positions: ticks.iter().map(|t| (t - norm.vmin) / span).collect(),
                    labels: ticks.iter().map(|&t| format_tick(t, step)).collect(),
                    pad_points: DEFAULT_LABEL_PAD,
                    align: LabelAlign::Left,
                }
            }
        }
    }
}

/// Ticks of a colorbar
#[derive(Debug, Clone, PartialEq)]
pub struct ColorbarTicks {
    pub positions: Vec<f64>,
    pub labels: Vec<String>,
    /// Distance from the bar's right edge to the label anchor, in points
    pub pad_points: f64,
    pub align: LabelAlign,
}

/// Which side of the label sits on its anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelAlign {
    Left,
    Right,
}

impl LabelAlign {
    fn hpos(self) -> HPos {
        match self {
            LabelAlign::Left => HPos::Left,
            LabelAlign::Right => HPos::Right,
        }
    }
}

/// Draw a vertical colorbar with triangular extensions at both ends.
pub fn draw_colorbar<DB: DrawingBackend>(
    canvas: &Canvas<'_, DB>,
    rect: &PageRect,
    cmap: &Colormap,
    scale: &ColorScale,
    strip_integral: bool,
) -> Result<()> {
    let (left, top) = canvas.px_f(rect.x, rect.top());
    let (right, bottom) = canvas.px_f(rect.right(), rect.y);
    let height = bottom - top;
    let y_at = |t: f64| bottom - t * height;
    let to_i = |x: f64, y: f64| (x.round() as i32, y.round() as i32);

    let (low_color, high_color) = match scale {
        ColorScale::Levels { norm, .. } => {
            let bins = norm.n_bins();
            for bin in 0..bins {
                let color = cmap.at(norm.bin_fraction(bin));
                canvas.fill_rect_px(
                    to_i(left, y_at(bin as f64 / bins as f64)),
                    to_i(right, y_at((bin + 1) as f64 / bins as f64)),
                    color,
                )?;
            }
            (cmap.at(norm.bin_fraction(0)), cmap.at(norm.bin_fraction(bins - 1)))
        }
        ColorScale::Continuous(_) => {
            for step in 0..GRADIENT_STEPS {
                let t0 = step as f64 / GRADIENT_STEPS as f64;
                let t1 = (step + 1) as f64 / GRADIENT_STEPS as f64;
                canvas.fill_rect_px(
                    to_i(left, y_at(t0)),
                    to_i(right, y_at(t1)),
                    cmap.at((t0 + t1) * 0.5),
                )?;
            }
            (cmap.at(0.0), cmap.at(1.0))
        }
    };

    // Extensions
    let ext = height * EXTEND_FRAC;
    let mid = (left + right) * 0.5;
    let lower = vec![to_i(left, bottom), to_i(right, bottom), to_i(mid, bottom + ext)];
    let upper = vec![to_i(left, top), to_i(right, top), to_i(mid, top - ext)];
    canvas.fill_polygon_px(lower.clone(), low_color)?;
    canvas.fill_polygon_px(upper.clone(), high_color)?;

    let outline = BLACK.stroke_width(1);
    let mut path = vec![to_i(left, bottom)];
    path.extend([lower[2], to_i(right, bottom), to_i(right, top), upper[2], to_i(left, top)]);
    path.push(to_i(left, bottom));
    canvas.polyline_px(path, outline)?;

    let ticks = scale.ticks(strip_integral);
    let label_x = right + canvas.points(ticks.pad_points);
    for (pos, label) in ticks.positions.iter().zip(&ticks.labels) {
        canvas.text_px(
            label.trim(),
            to_i(label_x, y_at(*pos)),
            COLORBAR_LABEL_PT,
            ticks.align.hpos(),
            VPos::Center,
        )?;
    }

    Ok(())
}
