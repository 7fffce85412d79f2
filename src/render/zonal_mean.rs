//! Annual-cycle zonal-mean figure
//!
//! Three pseudocolor panels (test, reference, difference) with the annual
//! cycle along x and latitude along y.

use super::canvas::Canvas;
use super::colorbar::{draw_colorbar, ColorScale};
use super::{draw_suptitle, draw_titles, Figure, PanelTitles};
use crate::colormap::{get_colormap, Colormap};
use crate::errors::Result;
use crate::field::{cell_edges, GriddedField};
use crate::layout::{PageSize, PanelLayout, TICK_LABEL_PT, ZONAL_MEAN_LAYOUT};
use crate::levels::nice_step;
use crate::metrics::MetricsDict;
use crate::output::save_figure;
use crate::parameters::PlotParameters;
use chrono::Month;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, VPos};
use std::path::PathBuf;
use tracing::debug;

/// Outward tick length and label gap, in points
const TICK_LENGTH_PT: f64 = 3.5;
const TICK_PAD_PT: f64 = 3.5;

struct ZonalPanel<'a> {
    field: &'a GriddedField,
    cmap: Colormap,
    scale: ColorScale,
    titles: PanelTitles,
}

/// Test, reference and difference annual cycles of a zonal mean
pub struct AnnualCycleZonalMeanFigure<'a> {
    page: PageSize,
    panels: [ZonalPanel<'a>; 3],
    main_title: String,
}

impl<'a> AnnualCycleZonalMeanFigure<'a> {
    pub fn new(
        reference: &'a GriddedField,
        test: &'a GriddedField,
        diff: &'a GriddedField,
        params: &PlotParameters,
    ) -> Result<Self> {
        let cmap_dir = params.colormap_dir.as_deref();
        let panel = |field: &'a GriddedField,
                     clevels: &[f64],
                     cmap: &str,
                     titles: PanelTitles|
         -> Result<ZonalPanel<'a>> {
            Ok(ZonalPanel {
                field,
                cmap: get_colormap(cmap, cmap_dir)?,
                scale: ColorScale::levels_or_continuous(clevels, field.finite_range())?,
                titles,
            })
        };

        let panels = [
            panel(
                test,
                &params.contour_levels,
                &params.test_colormap,
                PanelTitles::new(
                    Some(params.test_name_yrs.as_str()),
                    Some(params.test_title.as_str()),
                    Some(test.units.as_str()),
                ),
            )?,
            panel(
                reference,
                &params.contour_levels,
                &params.reference_colormap,
                PanelTitles::new(
                    Some(params.ref_name_yrs.as_str()),
                    Some(params.reference_title.as_str()),
                    Some(reference.units.as_str()),
                ),
            )?,
            panel(
                diff,
                &params.diff_levels,
                &params.diff_colormap,
                PanelTitles::new(None, Some(params.diff_title.as_str()), None),
            )?,
        ];

        Ok(Self {
            page: PageSize::new(params.figsize, params.dpi),
            panels,
            main_title: params.main_title.clone(),
        })
    }

    fn draw_panel<DB: DrawingBackend>(
        &self,
        canvas: &Canvas<'_, DB>,
        index: usize,
        panel: &ZonalPanel<'_>,
    ) -> Result<()> {
        let layout = self.layout();
        let rect = layout.panels[index];
        let field = panel.field;

        let x_edges = cell_edges(&field.x);
        let y_edges = cell_edges(&field.lat);
        let x_axis = AxisMap::new(&x_edges);
        let y_axis = AxisMap::new(&y_edges);

        let (left, top) = canvas.px_f(rect.x, rect.top());
        let (right, bottom) = canvas.px_f(rect.right(), rect.y);
        let map_x = |v: f64| left + x_axis.fraction(v) * (right - left);
        let map_y = |v: f64| bottom - y_axis.fraction(v) * (bottom - top);

        for ((j, i), &value) in field.data.indexed_iter() {
            if let Some(color) = panel.scale.color(&panel.cmap, value) {
                canvas.fill_rect_px(
                    to_px(map_x(x_edges[i]), map_y(y_edges[j])),
                    to_px(map_x(x_edges[i + 1]), map_y(y_edges[j + 1])),
                    color,
                )?;
            }
        }

        canvas.stroke_rect_px(to_px(left, top), to_px(right, bottom), BLACK.stroke_width(1))?;

        let tick_len = canvas.points(TICK_LENGTH_PT);
        let tick_pad = canvas.points(TICK_PAD_PT);
        let tick_style = BLACK.stroke_width(1);

        // Months along the bottom axis
        for (i, &t) in field.x.iter().enumerate() {
            let x = map_x(t);
            canvas.polyline_px(vec![to_px(x, bottom), to_px(x, bottom + tick_len)], tick_style)?;
            canvas.text_px(
                &month_initial(i),
                to_px(x, bottom + tick_len + tick_pad),
                TICK_LABEL_PT,
                HPos::Center,
                VPos::Top,
            )?;
        }

        // Latitudes along the left axis
        for lat in latitude_ticks(y_axis.min, y_axis.max) {
            let y = map_y(lat);
            canvas.polyline_px(vec![to_px(left - tick_len, y), to_px(left, y)], tick_style)?;
            canvas.text_px(
                &latitude_label(lat),
                to_px(left - tick_len - tick_pad, y),
                TICK_LABEL_PT,
                HPos::Right,
                VPos::Center,
            )?;
        }

        draw_titles(canvas, &rect, &panel.titles, layout.side_title_pt)?;
        draw_colorbar(canvas, &layout.colorbar_rect(index), &panel.cmap, &panel.scale, true)
    }
}

impl Figure for AnnualCycleZonalMeanFigure<'_> {
    fn page(&self) -> PageSize {
        self.page
    }

    fn layout(&self) -> &PanelLayout {
        &ZONAL_MEAN_LAYOUT
    }

    fn draw<DB: DrawingBackend>(&self, canvas: &Canvas<'_, DB>) -> Result<()> {
        for (index, panel) in self.panels.iter().enumerate() {
            self.draw_panel(canvas, index, panel)?;
        }
        draw_suptitle(canvas, &self.main_title, self.layout().suptitle_y)
    }
}

/// Render the annual-cycle zonal-mean comparison figure and save it.
///
/// Returns the paths of every file written.
pub fn plot_annual_cycle_zonal_mean(
    reference: &GriddedField,
    test: &GriddedField,
    diff: &GriddedField,
    metrics: &MetricsDict,
    params: &PlotParameters,
) -> Result<Vec<PathBuf>> {
    params.validate()?;
    debug!(
        "Zonal mean metrics: test {:?}, ref {:?}, diff {:?}, misc {:?}",
        metrics.test, metrics.reference, metrics.diff, metrics.misc
    );

    let figure = AnnualCycleZonalMeanFigure::new(reference, test, diff, params)?;
    save_figure(&figure, params)
}

/// Linear mapping of a coordinate range onto `[0, 1]`
struct AxisMap {
    min: f64,
    max: f64,
}

impl AxisMap {
    fn new(edges: &[f64]) -> Self {
        let min = edges.iter().copied().fold(f64::INFINITY, f64::min);
        let max = edges.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Self { min, max }
    }

    fn fraction(&self, v: f64) -> f64 {
        let span = self.max - self.min;
        if span.abs() < f64::EPSILON {
            0.5
        } else {
            (v - self.min) / span
        }
    }
}

fn to_px(x: f64, y: f64) -> (i32, i32) {
    (x.round() as i32, y.round() as i32)
}

/// First letter of the month at `index` (0 = January), repeating yearly.
pub fn month_initial(index: usize) -> String {
    Month::try_from((index % 12) as u8 + 1)
        .map(|m| m.name()[..1].to_string())
        .unwrap_or_default()
}

/// Latitude tick label: `30°N`, `0°`, `45°S`.
pub fn latitude_label(lat: f64) -> String {
    if lat.abs() < 1e-9 {
        return "0°".to_string();
    }
    let magnitude = lat.abs();
    let number = if (magnitude - magnitude.round()).abs() < 1e-9 {
        format!("{:.0}", magnitude)
    } else {
        format!("{:.1}", magnitude)
    };
    let hemisphere = if lat > 0.0 { 'N' } else { 'S' };
    format!("{}°{}", number, hemisphere)
}

/// Latitude ticks at multiples of a round step, at most six intervals.
pub fn latitude_ticks(min: f64, max: f64) -> Vec<f64> {
    let span = max - min;
    if !(span > 0.0) {
        return vec![min];
    }
    let step = [10.0, 15.0, 20.0, 30.0, 45.0, 60.0, 90.0]
        .into_iter()
        .find(|step| span / step <= 6.0 && span >= *step)
        .unwrap_or_else(|| nice_step(span, 6));

    let first = (min / step).ceil() as i64;
    let last = (max / step).floor() as i64;
    (first..=last).map(|k| k as f64 * step).collect()
}
