//! Polar stereographic figure
//!
//! Three circular map panels (test, reference, difference) with filled
//! contours, gridlines, optional coastlines, a colorbar and a statistics box.
//! Filled contours are produced by inverse-projecting blocks of panel pixels,
//! sampling the field bilinearly and colouring each block by its level band.

use super::canvas::Canvas;
use super::colorbar::{draw_colorbar, ColorScale};
use super::{draw_stats, draw_suptitle, draw_titles, Figure, PanelTitles};
use crate::coastline::Coastlines;
use crate::colormap::{get_colormap, Colormap};
use crate::errors::Result;
use crate::field::GriddedField;
use crate::layout::{PageRect, PageSize, PanelLayout, POLAR_LAYOUT};
use crate::metrics::{MetricsDict, PanelStats};
use crate::output::save_figure;
use crate::parameters::PlotParameters;
use crate::projection::{Pole, PolarStereo};
use plotters::prelude::*;
use rayon::prelude::*;
use std::f64::consts::TAU;
use std::path::PathBuf;
use tracing::{debug, info};

/// Edge length of the sampled pixel blocks
const RASTER_STEP_PX: f64 = 2.0;

/// At most this many automatic level intervals
const AUTO_LEVEL_INTERVALS: usize = 8;

const PARALLEL_SPACING: f64 = 10.0;
const MERIDIAN_SPACING: f64 = 60.0;
const BOUNDARY_VERTICES: usize = 100;

const GRIDLINE_PT: f64 = 0.5;
const COASTLINE_PT: f64 = 0.3;

struct PolarPanel {
    field: GriddedField,
    cmap: Colormap,
    scale: ColorScale,
    titles: PanelTitles,
    stats: PanelStats,
}

/// Test, reference and difference maps around one pole
pub struct PolarFigure {
    page: PageSize,
    projection: PolarStereo,
    /// Panels without enough valid data are left blank
    panels: [Option<PolarPanel>; 3],
    coastlines: Option<Coastlines>,
    main_title: String,
}

impl PolarFigure {
    pub fn new(
        reference: &GriddedField,
        test: &GriddedField,
        diff: &GriddedField,
        metrics: &MetricsDict,
        params: &PlotParameters,
    ) -> Result<Self> {
        let pole = Pole::from_region(&params.var_region)?;
        let projection = PolarStereo::new(pole);
        let cmap_dir = params.colormap_dir.as_deref();
        let [test_stats, ref_stats, diff_stats] = metrics.panel_stats();

        let panel = |field: &GriddedField,
                     clevels: &[f64],
                     cmap: &str,
                     titles: PanelTitles,
                     stats: PanelStats|
         -> Result<Option<PolarPanel>> {
            if field.valid_count() <= 1 {
                info!("Skipping panel for '{}': not enough valid data", field.name);
                return Ok(None);
            }
            Ok(Some(PolarPanel {
                field: field.with_cyclic_longitude(),
                cmap: get_colormap(cmap, cmap_dir)?,
                scale: ColorScale::levels_or_auto(
                    clevels,
                    field.finite_range(),
                    AUTO_LEVEL_INTERVALS,
                )?,
                titles,
                stats,
            }))
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
                test_stats,
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
                ref_stats,
            )?,
            panel(
                diff,
                &params.diff_levels,
                &params.diff_colormap,
                PanelTitles::new(None, Some(params.diff_title.as_str()), Some(test.units.as_str())),
                diff_stats,
            )?,
        ];

        let coastlines = match &params.coastline_file {
            Some(path) => Some(Coastlines::from_file(path)?),
            None => None,
        };

        debug!("Polar figure around {:?} pole, boundary at {}°", pole, projection.boundary_lat());

        Ok(Self {
            page: PageSize::new(params.figsize, params.dpi),
            projection,
            panels,
            coastlines,
            main_title: params.main_title.clone(),
        })
    }

    pub fn pole(&self) -> Pole {
        self.projection.pole
    }

    /// Number of panels that will be drawn.
    pub fn drawn_panels(&self) -> usize {
        self.panels.iter().filter(|p| p.is_some()).count()
    }

    fn draw_panel<DB: DrawingBackend>(
        &self,
        canvas: &Canvas<'_, DB>,
        index: usize,
        panel: &PolarPanel,
    ) -> Result<()> {
        let layout = self.layout();
        let rect = layout.panels[index];
        let axes = AxesMap::new(canvas, &rect);

        self.draw_filled_contours(canvas, &axes, panel)?;
        self.draw_gridlines(canvas, &axes)?;
        if let Some(coastlines) = &self.coastlines {
            self.draw_coastlines(canvas, &axes, coastlines)?;
        }

        // Circular boundary
        let boundary: Vec<(i32, i32)> = (0..BOUNDARY_VERTICES)
            .map(|k| {
                let theta = TAU * k as f64 / (BOUNDARY_VERTICES - 1) as f64;
                axes.to_px(0.5 + 0.5 * theta.sin(), 0.5 + 0.5 * theta.cos())
            })
            .collect();
        canvas.polyline_px(boundary, BLACK.stroke_width(1))?;

        draw_titles(canvas, &rect, &panel.titles, layout.side_title_pt)?;
        draw_colorbar(canvas, &layout.colorbar_rect(index), &panel.cmap, &panel.scale, false)?;
        if let Some(placement) = &layout.stats {
            draw_stats(canvas, &rect, placement, &panel.stats, layout.side_title_pt)?;
        }
        Ok(())
    }

    fn draw_filled_contours<DB: DrawingBackend>(
        &self,
        canvas: &Canvas<'_, DB>,
        axes: &AxesMap,
        panel: &PolarPanel,
    ) -> Result<()> {
        let cols = (axes.width / RASTER_STEP_PX).ceil().max(1.0) as usize;
        let rows = (axes.height / RASTER_STEP_PX).ceil().max(1.0) as usize;
        let projection = self.projection;

        let colors: Vec<Vec<Option<RGBColor>>> = (0..rows)
            .into_par_iter()
            .map(|row| {
                let v = 1.0 - (row as f64 + 0.5) / rows as f64;
                (0..cols)
                    .map(|col| {
                        let u = (col as f64 + 0.5) / cols as f64;
                        if !projection.contains(u, v) {
                            return None;
                        }
                        let (lon, lat) = projection.inverse(u, v);
                        let value = panel.field.sample_lon_lat(lon, lat);
                        panel.scale.color(&panel.cmap, value)
                    })
                    .collect()
            })
            .collect();

        for (row, row_colors) in colors.iter().enumerate() {
            let v0 = 1.0 - row as f64 / rows as f64;
            let v1 = 1.0 - (row + 1) as f64 / rows as f64;
            for (col, color) in row_colors.iter().enumerate() {
                if let Some(color) = color {
                    let u0 = col as f64 / cols as f64;
                    let u1 = (col + 1) as f64 / cols as f64;
                    canvas.fill_rect_px(axes.to_px(u0, v0), axes.to_px(u1, v1), *color)?;
                }
            }
        }
        Ok(())
    }

    fn draw_gridlines<DB: DrawingBackend>(
        &self,
        canvas: &Canvas<'_, DB>,
        axes: &AxesMap,
    ) -> Result<()> {
        let style = RGBColor(128, 128, 128)
            .mix(0.5)
            .stroke_width(canvas.line_width(GRIDLINE_PT));
        let boundary = self.projection.boundary_lat();
        let pole_lat = match self.projection.pole {
            Pole::North => 90.0,
            Pole::South => -90.0,
        };

        for lat in parallels(boundary, pole_lat) {
            let points = (0..=72)
                .map(|k| {
                    let (u, v) = self.projection.project(-180.0 + 5.0 * k as f64, lat);
                    axes.to_px(u, v)
                })
                .collect();
            canvas.polyline_px(points, style)?;
        }

        let meridians = (360.0 / MERIDIAN_SPACING) as usize;
        for k in 0..meridians {
            let lon = -180.0 + MERIDIAN_SPACING * k as f64;
            let (u0, v0) = self.projection.project(lon, boundary);
            let (u1, v1) = self.projection.project(lon, pole_lat);
            canvas.polyline_px(vec![axes.to_px(u0, v0), axes.to_px(u1, v1)], style)?;
        }
        Ok(())
    }

    fn draw_coastlines<DB: DrawingBackend>(
        &self,
        canvas: &Canvas<'_, DB>,
        axes: &AxesMap,
        coastlines: &Coastlines,
    ) -> Result<()> {
        let style = BLACK.stroke_width(canvas.line_width(COASTLINE_PT));
        for segment in &coastlines.segments {
            let mut run: Vec<(i32, i32)> = Vec::new();
            for &(lon, lat) in segment {
                let (u, v) = self.projection.project(lon, lat);
                if lat.is_finite() && self.projection.contains(u, v) {
                    run.push(axes.to_px(u, v));
                } else if !run.is_empty() {
                    canvas.polyline_px(std::mem::take(&mut run), style)?;
                }
            }
            canvas.polyline_px(run, style)?;
        }
        Ok(())
    }
}

impl Figure for PolarFigure {
    fn page(&self) -> PageSize {
        self.page
    }

    fn layout(&self) -> &PanelLayout {
        &POLAR_LAYOUT
    }

    fn draw<DB: DrawingBackend>(&self, canvas: &Canvas<'_, DB>) -> Result<()> {
        for (index, panel) in self.panels.iter().enumerate() {
            if let Some(panel) = panel {
                self.draw_panel(canvas, index, panel)?;
            }
        }
        draw_suptitle(canvas, &self.main_title, self.layout().suptitle_y)
    }
}

/// Render the polar comparison figure and save it.
///
/// The pole is taken from `params.var_region`. Returns the paths of every
/// file written.
pub fn plot_polar(
    reference: &GriddedField,
    test: &GriddedField,
    diff: &GriddedField,
    metrics: &MetricsDict,
    params: &PlotParameters,
) -> Result<Vec<PathBuf>> {
    params.validate()?;
    let figure = PolarFigure::new(reference, test, diff, metrics, params)?;
    save_figure(&figure, params)
}

/// Latitudes of the parallels drawn between the boundary and the pole.
pub fn parallels(boundary_lat: f64, pole_lat: f64) -> Vec<f64> {
    let (lo, hi) = if boundary_lat < pole_lat {
        (boundary_lat, pole_lat)
    } else {
        (pole_lat, boundary_lat)
    };
    let first = (lo / PARALLEL_SPACING).floor() as i64 + 1;
    let last = (hi / PARALLEL_SPACING).ceil() as i64 - 1;
    (first..=last)
        .map(|k| k as f64 * PARALLEL_SPACING)
        .filter(|&lat| lat > lo && lat < hi)
        .collect()
}

/// Panel axes coordinates (`[0, 1]²`, origin bottom-left) to pixels
struct AxesMap {
    left: f64,
    bottom: f64,
    width: f64,
    height: f64,
}

impl AxesMap {
    fn new<DB: DrawingBackend>(canvas: &Canvas<'_, DB>, rect: &PageRect) -> Self {
        let (left, top) = canvas.px_f(rect.x, rect.top());
        let (right, bottom) = canvas.px_f(rect.right(), rect.y);
        Self {
            left,
            bottom,
            width: right - left,
            height: bottom - top,
        }
    }

    fn to_px(&self, u: f64, v: f64) -> (i32, i32) {
        (
            (self.left + u * self.width).round() as i32,
            (self.bottom - v * self.height).round() as i32,
        )
    }
}
