//! Figure rendering
//!
//! Each figure type implements [`Figure`]: it knows its page size and panel
//! layout and can draw itself onto a [`Canvas`]. Saving (whole figure and
//! per-panel crops, PNG or SVG) is handled generically in [`crate::output`].
//!
//! - [`zonal_mean`]: annual-cycle zonal-mean pseudocolor panels
//! - [`polar`]: polar stereographic filled-contour panels

pub mod canvas;
pub mod colorbar;
pub mod polar;
pub mod zonal_mean;

pub use canvas::Canvas;
pub use colorbar::{draw_colorbar, ColorScale, ColorbarTicks, LabelAlign};
pub use polar::{plot_polar, PolarFigure};
pub use zonal_mean::{plot_annual_cycle_zonal_mean, AnnualCycleZonalMeanFigure};

use crate::errors::Result;
use crate::layout::{PageRect, PageSize, PanelLayout, StatsPlacement, SUPTITLE_PT, TITLE_PT};
use crate::metrics::PanelStats;
use plotters::prelude::DrawingBackend;
use plotters::style::text_anchor::{HPos, VPos};

/// Gap between the top of a panel and its titles, in points
const TITLE_PAD_PT: f64 = 6.0;

/// A renderable multi-panel figure
pub trait Figure {
    fn page(&self) -> PageSize;

    fn layout(&self) -> &PanelLayout;

    /// Draw the complete figure. The canvas may show only part of the page.
    fn draw<DB: DrawingBackend>(&self, canvas: &Canvas<'_, DB>) -> Result<()>;
}

/// Left, centre and right titles of a panel
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PanelTitles {
    pub left: Option<String>,
    pub center: Option<String>,
    pub right: Option<String>,
}

impl PanelTitles {
    /// Empty strings are treated as absent titles.
    pub fn new(left: Option<&str>, center: Option<&str>, right: Option<&str>) -> Self {
        let keep = |s: Option<&str>| s.filter(|t| !t.is_empty()).map(str::to_string);
        Self {
            left: keep(left),
            center: keep(center),
            right: keep(right),
        }
    }
}

pub(crate) fn draw_titles<DB: DrawingBackend>(
    canvas: &Canvas<'_, DB>,
    rect: &PageRect,
    titles: &PanelTitles,
    side_title_pt: f64,
) -> Result<()> {
    let (left, top) = canvas.px_f(rect.x, rect.top());
    let (right, _) = canvas.px_f(rect.right(), rect.y);
    let baseline = (top - canvas.points(TITLE_PAD_PT)).round() as i32;

    if let Some(title) = &titles.left {
        canvas.text_px(title, (left.round() as i32, baseline), side_title_pt, HPos::Left, VPos::Bottom)?;
    }
    if let Some(title) = &titles.center {
        let centre = ((left + right) * 0.5).round() as i32;
        canvas.text_px(title, (centre, baseline), TITLE_PT, HPos::Center, VPos::Bottom)?;
    }
    if let Some(title) = &titles.right {
        canvas.text_px(title, (right.round() as i32, baseline), side_title_pt, HPos::Right, VPos::Bottom)?;
    }
    Ok(())
}

pub(crate) fn draw_suptitle<DB: DrawingBackend>(
    canvas: &Canvas<'_, DB>,
    title: &str,
    y: f64,
) -> Result<()> {
    canvas.text(title, (0.5, y), SUPTITLE_PT, HPos::Center, VPos::Top)
}

/// Max/Mean/Min names and values, plus RMSE/CORR when present.
pub(crate) fn draw_stats<DB: DrawingBackend>(
    canvas: &Canvas<'_, DB>,
    rect: &PageRect,
    placement: &StatsPlacement,
    stats: &PanelStats,
    size_pt: f64,
) -> Result<()> {
    let at = |(dx, dy): (f64, f64)| (rect.x + dx, rect.y + dy);

    canvas.text_lines(&["Max", "Mean", "Min"], at(placement.labels), size_pt, HPos::Left)?;
    canvas.text_lines(&stats.summary_lines(), at(placement.values), size_pt, HPos::Right)?;

    if let Some(values) = stats.comparison_lines() {
        canvas.text_lines(&["RMSE", "CORR"], at(placement.comparison_labels), size_pt, HPos::Left)?;
        canvas.text_lines(&values, at(placement.comparison_values), size_pt, HPos::Right)?;
    }
    Ok(())
}
