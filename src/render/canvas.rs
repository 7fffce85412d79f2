//! Drawing primitives in page coordinates over any plotters backend

use crate::errors::Result;
use crate::layout::PageFrame;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

const FONT_FAMILY: &str = "sans-serif";

/// Line spacing of multi-line text, as a multiple of the font size
const LINE_SPACING: f64 = 1.2;

/// A drawing area together with the page-to-pixel mapping of its target
pub struct Canvas<'a, DB: DrawingBackend> {
    area: &'a DrawingArea<DB, Shift>,
    pub frame: PageFrame,
}

impl<'a, DB: DrawingBackend> Canvas<'a, DB> {
    pub fn new(area: &'a DrawingArea<DB, Shift>, frame: PageFrame) -> Self {
        Self { area, frame }
    }

    /// Page coordinates to pixels.
    pub fn px(&self, x: f64, y: f64) -> (i32, i32) {
        self.frame.to_pixel(x, y)
    }

    /// Page coordinates to fractional pixels.
    pub fn px_f(&self, x: f64, y: f64) -> (f64, f64) {
        self.frame.to_pixel_f(x, y)
    }

    /// Typographic points to pixels.
    pub fn points(&self, pt: f64) -> f64 {
        self.frame.points(pt)
    }

    /// Line width in whole pixels for a width in points, at least one pixel.
    pub fn line_width(&self, pt: f64) -> u32 {
        self.points(pt).round().max(1.0) as u32
    }

    pub fn fill_rect_px(&self, a: (i32, i32), b: (i32, i32), color: RGBColor) -> Result<()> {
        let upper_left = (a.0.min(b.0), a.1.min(b.1));
        let lower_right = (a.0.max(b.0), a.1.max(b.1));
        self.area
            .draw(&Rectangle::new([upper_left, lower_right], color.filled()))?;
        Ok(())
    }

    pub fn stroke_rect_px(&self, a: (i32, i32), b: (i32, i32), style: ShapeStyle) -> Result<()> {
        let upper_left = (a.0.min(b.0), a.1.min(b.1));
        let lower_right = (a.0.max(b.0), a.1.max(b.1));
        self.area.draw(&Rectangle::new([upper_left, lower_right], style))?;
        Ok(())
    }

    pub fn fill_polygon_px(&self, points: Vec<(i32, i32)>, color: RGBColor) -> Result<()> {
        self.area.draw(&Polygon::new(points, color.filled()))?;
        Ok(())
    }

    pub fn polyline_px(&self, points: Vec<(i32, i32)>, style: ShapeStyle) -> Result<()> {
        if points.len() < 2 {
            return Ok(());
        }
        self.area.draw(&PathElement::new(points, style))?;
        Ok(())
    }

    /// Draw a single line of text anchored at a pixel position.
    pub fn text_px(
        &self,
        text: &str,
        at: (i32, i32),
        size_pt: f64,
        h: HPos,
        v: VPos,
    ) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        let style = (FONT_FAMILY, self.points(size_pt))
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(h, v));
        self.area.draw(&Text::new(text.to_string(), at, style))?;
        Ok(())
    }

    /// Draw a single line of text anchored at page coordinates.
    pub fn text(&self, text: &str, at: (f64, f64), size_pt: f64, h: HPos, v: VPos) -> Result<()> {
        self.text_px(text, self.px(at.0, at.1), size_pt, h, v)
    }

    /// Draw stacked lines whose last line sits on the baseline at `at`.
    pub fn text_lines<S: AsRef<str>>(
        &self,
        lines: &[S],
        at: (f64, f64),
        size_pt: f64,
        h: HPos,
    ) -> Result<()> {
        let (x, y) = self.px_f(at.0, at.1);
        let spacing = self.points(size_pt) * LINE_SPACING;
        let count = lines.len();
        for (i, line) in lines.iter().enumerate() {
            let line_y = y - spacing * (count - 1 - i) as f64;
            self.text_px(
                line.as_ref(),
                (x.round() as i32, line_y.round() as i32),
                size_pt,
                h,
                VPos::Bottom,
            )?;
        }
        Ok(())
    }
}
