//! Saving figures: whole-page images and per-panel crops
//!
//! For every entry of `output_format` the whole figure is written to
//! `<dir>/<output_file>.<ext>`. For every entry of `output_format_subplot`
//! each panel is written to `<dir>/<output_file>.<i>.<ext>`, cropped to the
//! panel plus the figure's border padding.

use crate::errors::{Result, RuNeDiagError};
use crate::layout::{subplot_extent, PageFrame};
use crate::parameters::{get_output_dir, PlotParameters};
use crate::render::{Canvas, Figure};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::info;

/// Image formats the rendering backends can write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    Png,
    Svg,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Svg => "svg",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = RuNeDiagError;

    /// Accepts `png`, `PNG`, `.svg` or even `figure.png`: only the text after
    /// the last dot counts, case-insensitively.
    fn from_str(s: &str) -> Result<Self> {
        let lowered = s.to_lowercase();
        let ext = lowered.rsplit('.').next().unwrap_or_default();
        match ext {
            "png" => Ok(OutputFormat::Png),
            "svg" => Ok(OutputFormat::Svg),
            _ => Err(RuNeDiagError::UnsupportedFormat {
                format: s.to_string(),
            }),
        }
    }
}

/// Parse a list of format names, failing on the first unsupported one.
pub fn parse_formats(formats: &[String]) -> Result<Vec<OutputFormat>> {
    formats.iter().map(|f| f.parse()).collect()
}

/// Render `figure` through `frame` into a single file.
pub fn render_to_file<F: Figure>(
    figure: &F,
    frame: PageFrame,
    format: OutputFormat,
    path: &Path,
) -> Result<()> {
    let size = frame.pixel_size();
    match format {
        OutputFormat::Png => {
            let root = BitMapBackend::new(path, size).into_drawing_area();
            render_on(&root, figure, frame)
        }
        OutputFormat::Svg => {
            let root = SVGBackend::new(path, size).into_drawing_area();
            render_on(&root, figure, frame)
        }
    }
}

fn render_on<DB: DrawingBackend, F: Figure>(
    root: &DrawingArea<DB, Shift>,
    figure: &F,
    frame: PageFrame,
) -> Result<()> {
    root.fill(&WHITE)?;
    let canvas = Canvas::new(root, frame);
    figure.draw(&canvas)?;
    root.present()?;
    Ok(())
}

/// Write the whole figure and any requested panel crops.
///
/// Returns every path written, whole figures first.
pub fn save_figure<F: Figure>(figure: &F, params: &PlotParameters) -> Result<Vec<PathBuf>> {
    let formats = parse_formats(&params.output_format)?;
    let subplot_formats = parse_formats(&params.output_format_subplot)?;
    let dir = get_output_dir(&params.current_set, params)?;
    let page = figure.page();
    let mut written = Vec::new();

    for format in formats {
        let path = dir.join(format!("{}.{}", params.output_file, format.extension()));
        render_to_file(figure, PageFrame::full(page), format, &path)?;
        info!("Plot saved in: {}", path.display());
        written.push(path);
    }

    let layout = figure.layout();
    for format in subplot_formats {
        for (i, panel) in layout.panels.iter().enumerate() {
            let extent = subplot_extent(panel, &layout.border, &page);
            let path = dir.join(format!("{}.{}.{}", params.output_file, i, format.extension()));
            render_to_file(figure, PageFrame::cropped(page, extent), format, &path)?;
            info!("Sub-plot saved in: {}", path.display());
            written.push(path);
        }
    }

    Ok(written)
}
