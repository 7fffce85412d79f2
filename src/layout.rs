//! Figure geometry in page coordinates
//!
//! Page coordinates are fractions of the figure, origin bottom-left. A
//! [`PageFrame`] maps them to pixels of a drawing target, which is either the
//! whole figure or the crop window of one panel.

/// Rectangle in page coordinates: left, bottom, width, height
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageRect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl PageRect {
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    pub fn top(&self) -> f64 {
        self.y + self.h
    }

    /// Rectangle placed relative to this one's origin.
    pub fn offset(&self, dx: f64, dy: f64, w: f64, h: f64) -> Self {
        Self::new(self.x + dx, self.y + dy, w, h)
    }
}

/// Padding added around a panel when cropping it: left, bottom, right, top
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Border {
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
    pub top: f64,
}

/// Anchors of the statistics text relative to a panel's origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatsPlacement {
    /// Left edge of the `Max`/`Mean`/`Min` names
    pub labels: (f64, f64),
    /// Right edge of their values
    pub values: (f64, f64),
    /// Left edge of the `RMSE`/`CORR` names
    pub comparison_labels: (f64, f64),
    /// Right edge of their values
    pub comparison_values: (f64, f64),
}

/// Fixed geometry of one figure type
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelLayout {
    pub panels: [PageRect; 3],
    /// Colorbar position relative to its panel's origin, plus its size
    pub colorbar: PageRect,
    pub border: Border,
    pub suptitle_y: f64,
    /// Statistics text anchors, `None` when the figure has no stats boxes
    pub stats: Option<StatsPlacement>,
    pub side_title_pt: f64,
}

pub const TITLE_PT: f64 = 11.5;
pub const SUPTITLE_PT: f64 = 18.0;
pub const TICK_LABEL_PT: f64 = 8.0;
pub const COLORBAR_LABEL_PT: f64 = 9.0;

pub const ZONAL_MEAN_LAYOUT: PanelLayout = PanelLayout {
    panels: [
        PageRect::new(0.1691, 0.6810, 0.6465, 0.2258),
        PageRect::new(0.1691, 0.3961, 0.6465, 0.2258),
        PageRect::new(0.1691, 0.1112, 0.6465, 0.2258),
    ],
    colorbar: PageRect::new(0.6635, 0.0215, 0.0326, 0.1792),
    border: Border {
        left: -0.06,
        bottom: -0.03,
        right: 0.13,
        top: 0.03,
    },
    suptitle_y: 0.96,
    stats: None,
    side_title_pt: 9.5,
};

pub const POLAR_LAYOUT: PanelLayout = PanelLayout {
    panels: [
        PageRect::new(0.27, 0.65, 0.3235, 0.25),
        PageRect::new(0.27, 0.35, 0.3235, 0.25),
        PageRect::new(0.27, 0.05, 0.3235, 0.25),
    ],
    colorbar: PageRect::new(0.35, 0.0354, 0.0326, 0.1792),
    border: Border {
        left: -0.02,
        bottom: -0.01,
        right: 0.14,
        top: 0.04,
    },
    suptitle_y: 0.97,
    stats: Some(StatsPlacement {
        labels: (0.35, 0.225),
        values: (0.45, 0.225),
        comparison_labels: (0.35, 0.0),
        comparison_values: (0.45, 0.0),
    }),
    side_title_pt: 9.0,
};

impl PanelLayout {
    pub fn colorbar_rect(&self, panel: usize) -> PageRect {
        let p = &self.panels[panel];
        p.offset(self.colorbar.x, self.colorbar.y, self.colorbar.w, self.colorbar.h)
    }
}

/// Figure size in inches and resolution
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width_in: f64,
    pub height_in: f64,
    pub dpi: f64,
}

impl PageSize {
    pub fn new(figsize: [f64; 2], dpi: f64) -> Self {
        Self {
            width_in: figsize[0],
            height_in: figsize[1],
            dpi,
        }
    }

    pub fn pixel_size(&self) -> (u32, u32) {
        (
            (self.width_in * self.dpi).round().max(1.0) as u32,
            (self.height_in * self.dpi).round().max(1.0) as u32,
        )
    }
}

/// Crop window of one panel in inches: `[x0, y0, x1, y1]`, origin bottom-left.
pub fn subplot_extent(panel: &PageRect, border: &Border, page: &PageSize) -> [f64; 4] {
    [
        (panel.x + border.left) * page.width_in,
        (panel.y + border.bottom) * page.height_in,
        (panel.right() + border.right) * page.width_in,
        (panel.top() + border.top) * page.height_in,
    ]
}

/// Mapping from page coordinates to target pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageFrame {
    pub page: PageSize,
    /// Window onto the page in inches: `[x0, y0, x1, y1]`
    window: [f64; 4],
}

impl PageFrame {
    /// Frame drawing the whole figure.
    pub fn full(page: PageSize) -> Self {
        Self {
            page,
            window: [0.0, 0.0, page.width_in, page.height_in],
        }
    }

    /// Frame drawing only the given window (in inches) of the figure.
    pub fn cropped(page: PageSize, window: [f64; 4]) -> Self {
        Self { page, window }
    }

    /// Size of the drawing target in pixels.
    pub fn pixel_size(&self) -> (u32, u32) {
        let w = (self.window[2] - self.window[0]) * self.page.dpi;
        let h = (self.window[3] - self.window[1]) * self.page.dpi;
        (w.round().max(1.0) as u32, h.round().max(1.0) as u32)
    }

    /// Page coordinates to fractional target pixels, y pointing down.
    pub fn to_pixel_f(&self, x: f64, y: f64) -> (f64, f64) {
        (
            (x * self.page.width_in - self.window[0]) * self.page.dpi,
            (self.window[3] - y * self.page.height_in) * self.page.dpi,
        )
    }

    pub fn to_pixel(&self, x: f64, y: f64) -> (i32, i32) {
        let (px, py) = self.to_pixel_f(x, y);
        (px.round() as i32, py.round() as i32)
    }

    /// Typographic points to pixels.
    pub fn points(&self, pt: f64) -> f64 {
        pt * self.page.dpi / 72.0
    }
}
