//! Colormap lookup
//!
//! Colormaps are either one of the built-in tables below or a `.rgb` text file
//! with one `R G B` triplet per line (0-1 floats or 0-255 integers).

use crate::errors::{Result, RuNeDiagError};
use plotters::style::RGBColor;
use std::fs;
use std::path::{Path, PathBuf};

/// A named, linearly interpolated colormap
#[derive(Debug, Clone, PartialEq)]
pub struct Colormap {
    pub name: String,
    stops: Vec<[f64; 3]>,
}

const VIRIDIS: &[[u8; 3]] = &[
    [68, 1, 84],
    [72, 40, 120],
    [62, 73, 137],
    [49, 104, 142],
    [38, 130, 142],
    [31, 158, 137],
    [53, 183, 121],
    [110, 206, 88],
    [181, 222, 43],
    [253, 231, 37],
];

const CET_RAINBOW: &[[u8; 3]] = &[
    [0, 47, 245],
    [0, 111, 223],
    [0, 150, 167],
    [30, 172, 97],
    [114, 187, 35],
    [181, 196, 31],
    [238, 196, 35],
    [252, 154, 30],
    [244, 98, 22],
    [227, 33, 12],
];

const DIVERGING_BWR: &[[u8; 3]] = &[
    [33, 102, 172],
    [103, 169, 207],
    [209, 229, 240],
    [255, 255, 255],
    [253, 219, 199],
    [239, 138, 98],
    [178, 24, 43],
];

const RDBU: &[[u8; 3]] = &[
    [103, 0, 31],
    [178, 24, 43],
    [214, 96, 77],
    [244, 165, 130],
    [253, 219, 199],
    [247, 247, 247],
    [209, 229, 240],
    [146, 197, 222],
    [67, 147, 195],
    [33, 102, 172],
    [5, 48, 97],
];

const BRBG: &[[u8; 3]] = &[
    [84, 48, 5],
    [140, 81, 10],
    [191, 129, 45],
    [223, 194, 125],
    [246, 232, 195],
    [245, 245, 245],
    [199, 234, 229],
    [128, 205, 193],
    [53, 151, 143],
    [1, 102, 94],
    [0, 60, 48],
];

const COOLWARM: &[[u8; 3]] = &[
    [59, 76, 192],
    [98, 130, 234],
    [141, 176, 254],
    [184, 208, 249],
    [221, 221, 221],
    [245, 196, 173],
    [244, 154, 123],
    [222, 96, 77],
    [180, 4, 38],
];

const JET: &[[u8; 3]] = &[
    [0, 0, 128],
    [0, 0, 255],
    [0, 128, 255],
    [0, 255, 255],
    [128, 255, 128],
    [255, 255, 0],
    [255, 128, 0],
    [255, 0, 0],
    [128, 0, 0],
];

const GRAY: &[[u8; 3]] = &[[0, 0, 0], [255, 255, 255]];

fn builtin(name: &str) -> Option<&'static [[u8; 3]]> {
    match name {
        "viridis" => Some(VIRIDIS),
        "cet_rainbow" => Some(CET_RAINBOW),
        "diverging_bwr" => Some(DIVERGING_BWR),
        "RdBu" => Some(RDBU),
        "BrBG" => Some(BRBG),
        "coolwarm" => Some(COOLWARM),
        "jet" => Some(JET),
        "gray" | "grey" => Some(GRAY),
        _ => None,
    }
}

impl Colormap {
    /// Build a colormap from 0-1 RGB stops.
    pub fn from_stops(name: impl Into<String>, stops: Vec<[f64; 3]>) -> Result<Self> {
        let name = name.into();
        if stops.len() < 2 {
            return Err(RuNeDiagError::Colormap {
                name,
                message: format!("needs at least 2 colours, got {}", stops.len()),
            });
        }
        Ok(Self { name, stops })
    }

    fn from_table(name: &str, table: &[[u8; 3]], reversed: bool) -> Self {
        let mut stops: Vec<[f64; 3]> = table
            .iter()
            .map(|c| [c[0] as f64 / 255.0, c[1] as f64 / 255.0, c[2] as f64 / 255.0])
            .collect();
        if reversed {
            stops.reverse();
        }
        Self {
            name: name.to_string(),
            stops,
        }
    }

    /// Parse the contents of a `.rgb` colormap file.
    pub fn parse_rgb(name: &str, text: &str) -> Result<Self> {
        let mut stops = Vec::new();
        for (line_no, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let values: Vec<f64> = line
                .split(|c: char| c.is_whitespace() || c == ',')
                .filter(|s| !s.is_empty())
                .map(|s| s.parse::<f64>())
                .collect::<std::result::Result<_, _>>()
                .map_err(|e| RuNeDiagError::Colormap {
                    name: name.to_string(),
                    message: format!("line {}: {}", line_no + 1, e),
                })?;
            match values.as_slice() {
                [r, g, b] => stops.push([*r, *g, *b]),
                _ => {
                    return Err(RuNeDiagError::Colormap {
                        name: name.to_string(),
                        message: format!(
                            "line {}: expected 3 values, found {}",
                            line_no + 1,
                            values.len()
                        ),
                    })
                }
            }
        }

        // Integer tables are 0-255
        if stops.iter().flatten().any(|&v| v > 1.0) {
            for stop in &mut stops {
                for v in stop.iter_mut() {
                    *v /= 255.0;
                }
            }
        }
        for stop in &mut stops {
            for v in stop.iter_mut() {
                *v = v.clamp(0.0, 1.0);
            }
        }

        Self::from_stops(name, stops)
    }

    /// Colour at `t` in `[0, 1]`; values outside are clamped.
    pub fn at(&self, t: f64) -> RGBColor {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let segments = (self.stops.len() - 1) as f64;
        let pos = t * segments;
        let lower = (pos.floor() as usize).min(self.stops.len() - 2);
        let frac = pos - lower as f64;
        let (a, b) = (self.stops[lower], self.stops[lower + 1]);
        let channel = |i: usize| ((a[i] + (b[i] - a[i]) * frac) * 255.0).round() as u8;
        RGBColor(channel(0), channel(1), channel(2))
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}

/// Resolve a colormap by name.
///
/// Names containing `.rgb` are read from disk: the name itself if it is an
/// existing path, otherwise the file of that name under `colormap_dir`. Any
/// other name is looked up in the built-in table, where a trailing `_r`
/// reverses the map.
pub fn get_colormap(name: &str, colormap_dir: Option<&Path>) -> Result<Colormap> {
    if name.contains(".rgb") {
        let direct = PathBuf::from(name);
        let path = if direct.exists() {
            direct
        } else if let Some(dir) = colormap_dir.map(|d| d.join(name)).filter(|p| p.exists()) {
            dir
        } else {
            return Err(RuNeDiagError::Colormap {
                name: name.to_string(),
                message: "colormap file not found".to_string(),
            });
        };
        let text = fs::read_to_string(&path)?;
        return Colormap::parse_rgb(name, &text);
    }

    if let Some(table) = builtin(name) {
        return Ok(Colormap::from_table(name, table, false));
    }
    if let Some(table) = name.strip_suffix("_r").and_then(builtin) {
        return Ok(Colormap::from_table(name, table, true));
    }

    Err(RuNeDiagError::Colormap {
        name: name.to_string(),
        message: "unknown colormap".to_string(),
    })
}
