//! Gridded fields handed to the plotting routines
//!
//! A [`GriddedField`] is a 2-D array with latitude along the rows and the
//! panel's horizontal axis (time of year or longitude) along the columns.
//! Missing values are stored as `NaN`.

use crate::errors::{Result, RuNeDiagError};
use ndarray::Array2;

/// A 2-D field with its coordinate axes and physical units
#[derive(Debug, Clone)]
pub struct GriddedField {
    pub name: String,
    pub units: String,
    /// Values indexed as `[lat, x]`
    pub data: Array2<f64>,
    /// Horizontal coordinate: months for zonal means, degrees east for maps
    pub x: Vec<f64>,
    /// Latitude in degrees north
    pub lat: Vec<f64>,
}

impl GriddedField {
    /// Build a field from latitude-major data.
    pub fn new(
        name: impl Into<String>,
        data: Array2<f64>,
        x: Vec<f64>,
        lat: Vec<f64>,
        units: impl Into<String>,
    ) -> Result<Self> {
        let name = name.into();
        let (rows, cols) = data.dim();
        if rows != lat.len() || cols != x.len() {
            return Err(RuNeDiagError::ShapeMismatch {
                field: name,
                message: format!(
                    "data is {}×{} but axes are lat[{}] × x[{}]",
                    rows,
                    cols,
                    lat.len(),
                    x.len()
                ),
            });
        }
        if rows == 0 || cols == 0 {
            return Err(RuNeDiagError::ShapeMismatch {
                field: name,
                message: "field has no grid points".to_string(),
            });
        }

        Ok(Self {
            name,
            units: units.into(),
            data,
            x,
            lat,
        })
    }

    /// Build a field from `[time, lat]` data, as annual cycles are stored.
    pub fn from_time_lat(
        name: impl Into<String>,
        data: Array2<f64>,
        time: Vec<f64>,
        lat: Vec<f64>,
        units: impl Into<String>,
    ) -> Result<Self> {
        Self::new(name, data.t().to_owned(), time, lat, units)
    }

    /// Number of finite grid values.
    pub fn valid_count(&self) -> usize {
        self.data.iter().filter(|v| v.is_finite()).count()
    }

    /// Minimum and maximum over finite values.
    pub fn finite_range(&self) -> Option<(f64, f64)> {
        self.data
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    /// Append a wrap-around column at `lon[0] + 360` so a global map closes
    /// at the seam.
    ///
    /// Only grids whose spacing carries the last longitude round to
    /// `lon[0] + 360` are global. Regional grids and grids that already
    /// repeat the first longitude are returned unchanged.
    pub fn with_cyclic_longitude(&self) -> Self {
        if !self.is_global_longitude() {
            return self.clone();
        }
        let first = self.x[0];

        let mut x = self.x.clone();
        x.push(first + 360.0);

        let (rows, cols) = self.data.dim();
        let data = Array2::from_shape_fn((rows, cols + 1), |(r, c)| self.data[[r, c % cols]]);

        Self {
            name: self.name.clone(),
            units: self.units.clone(),
            data,
            x,
            lat: self.lat.clone(),
        }
    }

    /// Whether the longitudes cover the full circle without repeating the
    /// first one.
    pub fn is_global_longitude(&self) -> bool {
        let n = self.x.len();
        if n < 2 {
            return false;
        }
        let first = self.x[0];
        let last = self.x[n - 1];
        let dlon = last - self.x[n - 2];
        if !(dlon > 0.0) {
            return false;
        }
        (last + dlon - (first + 360.0)).abs() < dlon * 1e-3
    }

    /// Bilinear sample at (`lon`, `lat`) on a cyclic longitude grid.
    ///
    /// Returns `NaN` outside the latitude coverage (allowing half a grid
    /// spacing of slack at the edges), outside the longitudes of a regional
    /// grid, or when any contributing corner is missing.
    pub fn sample_lon_lat(&self, lon: f64, lat: f64) -> f64 {
        let nx = self.x.len();
        let ny = self.lat.len();
        if nx < 2 {
            return f64::NAN;
        }

        let lon0 = self.x[0];
        let lon = lon0 + (lon - lon0).rem_euclid(360.0);
        let (ix, tx) = match bracket(&self.x, lon) {
            Some(found) => found,
            None => return f64::NAN,
        };

        let (iy, ty) = if ny == 1 {
            (0, 0.0)
        } else {
            let lat_lo = self.lat[0].min(self.lat[ny - 1]);
            let lat_hi = self.lat[0].max(self.lat[ny - 1]);
            let slack = (lat_hi - lat_lo) / (ny - 1) as f64 * 0.5;
            if lat < lat_lo - slack || lat > lat_hi + slack {
                return f64::NAN;
            }
            match bracket(&self.lat, lat.clamp(lat_lo, lat_hi)) {
                Some(found) => found,
                None => return f64::NAN,
            }
        };

        let iy1 = (iy + 1).min(ny - 1);
        let ix1 = (ix + 1).min(nx - 1);
        let v00 = self.data[[iy, ix]];
        let v01 = self.data[[iy, ix1]];
        let v10 = self.data[[iy1, ix]];
        let v11 = self.data[[iy1, ix1]];

        let bottom = v00 + (v01 - v00) * tx;
        let top = v10 + (v11 - v10) * tx;
        bottom + (top - bottom) * ty
    }
}

/// Locate `value` in a monotonic axis, returning the lower index and the
/// fractional position towards the next coordinate.
fn bracket(axis: &[f64], value: f64) -> Option<(usize, f64)> {
    let n = axis.len();
    if n < 2 {
        return None;
    }
    let ascending = axis[n - 1] >= axis[0];
    let idx = if ascending {
        axis.partition_point(|&c| c <= value)
    } else {
        axis.partition_point(|&c| c >= value)
    };

    let lower = idx.saturating_sub(1).min(n - 2);
    let (a, b) = (axis[lower], axis[lower + 1]);
    if (b - a).abs() < f64::EPSILON {
        return Some((lower, 0.0));
    }
    let t = (value - a) / (b - a);
    if !(-1e-9..=1.0 + 1e-9).contains(&t) {
        return None;
    }
    Some((lower, t.clamp(0.0, 1.0)))
}

/// Cell edges for "auto" shading: midpoints between centres, with the outer
/// edges extrapolated by half a cell.
pub fn cell_edges(centres: &[f64]) -> Vec<f64> {
    match centres.len() {
        0 => Vec::new(),
        1 => vec![centres[0] - 0.5, centres[0] + 0.5],
        n => {
            let mut edges = Vec::with_capacity(n + 1);
            edges.push(centres[0] - (centres[1] - centres[0]) * 0.5);
            edges.extend(centres.windows(2).map(|w| (w[0] + w[1]) * 0.5));
            edges.push(centres[n - 1] + (centres[n - 1] - centres[n - 2]) * 0.5);
            edges
        }
    }
}
