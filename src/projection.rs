//! Polar stereographic projection onto a circular map panel
//!
//! Projected coordinates are expressed in axes units: the map panel spans
//! `[0, 1] × [0, 1]` and the boundary latitude is the circle of radius 0.5
//! centred at `(0.5, 0.5)`. Longitude 0 points to the bottom of a north-pole
//! map and to the top of a south-pole map.

use crate::errors::{Result, RuNeDiagError};
use std::f64::consts::FRAC_PI_4;

/// Latitude bounding north-pole maps
pub const NORTH_BOUNDARY_LAT: f64 = 50.0;
/// Latitude bounding south-pole maps
pub const SOUTH_BOUNDARY_LAT: f64 = -55.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pole {
    North,
    South,
}

impl Pole {
    /// Select the pole named by a region such as `polar_N` or `polar_S`.
    ///
    /// A region containing `N` is a north-pole region, checked before `S`.
    pub fn from_region(region: &str) -> Result<Self> {
        if region.contains('N') {
            Ok(Pole::North)
        } else if region.contains('S') {
            Ok(Pole::South)
        } else {
            Err(RuNeDiagError::InvalidRegion {
                region: region.to_string(),
            })
        }
    }

    pub fn boundary_lat(self) -> f64 {
        match self {
            Pole::North => NORTH_BOUNDARY_LAT,
            Pole::South => SOUTH_BOUNDARY_LAT,
        }
    }
}

/// Polar stereographic projection with central longitude 0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarStereo {
    pub pole: Pole,
    boundary_radius: f64,
}

impl PolarStereo {
    pub fn new(pole: Pole) -> Self {
        let boundary_radius = stereo_radius(pole, pole.boundary_lat());
        Self {
            pole,
            boundary_radius,
        }
    }

    pub fn boundary_lat(&self) -> f64 {
        self.pole.boundary_lat()
    }

    /// Project a geographic point into axes units.
    pub fn project(&self, lon: f64, lat: f64) -> (f64, f64) {
        let r = stereo_radius(self.pole, lat) / self.boundary_radius * 0.5;
        let lambda = lon.to_radians();
        match self.pole {
            Pole::North => (0.5 + r * lambda.sin(), 0.5 - r * lambda.cos()),
            Pole::South => (0.5 + r * lambda.sin(), 0.5 + r * lambda.cos()),
        }
    }

    /// Geographic point at axes position `(u, v)`, longitude in `(-180, 180]`.
    pub fn inverse(&self, u: f64, v: f64) -> (f64, f64) {
        let x = (u - 0.5) * 2.0 * self.boundary_radius;
        let y = (v - 0.5) * 2.0 * self.boundary_radius;
        let r = x.hypot(y);
        match self.pole {
            Pole::North => {
                let lat = 90.0 - 2.0 * (r / 2.0).atan().to_degrees();
                (x.atan2(-y).to_degrees(), lat)
            }
            Pole::South => {
                let lat = 2.0 * (r / 2.0).atan().to_degrees() - 90.0;
                (x.atan2(y).to_degrees(), lat)
            }
        }
    }

    /// Whether an axes position lies inside the circular boundary.
    pub fn contains(&self, u: f64, v: f64) -> bool {
        let (du, dv) = (u - 0.5, v - 0.5);
        du * du + dv * dv <= 0.25
    }
}

/// Distance from the pole on the unit-sphere stereographic plane.
fn stereo_radius(pole: Pole, lat: f64) -> f64 {
    let phi = lat.to_radians();
    match pole {
        Pole::North => 2.0 * (FRAC_PI_4 - phi / 2.0).tan(),
        Pole::South => 2.0 * (FRAC_PI_4 + phi / 2.0).tan(),
    }
}
