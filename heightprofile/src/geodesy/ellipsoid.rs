//! WGS84 geodetic <-> earth-centered earth-fixed conversions.
//!
//! # References
//!
//! 1. [NGA.STND.0036 WGS84 definition](https://earth-info.nga.mil/php/download.php?file=coord-wgs84)
//! 1. B. R. Bowring, _Transformation from spatial to geographical
//!    coordinates_, Survey Review 23 (1976).

use crate::C;
use geo::Point;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;

/// Semi-major axis in meters.
pub const WGS84_A: C = 6_378_137.0;

/// Flattening.
pub const WGS84_F: C = 1.0 / 298.257_223_563;

/// Semi-minor axis in meters.
pub const WGS84_B: C = WGS84_A * (1.0 - WGS84_F);

/// First eccentricity squared.
const E2: C = WGS84_F * (2.0 - WGS84_F);

/// Second eccentricity squared.
const EP2: C = E2 / (1.0 - E2);

/// Bowring's iteration converges to sub-millimeter in 2-3 rounds.
const MAX_ITERATIONS: usize = 8;

/// A geographic position.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Cartographic {
    /// Longitude in degrees.
    pub lon: C,

    /// Latitude in degrees.
    pub lat: C,

    /// Height above the ellipsoid in meters.
    pub height: C,
}

impl Cartographic {
    pub fn new(lon: C, lat: C, height: C) -> Self {
        Self { lon, lat, height }
    }

    /// Returns the 2D position, dropping height.
    pub fn point(&self) -> Point<C> {
        Point::new(self.lon, self.lat)
    }

    /// Returns `self` with a different height.
    #[must_use]
    pub fn with_height(self, height: C) -> Self {
        Self { height, ..self }
    }

    /// Converts to earth-centered earth-fixed coordinates.
    pub fn to_cartesian(&self) -> Cartesian3 {
        let lat = self.lat.to_radians();
        let lon = self.lon.to_radians();
        let (lat_sin, lat_cos) = lat.sin_cos();
        let (lon_sin, lon_cos) = lon.sin_cos();
        // Prime vertical radius of curvature.
        let n = WGS84_A / (1.0 - E2 * lat_sin * lat_sin).sqrt();
        Cartesian3 {
            x: (n + self.height) * lat_cos * lon_cos,
            y: (n + self.height) * lat_cos * lon_sin,
            z: (n * (1.0 - E2) + self.height) * lat_sin,
        }
    }
}

/// A position in earth-centered earth-fixed (ECEF) meters.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Cartesian3 {
    pub x: C,
    pub y: C,
    pub z: C,
}

impl Cartesian3 {
    pub fn new(x: C, y: C, z: C) -> Self {
        Self { x, y, z }
    }

    /// Linear interpolation between `self` (`t = 0`) and `other`
    /// (`t = 1`).
    #[must_use]
    pub fn lerp(&self, other: &Self, t: C) -> Self {
        Self {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
            z: self.z + (other.z - self.z) * t,
        }
    }

    pub fn distance(&self, other: &Self) -> C {
        let (dx, dy, dz) = (other.x - self.x, other.y - self.y, other.z - self.z);
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Converts to geographic coordinates.
    ///
    /// Points on the polar axis map to longitude 0 and the earth's
    /// center maps to (0, 0) with a height of `-a`.
    pub fn to_cartographic(&self) -> Cartographic {
        let Self { x, y, z } = *self;
        let p = x.hypot(y);

        let lat = if p < 1e-9 {
            if z > 0.0 {
                FRAC_PI_2
            } else if z < 0.0 {
                -FRAC_PI_2
            } else {
                0.0
            }
        } else {
            // Parametric (reduced) latitude.
            let mut beta = z.atan2((1.0 - WGS84_F) * p);
            let mut lat = 0.0;
            for _ in 0..MAX_ITERATIONS {
                let (beta_sin, beta_cos) = beta.sin_cos();
                lat = (z + EP2 * WGS84_B * beta_sin.powi(3))
                    .atan2(p - E2 * WGS84_A * beta_cos.powi(3));
                let next = ((1.0 - WGS84_F) * lat.sin()).atan2(lat.cos());
                if (next - beta).abs() < 1e-15 {
                    break;
                }
                beta = next;
            }
            lat
        };

        let lon = if p < 1e-9 { 0.0 } else { y.atan2(x) };
        let (lat_sin, lat_cos) = lat.sin_cos();
        let height = p * lat_cos + z * lat_sin - WGS84_A * (1.0 - E2 * lat_sin * lat_sin).sqrt();

        Cartographic {
            lon: lon.to_degrees(),
            lat: lat.to_degrees(),
            height,
        }
    }
}
