//! Spherical (web) mercator, EPSG:3857.

use crate::C;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_4;

/// Sphere radius used by EPSG:3857.
const RADIUS: C = 6_378_137.0;

/// Latitude at which web mercator becomes a square.
pub const MAX_MERCATOR_LAT: C = 85.051_128_779_806_59;

/// How the vertices of a [`Polyline`](crate::Polyline) are expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordinateSystem {
    /// Longitude and latitude in degrees.
    #[default]
    Wgs84,

    /// Planar EPSG:3857 meters.
    WebMercator,
}

/// Returns (longitude, latitude) in degrees for a mercator `(x, y)`.
pub fn mercator_to_wgs84(x: C, y: C) -> (C, C) {
    let lon = (x / RADIUS).to_degrees();
    let lat = (2.0 * (y / RADIUS).exp().atan() - 2.0 * FRAC_PI_4).to_degrees();
    (lon, lat)
}

/// Returns mercator `(x, y)` for a longitude and latitude in
/// degrees.
///
/// Latitudes beyond [`MAX_MERCATOR_LAT`] are clamped.
pub fn wgs84_to_mercator(lon: C, lat: C) -> (C, C) {
    let lat = lat.clamp(-MAX_MERCATOR_LAT, MAX_MERCATOR_LAT);
    let x = RADIUS * lon.to_radians();
    let y = RADIUS * (FRAC_PI_4 + lat.to_radians() / 2.0).tan().ln();
    (x, y)
}

#[cfg(test)]
mod tests {
    use super::{mercator_to_wgs84, wgs84_to_mercator, MAX_MERCATOR_LAT};
    use approx::assert_relative_eq;

    #[test]
    fn test_origin() {
        assert_eq!(mercator_to_wgs84(0.0, 0.0), (0.0, 0.0));
    }

    #[test]
    fn test_extent() {
        let (x, y) = wgs84_to_mercator(180.0, MAX_MERCATOR_LAT);
        assert_relative_eq!(x, 20_037_508.342_789_244, epsilon = 1e-6);
        assert_relative_eq!(y, 20_037_508.342_789_244, epsilon = 1e-3);

        let (_, clamped) = wgs84_to_mercator(0.0, 90.0);
        assert_relative_eq!(clamped, y, epsilon = 1e-9);
    }

    #[test]
    fn test_berlin() {
        let (x, y) = wgs84_to_mercator(13.404_954, 52.520_008);
        assert_relative_eq!(x, 1_492_232.653, epsilon = 1e-3);
        let (lon, lat) = mercator_to_wgs84(x, y);
        assert_relative_eq!(lon, 13.404_954, epsilon = 1e-9);
        assert_relative_eq!(lat, 52.520_008, epsilon = 1e-9);
    }
}
