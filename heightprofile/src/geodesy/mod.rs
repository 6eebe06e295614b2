//! Coordinate conversions and geodesic measurements on the WGS84
//! ellipsoid.

mod ellipsoid;
mod mercator;
mod segment;

pub use {
    ellipsoid::{Cartesian3, Cartographic, WGS84_A, WGS84_B, WGS84_F},
    mercator::{mercator_to_wgs84, wgs84_to_mercator, CoordinateSystem, MAX_MERCATOR_LAT},
    segment::{Segment, Segments},
};
