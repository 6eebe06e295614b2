//! Gridded elevation data for profile sampling.
//!
//! Reads SRTM/NASADEM `.hgt` tiles and exposes them to
//! [`heightprofile`] through [`TileHeights`].
//!
//! # References
//!
//! 1. [30-Meter SRTM Tile Downloader](https://dwtkns.com/srtm30m)
//! 1. [SRTM Collection User Guide](https://lpdaac.usgs.gov/documents/179/SRTM_User_Guide_V3.pdf)

mod error;
mod provider;
mod raster;
mod tiles;

pub use crate::{
    error::DemError,
    provider::TileHeights,
    raster::Raster,
    tiles::{TileDir, TileMode},
};

/// Floating point type used for coordinates and heights.
pub type C = f64;
