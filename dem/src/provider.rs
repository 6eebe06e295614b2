use crate::{DemError, TileDir, C};
use async_trait::async_trait;
use geo::geometry::Coord;
use heightprofile::{Cartographic, ElevationType, HeightProvider, HeightQueryError};
use std::sync::Arc;

/// Heights from a terrain tile directory and, optionally, a surface
/// model (DSM) directory.
///
/// Tile I/O runs on tokio's blocking pool.
#[derive(Clone)]
pub struct TileHeights {
    terrain: Arc<TileDir>,
    surface: Option<Arc<TileDir>>,
}

impl TileHeights {
    pub fn new(terrain: TileDir) -> Self {
        Self {
            terrain: Arc::new(terrain),
            surface: None,
        }
    }

    #[must_use]
    pub fn with_surface(mut self, surface: TileDir) -> Self {
        self.surface = Some(Arc::new(surface));
        self
    }

    /// Height at `coord` for `mode`.
    ///
    /// Missing terrain reads as 0. `Both` takes the higher of terrain
    /// and surface, falling back to terrain where there is no surface
    /// tile.
    pub fn height(&self, coord: Coord<C>, mode: ElevationType) -> Result<C, DemError> {
        let terrain = self.terrain.height(coord)?.unwrap_or(0.0);
        match (mode, &self.surface) {
            (ElevationType::Both, Some(surface)) => Ok(surface
                .height(coord)?
                .map_or(terrain, |surface| surface.max(terrain))),
            _ => Ok(terrain),
        }
    }
}

#[async_trait]
impl HeightProvider for TileHeights {
    async fn query_height(
        &self,
        point: Cartographic,
        mode: ElevationType,
    ) -> Result<Cartographic, HeightQueryError> {
        let this = self.clone();
        let coord = Coord {
            x: point.lon,
            y: point.lat,
        };
        let height = tokio::task::spawn_blocking(move || this.height(coord, mode))
            .await
            .map_err(|e| HeightQueryError::Aborted(e.to_string()))?
            .map_err(HeightQueryError::provider)?;
        Ok(point.with_height(height))
    }
}
