//! On-demand `.hgt` tile cache.

use crate::{
    raster::{file_name, sw_corner},
    DemError, Raster, C,
};
use dashmap::DashMap;
use geo::geometry::Coord;
use log::debug;
use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Arc,
};

/// How to handle tile.
///
/// The trade off between loading tile data into memory versus memory
/// mapping is not obvious, and you should measure both before
/// deciding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TileMode {
    /// Parse tile and load into memory.
    InMem,

    /// Memory map file contents.
    #[default]
    MemMap,
}

/// A directory of `.hgt` tiles, loaded as they are first touched.
pub struct TileDir {
    dir: PathBuf,

    mode: TileMode,

    /// Tiles which have been loaded on demand, including tombstones
    /// for tiles missing on disk.
    tiles: DashMap<Coord<i16>, Arc<Raster>>,
}

impl TileDir {
    pub fn new(dir: PathBuf, mode: TileMode) -> Result<Self, DemError> {
        // Fail early if `dir` has no tiles at all.
        let mut has_height_files = false;
        for entry in std::fs::read_dir(&dir)? {
            let path = entry?.path();
            if path
                .extension()
                .and_then(std::ffi::OsStr::to_str)
                .is_some_and(|ext| ext.eq_ignore_ascii_case("hgt"))
            {
                has_height_files = true;
                break;
            }
        }

        if has_height_files {
            Ok(Self {
                dir,
                mode,
                tiles: DashMap::new(),
            })
        } else {
            Err(DemError::Path(dir))
        }
    }

    /// Returns the tile containing `coord`.
    ///
    /// Tiles missing on disk come back as tombstones.
    pub fn get(&self, coord: Coord<C>) -> Result<Arc<Raster>, DemError> {
        let sw_corner = sw_corner(coord);
        self.tiles
            .entry(sw_corner)
            .or_try_insert_with(|| match self.load_tile(sw_corner) {
                Ok(tile) => Ok(Arc::new(tile)),
                Err(DemError::Io(e)) if e.kind() == ErrorKind::NotFound => {
                    debug!("loading tombstone in lieu of missing tile for {sw_corner:?}");
                    Ok(Arc::new(Raster::tombstone(sw_corner)))
                }
                Err(e) => Err(e),
            })
            .map(|r| r.clone())
    }

    /// Height at `coord`, or `None` if its tile is missing on disk.
    pub fn height(&self, coord: Coord<C>) -> Result<Option<C>, DemError> {
        let tile = self.get(coord)?;
        if tile.is_tombstone() {
            Ok(None)
        } else {
            Ok(tile.height(coord))
        }
    }

    /// Number of tiles (and tombstones) loaded so far.
    pub fn loaded(&self) -> usize {
        self.tiles.len()
    }
}

impl TileDir {
    fn load_tile(&self, sw_corner: Coord<i16>) -> Result<Raster, DemError> {
        let tile_path = {
            let file_name = file_name(sw_corner);
            let mut tile_path: PathBuf = [&self.dir, Path::new(&file_name)].iter().collect();
            if !tile_path.exists() {
                let file_name = file_name.to_lowercase();
                tile_path = [&self.dir, Path::new(&file_name)].iter().collect();
            }
            tile_path
        };
        debug!("loading {tile_path:?}");
        match self.mode {
            TileMode::InMem => Raster::load(tile_path),
            TileMode::MemMap => Raster::memmap(tile_path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{TileDir, TileMode};
    use crate::{
        raster::tests::{scratch_dir, write_ramp_tile},
        DemError,
    };
    use approx::assert_relative_eq;
    use geo::geometry::Coord;

    #[test]
    fn test_empty_dir_is_rejected() {
        let dir = scratch_dir("empty");
        std::fs::create_dir_all(&dir).unwrap();
        assert!(matches!(
            TileDir::new(dir.clone(), TileMode::InMem),
            Err(DemError::Path(_))
        ));
        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_lookup_and_missing_tile() {
        let dir = scratch_dir("lookup");
        write_ramp_tile(&dir, "n44w072.hgt");
        let tiles = TileDir::new(dir.clone(), TileMode::InMem).unwrap();

        let height = tiles.height(Coord { x: -71.75, y: 44.3 }).unwrap().unwrap();
        assert_relative_eq!(height, 300.0, epsilon = 1e-6);
        assert_eq!(tiles.height(Coord { x: 0.5, y: 0.5 }).unwrap(), None);
        assert_eq!(tiles.loaded(), 2);

        // Cached.
        tiles.height(Coord { x: -71.1, y: 44.9 }).unwrap();
        assert_eq!(tiles.loaded(), 2);
        std::fs::remove_dir_all(dir).unwrap();
    }
}
