//! `.hgt` elevation tiles.
//!
//! A tile covers one degree square. Samples are big-endian `i16`
//! posts laid out row by row from the northern edge; the first and
//! last rows and columns sit exactly on the tile's edges.

use crate::{DemError, C};
use byteorder::{BigEndian as BE, ByteOrder, ReadBytesExt};
use geo::geometry::Coord;
use memmap2::Mmap;
use std::{fs::File, io::BufReader, mem::size_of, path::Path};

/// Marker SRTM uses for missing samples.
const VOID: i16 = i16::MIN;

pub struct Raster {
    /// Southwest corner of the tile in whole degrees.
    sw_corner: Coord<i16>,

    /// Posts per row and per column.
    posts: usize,

    samples: SampleStore,
}

enum SampleStore {
    Tombstone,
    InMem(Box<[i16]>),
    MemMap(Mmap),
}

impl SampleStore {
    fn get(&self, index: usize) -> i16 {
        match self {
            Self::Tombstone => 0,
            Self::InMem(samples) => samples[index],
            Self::MemMap(raw) => {
                let start = index * size_of::<i16>();
                BE::read_i16(&raw[start..start + size_of::<i16>()])
            }
        }
    }
}

impl Raster {
    /// Reads the tile at `path` into memory.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, DemError> {
        let posts = extract_posts(&path)?;
        let sw_corner = parse_sw_corner(&path)?;

        let mut file = BufReader::new(File::open(path)?);
        let mut samples = vec![0; posts * posts];
        file.read_i16_into::<BE>(&mut samples)?;

        Ok(Self {
            sw_corner,
            posts,
            samples: SampleStore::InMem(samples.into_boxed_slice()),
        })
    }

    /// Maps the tile at `path` instead of reading it.
    pub fn memmap<P: AsRef<Path>>(path: P) -> Result<Self, DemError> {
        let posts = extract_posts(&path)?;
        let sw_corner = parse_sw_corner(&path)?;
        let file = File::open(path)?;
        // Safety: tiles are read-only inputs; concurrent truncation is
        // not supported.
        let mmap = unsafe { Mmap::map(&file)? };
        Ok(Self {
            sw_corner,
            posts,
            samples: SampleStore::MemMap(mmap),
        })
    }

    /// A tile of zeros standing in for one that doesn't exist on
    /// disk (e.g. open ocean).
    pub fn tombstone(sw_corner: Coord<i16>) -> Self {
        Self {
            sw_corner,
            posts: 1201,
            samples: SampleStore::Tombstone,
        }
    }

    /// Builds a tile from `posts * posts` samples, north row first.
    pub fn from_samples(sw_corner: Coord<i16>, posts: usize, samples: Vec<i16>) -> Result<Self, DemError> {
        if posts < 2 || samples.len() != posts * posts {
            return Err(DemError::SampleCount {
                expected: posts * posts,
                actual: samples.len(),
            });
        }
        Ok(Self {
            sw_corner,
            posts,
            samples: SampleStore::InMem(samples.into_boxed_slice()),
        })
    }

    pub fn sw_corner(&self) -> Coord<i16> {
        self.sw_corner
    }

    pub fn posts(&self) -> usize {
        self.posts
    }

    pub fn is_tombstone(&self) -> bool {
        matches!(self.samples, SampleStore::Tombstone)
    }

    /// Raw sample at (`row`, `col`), row 0 being the northern edge.
    /// Voids read as 0.
    pub fn post(&self, row: usize, col: usize) -> i16 {
        match self.samples.get(row * self.posts + col) {
            VOID => 0,
            sample => sample,
        }
    }

    /// Bilinearly interpolated height at `coord`, or `None` if the
    /// coordinate is outside this tile.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    pub fn height(&self, coord: Coord<C>) -> Option<C> {
        let span = (self.posts - 1) as C;
        let fx = (coord.x - C::from(self.sw_corner.x)) * span;
        let fy = (C::from(self.sw_corner.y) + 1.0 - coord.y) * span;
        if !(0.0..=span).contains(&fx) || !(0.0..=span).contains(&fy) {
            return None;
        }

        let col = (fx.floor() as usize).min(self.posts - 2);
        let row = (fy.floor() as usize).min(self.posts - 2);
        let tx = fx - col as C;
        let ty = fy - row as C;

        let nw = C::from(self.post(row, col));
        let ne = C::from(self.post(row, col + 1));
        let sw = C::from(self.post(row + 1, col));
        let se = C::from(self.post(row + 1, col + 1));

        let north = nw + (ne - nw) * tx;
        let south = sw + (se - sw) * tx;
        Some(north + (south - north) * ty)
    }
}

/// Returns the southwest corner in whole degrees of the tile
/// containing `coord`.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn sw_corner(Coord { x, y }: Coord<C>) -> Coord<i16> {
    Coord {
        x: x.floor() as i16,
        y: y.floor() as i16,
    }
}

/// Returns the expected file name for the tile at `sw_corner`.
pub(crate) fn file_name(Coord { x, y }: Coord<i16>) -> String {
    let n_s = if y.is_negative() { 'S' } else { 'N' };
    let e_w = if x.is_negative() { 'W' } else { 'E' };
    format!("{n_s}{:02}{e_w}{:03}.hgt", y.abs(), x.abs())
}

fn extract_posts<P: AsRef<Path>>(path: P) -> Result<usize, DemError> {
    const ONE_ARCSECOND_LEN: u64 = 3601 * 3601 * size_of::<i16>() as u64;
    const THREE_ARCSECOND_LEN: u64 = 1201 * 1201 * size_of::<i16>() as u64;
    match path.as_ref().metadata()?.len() {
        ONE_ARCSECOND_LEN => Ok(3601),
        THREE_ARCSECOND_LEN => Ok(1201),
        invalid_len => Err(DemError::HgtLen(invalid_len, path.as_ref().to_owned())),
    }
}

fn parse_sw_corner<P: AsRef<Path>>(path: P) -> Result<Coord<i16>, DemError> {
    let mk_err = || DemError::HgtName(path.as_ref().to_owned());
    let name = path
        .as_ref()
        .file_stem()
        .and_then(std::ffi::OsStr::to_str)
        .ok_or_else(mk_err)?
        .to_uppercase();
    if name.len() != 7 || !name.is_ascii() {
        return Err(mk_err());
    }
    let lat_sign = match &name[0..1] {
        "N" => 1,
        "S" => -1,
        _ => return Err(mk_err()),
    };
    let lat = lat_sign * name[1..3].parse::<i16>().map_err(|_| mk_err())?;
    let lon_sign = match &name[3..4] {
        "E" => 1,
        "W" => -1,
        _ => return Err(mk_err()),
    };
    let lon = lon_sign * name[4..7].parse::<i16>().map_err(|_| mk_err())?;
    Ok(Coord { x: lon, y: lat })
}
