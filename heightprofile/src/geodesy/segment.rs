use super::Cartographic;
use crate::{ProfileError, C};
use geo::algorithm::GeodesicDistance;
use itertools::Itertools;

/// One leg of a polyline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Cartographic,
    pub end: Cartographic,

    /// Geodesic distance from `start` to `end` along the WGS84
    /// ellipsoid, ignoring height.
    pub surface_distance_m: C,
}

impl Segment {
    pub fn new(start: Cartographic, end: Cartographic) -> Self {
        let surface_distance_m = if start.lon == end.lon && start.lat == end.lat {
            0.0
        } else {
            start.point().geodesic_distance(&end.point()).max(0.0)
        };
        Self {
            start,
            end,
            surface_distance_m,
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.surface_distance_m == 0.0
    }
}

/// Per-segment surface distances of a polyline and their running
/// total.
#[derive(Debug, Clone, PartialEq)]
pub struct Segments {
    segments: Vec<Segment>,

    /// Distance from the first vertex to vertex `i`; one entry per
    /// vertex, starting with 0.
    cumulative_m: Vec<C>,
}

impl Segments {
    /// Measures every consecutive vertex pair.
    ///
    /// Coincident vertices produce zero-length segments, not errors.
    pub fn new(vertices: &[Cartographic]) -> Result<Self, ProfileError> {
        if vertices.len() < 2 {
            return Err(ProfileError::DegenerateGeometry(vertices.len()));
        }

        let segments: Vec<Segment> = vertices
            .iter()
            .tuple_windows()
            .map(|(start, end)| Segment::new(*start, *end))
            .collect();

        let cumulative_m = std::iter::once(0.0)
            .chain(segments.iter().scan(0.0, |total, segment| {
                *total += segment.surface_distance_m;
                Some(*total)
            }))
            .collect();

        Ok(Self {
            segments,
            cumulative_m,
        })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn cumulative_m(&self) -> &[C] {
        &self.cumulative_m
    }

    /// Total surface length in meters.
    pub fn total_m(&self) -> C {
        self.cumulative_m.last().copied().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}
