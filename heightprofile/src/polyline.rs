use crate::{
    geodesy::{mercator_to_wgs84, Cartographic, CoordinateSystem},
    C,
};
use geo::geometry::{Coord, LineString};

/// An ordered sequence of 2D or 3D vertices to profile.
///
/// Vertices are `[x, y, height]` in the polyline's
/// [`CoordinateSystem`]; 2D input gets a height of 0.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    vertices: Vec<[C; 3]>,
    crs: CoordinateSystem,
}

impl Polyline {
    pub fn new(vertices: Vec<[C; 3]>, crs: CoordinateSystem) -> Self {
        Self { vertices, crs }
    }

    /// Polyline from longitude/latitude degrees.
    pub fn wgs84(vertices: Vec<[C; 3]>) -> Self {
        Self::new(vertices, CoordinateSystem::Wgs84)
    }

    /// Polyline from EPSG:3857 meters.
    pub fn web_mercator(vertices: Vec<[C; 3]>) -> Self {
        Self::new(vertices, CoordinateSystem::WebMercator)
    }

    pub fn from_coords<I>(coords: I, crs: CoordinateSystem) -> Self
    where
        I: IntoIterator<Item = Coord<C>>,
    {
        let vertices = coords.into_iter().map(|Coord { x, y }| [x, y, 0.0]).collect();
        Self { vertices, crs }
    }

    pub fn crs(&self) -> CoordinateSystem {
        self.crs
    }

    pub fn vertices(&self) -> &[[C; 3]] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns the vertices as WGS84 positions.
    pub fn to_cartographic(&self) -> Vec<Cartographic> {
        self.vertices
            .iter()
            .map(|&[x, y, height]| match self.crs {
                CoordinateSystem::Wgs84 => Cartographic::new(x, y, height),
                CoordinateSystem::WebMercator => {
                    let (lon, lat) = mercator_to_wgs84(x, y);
                    Cartographic::new(lon, lat, height)
                }
            })
            .collect()
    }
}

impl From<LineString<C>> for Polyline {
    /// Treats the line string's coordinates as WGS84 degrees.
    fn from(line: LineString<C>) -> Self {
        Self::from_coords(line.0, CoordinateSystem::Wgs84)
    }
}

#[cfg(test)]
mod tests {
    use super::Polyline;
    use crate::geodesy::wgs84_to_mercator;
    use approx::assert_relative_eq;
    use geo::line_string;

    #[test]
    fn test_mercator_input() {
        let (x0, y0) = wgs84_to_mercator(7.0, 50.0);
        let (x1, y1) = wgs84_to_mercator(7.1, 50.1);
        let line = Polyline::web_mercator(vec![[x0, y0, 120.0], [x1, y1, 80.0]]);
        let vertices = line.to_cartographic();
        assert_relative_eq!(vertices[0].lon, 7.0, epsilon = 1e-9);
        assert_relative_eq!(vertices[0].lat, 50.0, epsilon = 1e-9);
        assert_eq!(vertices[0].height, 120.0);
        assert_relative_eq!(vertices[1].lat, 50.1, epsilon = 1e-9);
    }

    #[test]
    fn test_from_line_string() {
        let line: Polyline = line_string![(x: 1.0, y: 2.0), (x: 3.0, y: 4.0)].into();
        assert_eq!(line.len(), 2);
        assert_eq!(line.vertices()[1], [3.0, 4.0, 0.0]);
    }
}
