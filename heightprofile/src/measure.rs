use crate::{ProfileResult, SamplePoint, C};

/// Side lengths of the right triangle spanned by two chart points
/// `(distance, height)`, with its right angle at `(p1.x, p2.y)`.
///
/// Returns `[hypotenuse, vertical, horizontal]`.
pub fn side_lengths(p1: (C, C), p2: (C, C)) -> [C; 3] {
    let corner = (p1.0, p2.1);
    let hypotenuse = (p2.0 - p1.0).hypot(p2.1 - p1.1);
    let vertical = (corner.0 - p1.0).hypot(corner.1 - p1.1);
    let horizontal = (p2.0 - corner.0).hypot(p2.1 - corner.1);
    [hypotenuse, vertical, horizontal]
}

/// A two point measurement on a profile chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    /// Straight-line distance between the two points.
    pub hypotenuse: C,

    /// Height difference.
    pub vertical: C,

    /// Distance along the profile.
    pub horizontal: C,

    /// The measurement triangle on the map: the first point, the
    /// first point raised (or lowered) to the second point's height,
    /// the second point, and back to the first.
    pub triangle: [SamplePoint; 4],
}

impl Measurement {
    /// Measures between chart points `a` and `b`, each a
    /// `(distance, height)` pair taken from `result`'s series.
    ///
    /// Returns `None` if either distance has no sample.
    pub fn between(result: &ProfileResult, a: (C, C), b: (C, C)) -> Option<Self> {
        let [hypotenuse, vertical, horizontal] = side_lengths(a, b);
        let start = *result.point_at_distance(a.0)?;
        let end = *result.point_at_distance(b.0)?;
        let corner = SamplePoint {
            height: end.height,
            ..start
        };
        Some(Self {
            hypotenuse,
            vertical,
            horizontal,
            triangle: [start, corner, end, start],
        })
    }

    /// Rise over run in percent; `None` for a vertical measurement.
    pub fn grade_percent(&self) -> Option<C> {
        if self.horizontal > 0.0 {
            Some(100.0 * self.vertical / self.horizontal)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{side_lengths, Measurement};
    use crate::{ElevationType, Plan, ProfileResult, SamplePoint};
    use approx::assert_relative_eq;

    #[test]
    fn test_side_lengths() {
        let [hyp, vert, horiz] = side_lengths((0.0, 10.0), (40.0, 40.0));
        assert_relative_eq!(hyp, 50.0);
        assert_relative_eq!(vert, 30.0);
        assert_relative_eq!(horiz, 40.0);
    }

    #[test]
    fn test_between() {
        let plan = Plan::new(20.0, 10.0, 100).unwrap();
        let points = vec![
            SamplePoint::from([7.0, 50.0, 100.0]),
            SamplePoint::from([7.0001, 50.0, 105.0]),
            SamplePoint::from([7.0002, 50.0, 90.0]),
        ];
        let result = ProfileResult::new("p", &plan, ElevationType::Terrain, points);

        let m = Measurement::between(&result, (0.0, 100.0), (20.0, 90.0)).unwrap();
        assert_relative_eq!(m.vertical, 10.0);
        assert_relative_eq!(m.horizontal, 20.0);
        assert_relative_eq!(m.grade_percent().unwrap(), 50.0);
        assert_eq!(m.triangle[0], m.triangle[3]);
        assert_eq!(m.triangle[1], SamplePoint::from([7.0, 50.0, 90.0]));
        assert_eq!(m.triangle[2].lon, 7.0002);

        assert!(Measurement::between(&result, (0.0, 100.0), (50.0, 0.0)).is_none());
    }
}
