use crate::{geodesy::Cartesian3, Cartographic, Segments, C};

/// Piecewise-linear interpolation over ECEF positions.
///
/// `times` is non-decreasing and has one entry per point. Equal
/// neighboring times (zero-length segments) are allowed and behave as
/// an instantaneous jump to the later point.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearSpline {
    times: Vec<C>,
    points: Vec<Cartesian3>,
}

impl LinearSpline {
    /// Returns `None` if the lengths differ, `points` is empty, or
    /// `times` decreases anywhere.
    pub fn new(times: Vec<C>, points: Vec<Cartesian3>) -> Option<Self> {
        let monotonic = times.windows(2).all(|w| w[0] <= w[1]);
        if times.len() == points.len() && !points.is_empty() && monotonic {
            Some(Self { times, points })
        } else {
            None
        }
    }

    /// Parameterizes `vertices` by arc length, in units of
    /// `resolution_m`, so that time `i` is the `i`th sample.
    ///
    /// `segments` must have been measured from `vertices` and
    /// `resolution_m` must be positive.
    pub fn from_segments(vertices: &[Cartographic], segments: &Segments, resolution_m: C) -> Self {
        debug_assert_eq!(vertices.len(), segments.len() + 1);
        debug_assert!(resolution_m > 0.0);

        let times = std::iter::once(0.0)
            .chain(segments.segments().iter().scan(0.0, |time, segment| {
                if segment.surface_distance_m > 0.0 {
                    *time += segment.surface_distance_m / resolution_m;
                }
                Some(*time)
            }))
            .collect();
        let points = vertices.iter().map(Cartographic::to_cartesian).collect();

        Self { times, points }
    }

    pub fn times(&self) -> &[C] {
        &self.times
    }

    /// Time of the last point.
    pub fn duration(&self) -> C {
        self.times.last().copied().unwrap_or_default()
    }

    /// Interpolated position at `time`, clamped to the spline's
    /// range.
    pub fn evaluate(&self, time: C) -> Cartesian3 {
        let first = self.times[0];
        let time = if time.is_nan() { first } else { time.clamp(first, self.duration()) };

        // Index of the first point strictly later than `time`.
        let upper = self.times.partition_point(|&t| t <= time);
        if upper >= self.points.len() {
            return self.points[self.points.len() - 1];
        }
        let lower = upper - 1;

        // `times[upper] > time >= times[lower]`, so `span` is never 0.
        let span = self.times[upper] - self.times[lower];
        let u = (time - self.times[lower]) / span;
        self.points[lower].lerp(&self.points[upper], u)
    }
}

#[cfg(test)]
mod tests {
    use super::LinearSpline;
    use crate::{geodesy::Cartesian3, Cartographic, Segments};
    use approx::assert_relative_eq;

    fn x(x: f64) -> Cartesian3 {
        Cartesian3::new(x, 0.0, 0.0)
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(LinearSpline::new(vec![], vec![]).is_none());
        assert!(LinearSpline::new(vec![0.0, 1.0], vec![x(0.0)]).is_none());
        assert!(LinearSpline::new(vec![1.0, 0.0], vec![x(0.0), x(1.0)]).is_none());
    }

    #[test]
    fn test_evaluate() {
        let spline = LinearSpline::new(vec![0.0, 2.0, 6.0], vec![x(0.0), x(10.0), x(30.0)]).unwrap();
        assert_eq!(spline.evaluate(0.0), x(0.0));
        assert_eq!(spline.evaluate(1.0), x(5.0));
        assert_eq!(spline.evaluate(2.0), x(10.0));
        assert_eq!(spline.evaluate(4.0), x(20.0));
        assert_eq!(spline.evaluate(6.0), x(30.0));
        assert_eq!(spline.evaluate(7.5), x(30.0));
        assert_eq!(spline.evaluate(-1.0), x(0.0));
    }

    #[test]
    fn test_zero_length_segment_is_a_jump() {
        let spline =
            LinearSpline::new(vec![0.0, 2.0, 2.0, 4.0], vec![x(0.0), x(10.0), x(50.0), x(60.0)]).unwrap();
        assert_eq!(spline.evaluate(1.0), x(5.0));
        assert_eq!(spline.evaluate(2.0), x(50.0));
        assert_eq!(spline.evaluate(3.0), x(55.0));
        for i in 0..=40 {
            let p = spline.evaluate(f64::from(i) / 10.0);
            assert!(p.x.is_finite());
        }
    }

    #[test]
    fn test_single_point() {
        let spline = LinearSpline::new(vec![0.0], vec![x(3.0)]).unwrap();
        assert_eq!(spline.evaluate(0.0), x(3.0));
        assert_eq!(spline.evaluate(5.0), x(3.0));
    }

    #[test]
    fn test_from_segments_with_duplicate_vertex() {
        let vertices = [
            Cartographic::new(0.0, 0.0, 0.0),
            Cartographic::new(0.01, 0.0, 0.0),
            Cartographic::new(0.01, 0.0, 0.0),
            Cartographic::new(0.02, 0.0, 0.0),
        ];
        let segments = Segments::new(&vertices).unwrap();
        let spline = LinearSpline::from_segments(&vertices, &segments, 100.0);
        let times = spline.times();
        assert_eq!(times.len(), 4);
        assert_eq!(times[1], times[2]);
        assert_relative_eq!(spline.duration(), segments.total_m() / 100.0);
        assert!(spline.evaluate(times[1]).x.is_finite());
    }
}
