use crate::C;

/// Axis extents and plot area of a profile chart.
///
/// The scale factor is the vertical exaggeration: how many times
/// steeper the chart draws the terrain than it is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartFrame {
    pub min_x: C,
    pub max_x: C,
    pub min_y: C,
    pub max_y: C,

    /// Plot area width in pixels.
    pub grid_width: C,

    /// Plot area height in pixels.
    pub grid_height: C,
}

impl ChartFrame {
    /// Current scale factor, rounded to two decimals.
    ///
    /// `None` for a flat y range or an empty plot area.
    pub fn scale_factor(&self) -> Option<C> {
        let raw = (self.grid_height * (self.max_x - self.min_x))
            / ((self.max_y - self.min_y) * self.grid_width);
        (raw.is_finite() && raw > 0.0).then(|| (raw * 100.0).round() / 100.0)
    }

    /// Returns a frame drawn at `target` exaggeration.
    ///
    /// Factors below `initial` stretch the y axis, factors above it
    /// stretch the x axis, so the data always stays in view.
    /// Non-positive or unchanged targets return `self`, as do frames
    /// without a scale factor.
    #[must_use]
    pub fn with_scale_factor(&self, target: C, initial: C) -> Self {
        if !(target > 0.0) || target == initial || self.scale_factor().is_none() {
            return *self;
        }
        let mut frame = *self;
        if target < initial {
            frame.max_y = (self.max_x - self.min_x) * self.grid_height / (self.grid_width * target)
                + self.min_y;
        } else {
            frame.max_x = target * (self.max_y - self.min_y) * self.grid_width / self.grid_height
                + self.min_x;
        }
        frame
    }
}

#[cfg(test)]
mod tests {
    use super::ChartFrame;
    use approx::assert_relative_eq;

    fn frame() -> ChartFrame {
        ChartFrame {
            min_x: 0.0,
            max_x: 1000.0,
            min_y: 200.0,
            max_y: 300.0,
            grid_width: 500.0,
            grid_height: 250.0,
        }
    }

    #[test]
    fn test_scale_factor() {
        // 250 * 1000 / (100 * 500)
        assert_relative_eq!(frame().scale_factor().unwrap(), 5.0);
    }

    #[test]
    fn test_smaller_factor_stretches_y() {
        let scaled = frame().with_scale_factor(2.0, 5.0);
        assert_eq!(scaled.max_x, 1000.0);
        assert_relative_eq!(scaled.max_y, 450.0);
        assert_relative_eq!(scaled.scale_factor().unwrap(), 2.0);
    }

    #[test]
    fn test_bigger_factor_stretches_x() {
        let scaled = frame().with_scale_factor(10.0, 5.0);
        assert_eq!(scaled.max_y, 300.0);
        assert_relative_eq!(scaled.max_x, 2000.0);
        assert_relative_eq!(scaled.scale_factor().unwrap(), 10.0);
    }

    #[test]
    fn test_ignored_factors() {
        assert_eq!(frame().with_scale_factor(0.0, 5.0), frame());
        assert_eq!(frame().with_scale_factor(5.0, 5.0), frame());
    }

    #[test]
    fn test_flat_profile_has_no_scale_factor() {
        let flat = ChartFrame {
            max_y: 200.0,
            ..frame()
        };
        assert_eq!(flat.scale_factor(), None);
        assert_eq!(flat.with_scale_factor(10.0, 5.0), flat);

        let empty = ChartFrame {
            grid_width: 0.0,
            ..frame()
        };
        assert_eq!(empty.scale_factor(), None);
        assert_eq!(empty.with_scale_factor(2.0, 5.0), empty);
    }
}
