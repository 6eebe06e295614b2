use crate::{ProfileError, C};
use log::{debug, warn};
use serde::Serialize;

/// Recoverable conditions a caller should surface to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SamplingWarning {
    /// The line is too short for the requested resolution; the run
    /// still proceeds but yields at most two points.
    InsufficientSamples { samples: usize },
}

impl std::fmt::Display for SamplingWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InsufficientSamples { samples } => write!(
                f,
                "not enough sample points ({samples}); choose a smaller resolution or a longer line"
            ),
        }
    }
}

/// Effective resolution and sample count for one sampling run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Plan {
    /// Resolution the caller asked for, in meters.
    pub requested_resolution_m: C,

    /// Resolution actually used, in meters.
    pub resolution_m: C,

    /// Index of the last sample; a run produces `total_samples + 1`
    /// points.
    pub total_samples: usize,

    pub warning: Option<SamplingWarning>,
}

impl Plan {
    /// Decides the effective resolution for a line of
    /// `total_distance_m`.
    ///
    /// When `floor(total / resolution)` exceeds `max_points` the
    /// resolution becomes `total / max_points` rounded to one decimal.
    #[allow(clippy::cast_precision_loss)]
    pub fn new(total_distance_m: C, resolution_m: C, max_points: usize) -> Result<Self, ProfileError> {
        if !(resolution_m.is_finite() && resolution_m > 0.0) {
            return Err(ProfileError::InvalidResolution(resolution_m));
        }
        if max_points == 0 {
            return Err(ProfileError::InvalidMaxPoints);
        }

        let naive = sample_count(total_distance_m, resolution_m);
        let mut plan = Self {
            requested_resolution_m: resolution_m,
            resolution_m,
            total_samples: naive,
            warning: None,
        };

        if naive > max_points {
            let mut resolution_m = round_to_tenth(total_distance_m / max_points as C).max(TENTH);
            // Rounding down can leave a few samples too many.
            while sample_count(total_distance_m, resolution_m) > max_points {
                resolution_m = round_to_tenth(resolution_m + TENTH);
            }
            plan.resolution_m = resolution_m;
            plan.total_samples = sample_count(total_distance_m, resolution_m);
            warn!(
                "resolution enlarged; requested: {}, effective: {}, max_points: {}",
                plan.requested_resolution_m, plan.resolution_m, max_points
            );
        } else if naive <= 1 {
            let warning = SamplingWarning::InsufficientSamples { samples: naive };
            warn!("{warning}");
            plan.warning = Some(warning);
        }

        debug!(
            "plan; distance: {total_distance_m}, resolution: {}, samples: {}",
            plan.resolution_m, plan.total_samples
        );

        Ok(plan)
    }

    pub fn is_adjusted(&self) -> bool {
        self.resolution_m != self.requested_resolution_m
    }

    /// Number of points a completed run returns.
    pub fn point_count(&self) -> usize {
        self.total_samples + 1
    }
}

const TENTH: C = 0.1;

/// Rounds half away from zero to one decimal place.
fn round_to_tenth(value: C) -> C {
    (value * 10.0).round() / 10.0
}

/// `floor(total / resolution)`, capped so that the point count
/// (`count + 1`) still fits in a `usize`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn sample_count(total_distance_m: C, resolution_m: C) -> usize {
    let count = (total_distance_m / resolution_m).floor();
    if count.is_finite() && count > 0.0 {
        (count as usize).min(usize::MAX - 1)
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::{round_to_tenth, Plan, SamplingWarning};
    use crate::ProfileError;
    use approx::assert_relative_eq;

    #[test]
    fn test_within_budget() {
        let plan = Plan::new(1000.0, 100.0, 50).unwrap();
        assert_eq!(plan.resolution_m, 100.0);
        assert_eq!(plan.total_samples, 10);
        assert_eq!(plan.point_count(), 11);
        assert!(!plan.is_adjusted());
        assert_eq!(plan.warning, None);
    }

    #[test]
    fn test_over_budget_rounds_to_one_decimal() {
        // 10_000 / 3 = 3333.33.. -> 3333.3
        let plan = Plan::new(10_000.0, 1.0, 3).unwrap();
        assert_relative_eq!(plan.resolution_m, 3333.3);
        assert_eq!(plan.total_samples, 3);
        assert!(plan.is_adjusted());

        // 1000 / 7 = 142.857.. -> 142.9 rounds up, not down.
        let plan = Plan::new(1000.0, 1.0, 7).unwrap();
        assert_relative_eq!(plan.resolution_m, 142.9);
        assert_eq!(plan.total_samples, 6);
    }

    #[test]
    fn test_over_budget_never_exceeds_max_points() {
        // 134 / 100 = 1.34 -> 1.3 would give 103 samples.
        let plan = Plan::new(134.0, 0.5, 100).unwrap();
        assert_relative_eq!(plan.resolution_m, 1.4);
        assert!(plan.total_samples <= 100);

        for (distance, max_points) in [(1_234.5, 17), (98_765.4, 1000), (3.0, 40), (0.5, 2)] {
            let plan = Plan::new(distance, 0.01, max_points).unwrap();
            assert!(plan.resolution_m > 0.0);
            assert!(plan.total_samples <= max_points, "{distance} {max_points}");
        }
    }

    #[test]
    fn test_too_few_samples_warns() {
        let plan = Plan::new(150.0, 100.0, 50).unwrap();
        assert_eq!(plan.total_samples, 1);
        assert_eq!(plan.warning, Some(SamplingWarning::InsufficientSamples { samples: 1 }));

        let plan = Plan::new(0.0, 10.0, 50).unwrap();
        assert_eq!(plan.total_samples, 0);
        assert_eq!(plan.point_count(), 1);
        assert!(plan.warning.is_some());
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(matches!(
            Plan::new(100.0, 0.0, 10),
            Err(ProfileError::InvalidResolution(_))
        ));
        assert!(matches!(
            Plan::new(100.0, f64::NAN, 10),
            Err(ProfileError::InvalidResolution(_))
        ));
        assert!(matches!(Plan::new(100.0, 1.0, 0), Err(ProfileError::InvalidMaxPoints)));
    }

    #[test]
    fn test_unbounded_cap_keeps_point_count_in_range() {
        let plan = Plan::new(1e7, 1e-300, usize::MAX).unwrap();
        assert!(!plan.is_adjusted());
        assert_eq!(plan.total_samples, usize::MAX - 1);
        assert_eq!(plan.point_count(), usize::MAX);
    }

    #[test]
    fn test_round_to_tenth() {
        assert_relative_eq!(round_to_tenth(2.25), 2.3);
        assert_relative_eq!(round_to_tenth(2.24), 2.2);
        assert_relative_eq!(round_to_tenth(0.04), 0.0);
    }
}
