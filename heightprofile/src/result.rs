use crate::{ElevationType, Outcome, Plan, SamplePoint, C};
use serde::{Deserialize, Serialize};

/// A completed, named height profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileResult {
    pub name: String,

    /// Display title; defaults to `name`.
    pub title: String,

    /// Spacing between consecutive points in meters.
    pub resolution_m: C,

    pub elevation_type: ElevationType,

    /// Layers that were visible when the profile was sampled.
    #[serde(default)]
    pub layer_names: Vec<String>,

    pub points: Vec<SamplePoint>,
}

impl ProfileResult {
    pub fn new(
        name: impl Into<String>,
        plan: &Plan,
        elevation_type: ElevationType,
        points: Vec<SamplePoint>,
    ) -> Self {
        let name = name.into();
        Self {
            title: name.clone(),
            name,
            resolution_m: plan.resolution_m,
            elevation_type,
            layer_names: Vec::new(),
            points,
        }
    }

    /// Returns a result for complete outcomes only.
    pub fn from_outcome(
        name: impl Into<String>,
        plan: &Plan,
        elevation_type: ElevationType,
        outcome: Outcome,
    ) -> Option<Self> {
        outcome
            .points()
            .map(|points| Self::new(name, plan, elevation_type, points))
    }

    /// Chart data: `(distance along the line, height)` per point.
    #[allow(clippy::cast_precision_loss)]
    pub fn series(&self) -> Vec<(C, C)> {
        self.points
            .iter()
            .enumerate()
            .map(|(idx, point)| (idx as C * self.resolution_m, point.height))
            .collect()
    }

    /// Distance covered by the sampled points.
    #[allow(clippy::cast_precision_loss)]
    pub fn length_m(&self) -> C {
        self.points.len().saturating_sub(1) as C * self.resolution_m
    }

    /// The point sampled at `distance_m` along the line, if any.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn point_at_distance(&self, distance_m: C) -> Option<&SamplePoint> {
        let index = (distance_m / self.resolution_m).round();
        if index.is_finite() && index >= 0.0 {
            self.points.get(index as usize)
        } else {
            None
        }
    }

    /// Lowest and highest sampled heights.
    pub fn height_range(&self) -> Option<(C, C)> {
        self.points.iter().map(|p| p.height).fold(None, |range, h| match range {
            None => Some((h, h)),
            Some((lo, hi)) => Some((lo.min(h), hi.max(h))),
        })
    }

    /// Formats a height with `decimal_places` decimals, dropping an
    /// all-zero fraction (`12.0` -> `12`).
    pub fn format_height(value: C, decimal_places: usize) -> String {
        let fixed = format!("{value:.decimal_places$}");
        match fixed.split_once('.') {
            Some((integer, fraction)) if fraction.bytes().all(|b| b == b'0') => integer.to_string(),
            _ => fixed,
        }
    }
}
