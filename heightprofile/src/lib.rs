//! # Height profiles
//!
//! `heightprofile` turns a polyline drawn on a map into an evenly
//! spaced sequence of sample points and asks a [`HeightProvider`]
//! for the surface height at each one.
//!
//! The pipeline is:
//!
//! 1. [`Segments`] measures the geodesic length of every segment.
//! 1. [`Plan`] picks the effective resolution and the number of
//!    samples, enlarging the requested resolution when the line would
//!    otherwise exceed the point budget.
//! 1. [`LinearSpline`] parameterizes the vertices by arc length.
//! 1. [`start_sampling`] walks the spline one sample at a time,
//!    awaiting the height provider for each, reporting progress and
//!    honoring cancellation between samples.

mod config;
mod error;
pub mod geodesy;
mod measure;
mod plan;
mod polyline;
mod provider;
mod result;
mod sampler;
mod scale;
mod spline;
mod teardown;

pub use crate::{
    config::SamplingConfig,
    error::{HeightQueryError, ProfileError},
    geodesy::{Cartesian3, Cartographic, CoordinateSystem, Segment, Segments},
    measure::{side_lengths, Measurement},
    plan::{Plan, SamplingWarning},
    polyline::Polyline,
    provider::{ElevationType, HeightProvider},
    result::ProfileResult,
    sampler::{sample_profile, start_sampling, CancelHandle, Outcome, SamplePoint, SamplingRun},
    scale::ChartFrame,
    spline::LinearSpline,
    teardown::Teardown,
};
pub use geo;

/// Floating point type used for all coordinates and distances.
pub type C = f64;
