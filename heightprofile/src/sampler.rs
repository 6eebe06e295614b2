//! Cancellable, incremental height sampling along a polyline.

use crate::{
    geodesy::wgs84_to_mercator, Cartographic, ElevationType, HeightProvider, HeightQueryError,
    LinearSpline, Plan, Polyline, ProfileError, SamplingConfig, SamplingWarning, Segments, C,
};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use tokio::{sync::mpsc, task::JoinHandle};

/// One profile sample: WGS84 degrees and a provider-supplied height.
///
/// Serializes as `[lon, lat, height]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[C; 3]", into = "[C; 3]")]
pub struct SamplePoint {
    pub lon: C,
    pub lat: C,
    pub height: C,
}

impl SamplePoint {
    /// Returns `[x, y, height]` in EPSG:3857.
    pub fn to_web_mercator(&self) -> [C; 3] {
        let (x, y) = wgs84_to_mercator(self.lon, self.lat);
        [x, y, self.height]
    }

    pub fn cartographic(&self) -> Cartographic {
        Cartographic::new(self.lon, self.lat, self.height)
    }
}

impl From<[C; 3]> for SamplePoint {
    fn from([lon, lat, height]: [C; 3]) -> Self {
        Self { lon, lat, height }
    }
}

impl From<SamplePoint> for [C; 3] {
    fn from(SamplePoint { lon, lat, height }: SamplePoint) -> Self {
        [lon, lat, height]
    }
}

impl From<Cartographic> for SamplePoint {
    fn from(Cartographic { lon, lat, height }: Cartographic) -> Self {
        Self { lon, lat, height }
    }
}

/// Cooperative cancellation flag shared between a run and its
/// callers.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    /// Requests cancellation. Idempotent; takes effect at the next
    /// sample boundary and never interrupts an in-flight query.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// How a sampling run ended.
///
/// Partial results are never returned: `Cancelled` and `Failed`
/// discard whatever was sampled before.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Complete(Vec<SamplePoint>),
    Cancelled,
    Failed(HeightQueryError),
}

impl Outcome {
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete(_))
    }

    pub fn points(self) -> Option<Vec<SamplePoint>> {
        match self {
            Self::Complete(points) => Some(points),
            _ => None,
        }
    }
}

/// Handle to a spawned sampling run.
///
/// Dropping the handle cancels the run.
pub struct SamplingRun {
    plan: Plan,
    cancel: CancelHandle,
    progress: Option<mpsc::UnboundedReceiver<C>>,
    /// `None` once `ready` has taken it.
    task: Option<JoinHandle<Outcome>>,
}

impl SamplingRun {
    /// Effective resolution in meters, possibly enlarged from the
    /// requested one.
    pub fn resolution(&self) -> C {
        self.plan.resolution_m
    }

    /// Index of the last sample.
    pub fn total_samples(&self) -> usize {
        self.plan.total_samples
    }

    pub fn warning(&self) -> Option<SamplingWarning> {
        self.plan.warning
    }

    pub fn plan(&self) -> &Plan {
        &self.plan
    }

    /// Takes the progress stream.
    ///
    /// Yields `index / total_samples` after every sample, in order.
    /// Returns `None` once taken.
    pub fn progress(&mut self) -> Option<mpsc::UnboundedReceiver<C>> {
        self.progress.take()
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Waits for the run to end.
    pub async fn ready(mut self) -> Outcome {
        let Some(task) = self.task.take() else {
            return Outcome::Failed(HeightQueryError::Aborted("run already awaited".to_string()));
        };
        match task.await {
            Ok(outcome) => outcome,
            Err(e) => Outcome::Failed(HeightQueryError::Aborted(e.to_string())),
        }
    }
}

impl Drop for SamplingRun {
    fn drop(&mut self) {
        if self.task.as_ref().is_some_and(|task| !task.is_finished()) {
            debug!("sampling run dropped; cancelling");
        }
        self.cancel.cancel();
    }
}

/// Plans a run over `polyline` and spawns it on the current tokio
/// runtime.
///
/// Geometry and parameter errors are returned before anything is
/// spawned. The query for the first sample is committed by this call:
/// cancellation is first observed before the second sample.
///
/// # Panics
///
/// Panics when called outside a tokio runtime.
pub fn start_sampling(
    polyline: &Polyline,
    config: &SamplingConfig,
    provider: Arc<dyn HeightProvider>,
) -> Result<SamplingRun, ProfileError> {
    config.validate()?;
    let vertices = polyline.to_cartographic();
    let segments = Segments::new(&vertices)?;
    let plan = Plan::new(segments.total_m(), config.resolution_m, config.max_points)?;
    let spline = LinearSpline::from_segments(&vertices, &segments, plan.resolution_m);

    debug!(
        "start sampling; vertices: {}, distance: {}, points: {}, mode: {}",
        vertices.len(),
        segments.total_m(),
        plan.point_count(),
        config.elevation_type
    );

    let (progress_tx, progress_rx) = mpsc::unbounded_channel();
    let cancel = CancelHandle::default();
    let sampler = Sampler {
        spline,
        total_samples: plan.total_samples,
        mode: config.elevation_type,
        provider,
        cancel: cancel.clone(),
        progress: progress_tx,
    };
    let task = tokio::spawn(sampler.run());

    Ok(SamplingRun {
        plan,
        cancel,
        progress: Some(progress_rx),
        task: Some(task),
    })
}

/// Samples `polyline` to completion, ignoring progress.
pub async fn sample_profile(
    polyline: &Polyline,
    config: &SamplingConfig,
    provider: Arc<dyn HeightProvider>,
) -> Result<(Plan, Outcome), ProfileError> {
    let run = start_sampling(polyline, config, provider)?;
    let plan = *run.plan();
    Ok((plan, run.ready().await))
}

/// Upper bound on the points reserved up front; larger runs grow the
/// buffer as they go.
const MAX_PREALLOCATED_POINTS: usize = 1 << 16;

struct Sampler {
    spline: LinearSpline,
    total_samples: usize,
    mode: ElevationType,
    provider: Arc<dyn HeightProvider>,
    cancel: CancelHandle,
    progress: mpsc::UnboundedSender<C>,
}

impl Sampler {
    #[allow(clippy::cast_precision_loss)]
    async fn run(self) -> Outcome {
        let now = std::time::Instant::now();
        let mut points = Vec::with_capacity(self.total_samples.min(MAX_PREALLOCATED_POINTS) + 1);

        for index in 0..=self.total_samples {
            if index > 0 && self.cancel.is_cancelled() {
                info!("sampling cancelled at {index}/{}", self.total_samples);
                return Outcome::Cancelled;
            }

            let position = self.spline.evaluate(index as C).to_cartographic();
            let sampled = match self.provider.query_height(position, self.mode).await {
                Ok(sampled) => sampled,
                Err(e) => {
                    warn!("sampling failed at {index}/{}: {e}", self.total_samples);
                    return Outcome::Failed(e);
                }
            };

            let fraction = if self.total_samples == 0 {
                1.0
            } else {
                index as C / self.total_samples as C
            };
            // The receiver may have been dropped.
            let _ = self.progress.send(fraction);

            points.push(SamplePoint::from(sampled));
        }

        debug!("sampling complete; len: {}, exec: {:?}", points.len(), now.elapsed());
        Outcome::Complete(points)
    }
}
