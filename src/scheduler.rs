//! Frame-driven resumption of render jobs.
//!
//! [`RenderDriver`] threads continuations from one animation frame to the
//! next and restarts the job whenever its inputs change (axis ranges, surface
//! size, source length, strategy).

use tracing::{debug, warn};

use crate::error::RenderError;
use crate::job::RenderJob;
use crate::render::{
    Clock, Color, Continuation, MonotonicClock, OffsetRng, PathRenderer, Strategy, Surface,
    select_strategy,
};
use crate::transform::AxisTransform;

/// Outcome of one driven frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    /// More frames are needed.
    Pending {
        /// Whether the partial result should be presented now.
        commit_always: bool,
    },
    /// The job finished during this frame.
    Complete,
    /// The job was already complete; nothing was drawn.
    Idle,
}

impl FrameStatus {
    /// Whether another frame should be requested.
    pub fn needs_frame(self) -> bool {
        matches!(self, Self::Pending { .. })
    }
}

/// Inputs that invalidate an in-flight render when they change.
#[derive(Debug, Clone, PartialEq)]
struct JobKey {
    x: (f64, f64, f64),
    y: (f64, f64, f64),
    size: (u32, u32),
    samples: usize,
    sampling_rate: f64,
    strategy: Strategy,
    color: Color,
    label: Option<String>,
}

impl JobKey {
    fn new(job: &RenderJob<'_>, size: (u32, u32)) -> Self {
        Self {
            x: axis_key(job.x_axis),
            y: axis_key(job.y_axis),
            size,
            samples: job.source.len(),
            sampling_rate: job.source.sampling_rate(),
            strategy: select_strategy(job),
            color: job.color,
            label: job.label.map(str::to_string),
        }
    }
}

fn axis_key(axis: &dyn AxisTransform) -> (f64, f64, f64) {
    (axis.from_value(), axis.to_value(), axis.scale())
}

/// Reference frame scheduler for one surface.
///
/// Call [`frame`](Self::frame) once per animation frame with a job built from
/// the current state; keep requesting frames while it reports
/// [`FrameStatus::Pending`].
#[derive(Debug)]
pub struct RenderDriver<R = fastrand::Rng, C = MonotonicClock> {
    renderer: PathRenderer<R, C>,
    key: Option<JobKey>,
    continuation: Option<Continuation>,
}

impl RenderDriver {
    /// Create a driver around a default renderer.
    pub fn new() -> Self {
        Self::with_renderer(PathRenderer::new())
    }
}

impl Default for RenderDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: OffsetRng, C: Clock> RenderDriver<R, C> {
    /// Create a driver around an explicit renderer.
    pub fn with_renderer(renderer: PathRenderer<R, C>) -> Self {
        Self {
            renderer,
            key: None,
            continuation: None,
        }
    }

    /// Access the renderer.
    pub fn renderer(&self) -> &PathRenderer<R, C> {
        &self.renderer
    }

    /// Access the renderer mutably.
    pub fn renderer_mut(&mut self) -> &mut PathRenderer<R, C> {
        &mut self.renderer
    }

    /// Whether a job is in flight.
    pub fn is_rendering(&self) -> bool {
        self.continuation.is_some()
    }

    /// Drop any in-flight job so the next frame starts from scratch.
    pub fn invalidate(&mut self) {
        self.key = None;
        self.continuation = None;
    }

    /// Run one frame of `job`.
    pub fn frame(
        &mut self,
        surface: &mut dyn Surface,
        job: &RenderJob<'_>,
    ) -> Result<FrameStatus, RenderError> {
        let key = JobKey::new(job, surface.size());
        if self.key.as_ref() == Some(&key) {
            if self.continuation.is_none() {
                return Ok(FrameStatus::Idle);
            }
        } else {
            if self.continuation.take().is_some() {
                debug!(strategy = ?key.strategy, "render inputs changed, restarting");
            }
            self.key = Some(key);
        }

        let continuation = self.continuation.take();
        let result = match self.renderer.render_step(surface, job, continuation) {
            Err(RenderError::ContinuationMismatch { expected, found }) => {
                warn!(?expected, ?found, "discarding continuation of another strategy");
                self.renderer.render_step(surface, job, None)
            }
            other => other,
        };

        match result {
            Ok(Some(next)) => {
                let commit_always = next.commit_always();
                self.continuation = Some(next);
                Ok(FrameStatus::Pending { commit_always })
            }
            Ok(None) => Ok(FrameStatus::Complete),
            Err(err) => {
                self.invalidate();
                Err(err)
            }
        }
    }

    /// Drive `job` to completion and return the number of frames it took.
    ///
    /// Returns 0 when the job was already complete.
    pub fn finish(
        &mut self,
        surface: &mut dyn Surface,
        job: &RenderJob<'_>,
    ) -> Result<usize, RenderError> {
        let mut frames = 0;
        loop {
            match self.frame(surface, job)? {
                FrameStatus::Pending { .. } => frames += 1,
                FrameStatus::Complete => return Ok(frames + 1),
                FrameStatus::Idle => return Ok(frames),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::AxisController;
    use crate::config::RendererConfig;
    use crate::datasource::SampleBuffer;
    use crate::render::{RenderList, SteppingClock, Unshuffled};
    use crate::view::Range;

    fn driver() -> RenderDriver<Unshuffled, SteppingClock> {
        RenderDriver::with_renderer(PathRenderer::with_parts(
            RendererConfig::default(),
            Unshuffled,
            SteppingClock::new(0.0),
        ))
    }

    #[test_log::test]
    fn gradual_job_takes_one_frame_per_pass() {
        let source = SampleBuffer::from_values(1.0, (0..10_000).map(|i| f64::from(i % 7)));
        let x = AxisController::linear(Range::new(0.0, 10_000.0), 100.0);
        let y = AxisController::linear(Range::new(0.0, 10.0), 100.0);
        let job = RenderJob::new(&source, &x, &y, Color::BLACK);
        let mut surface = RenderList::new(100, 100);
        let mut driver = driver();

        assert_eq!(
            driver.frame(&mut surface, &job),
            Ok(FrameStatus::Pending {
                commit_always: true
            })
        );
        assert!(driver.is_rendering());
        assert_eq!(driver.finish(&mut surface, &job), Ok(99));
        assert!(!driver.is_rendering());
        assert_eq!(driver.frame(&mut surface, &job), Ok(FrameStatus::Idle));
    }

    #[test]
    fn changed_inputs_restart_the_job() {
        let mut source = SampleBuffer::from_values(1.0, (0..10_000).map(|i| f64::from(i % 7)));
        let x = AxisController::linear(Range::new(0.0, 10_000.0), 100.0);
        let y = AxisController::linear(Range::new(0.0, 10.0), 100.0);
        let mut surface = RenderList::new(100, 100);
        let mut driver = driver();

        let job = RenderJob::new(&source, &x, &y, Color::BLACK);
        assert_eq!(driver.finish(&mut surface, &job), Ok(100));

        source.push(3.0);
        let job = RenderJob::new(&source, &x, &y, Color::BLACK);
        assert!(driver.frame(&mut surface, &job).expect("frame").needs_frame());

        let zoomed = x.clone().with_visible(Range::new(0.0, 5_000.0));
        let job = RenderJob::new(&source, &zoomed, &y, Color::BLACK);
        assert_eq!(driver.finish(&mut surface, &job), Ok(50));
    }

    #[test]
    fn sparse_job_completes_in_one_frame() {
        let source = SampleBuffer::from_values(1.0, [1.0, 2.0, 3.0]);
        let x = AxisController::linear(Range::new(0.0, 3.0), 90.0);
        let y = AxisController::linear(Range::new(0.0, 3.0), 90.0);
        let job = RenderJob::new(&source, &x, &y, Color::BLACK);
        let mut surface = RenderList::new(90, 90);
        let mut driver = driver();
        assert_eq!(driver.frame(&mut surface, &job), Ok(FrameStatus::Complete));
        assert_eq!(driver.frame(&mut surface, &job), Ok(FrameStatus::Idle));
        driver.invalidate();
        assert_eq!(driver.frame(&mut surface, &job), Ok(FrameStatus::Complete));
    }

    #[test]
    fn errors_reset_the_driver() {
        let source = SampleBuffer::from_values(1.0, [1.0, 2.0, 3.0]);
        let x = AxisController::linear(Range::new(0.0, 3.0), 90.0);
        let y = AxisController::linear(Range::new(0.0, 3.0), 90.0);
        let job = RenderJob::new(&source, &x, &y, Color::BLACK);
        let mut driver = driver();
        let mut empty = RenderList::new(0, 0);
        assert!(driver.frame(&mut empty, &job).is_err());
        let mut surface = RenderList::new(90, 90);
        assert_eq!(driver.frame(&mut surface, &job), Ok(FrameStatus::Complete));
    }
}
