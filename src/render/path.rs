//! Strategy dispatch and the shared per-call render context.

use std::cell::RefCell;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::config::RendererConfig;
use crate::datasource::SampleSource;
use crate::error::RenderError;
use crate::geom::{ScreenPoint, ScreenRect};
use crate::job::RenderJob;
use crate::transform::SampleMapping;

use super::{
    Clock, Color, ColumnContinuation, Continuation, MonotonicClock, OffsetRng, Strategy, Surface,
    average, gradual, label, logarithmic, minmax, random_offsets, select_strategy, sparse,
};

/// Incremental waveform path renderer.
///
/// Owns the tunables, the shuffle generator and the clock used for frame
/// budgeting. One renderer may serve many jobs, but only one job per surface
/// may be in flight at a time.
#[derive(Debug, Clone)]
pub struct PathRenderer<R = fastrand::Rng, C = MonotonicClock> {
    config: RendererConfig,
    rng: R,
    clock: C,
}

impl PathRenderer {
    /// Create a renderer with default settings, a random shuffle and the
    /// monotonic wall clock.
    pub fn new() -> Self {
        Self::with_parts(
            RendererConfig::default(),
            fastrand::Rng::new(),
            MonotonicClock::new(),
        )
    }
}

impl Default for PathRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: OffsetRng, C: Clock> PathRenderer<R, C> {
    /// Create a renderer from explicit parts.
    pub fn with_parts(config: RendererConfig, rng: R, clock: C) -> Self {
        Self { config, rng, clock }
    }

    /// Access the configuration.
    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    /// Replace the configuration. In-flight continuations keep their state.
    pub fn set_config(&mut self, config: RendererConfig) {
        self.config = config;
    }

    /// Run one bounded slice of work for `job`.
    ///
    /// Pass `None` to start a job. A returned continuation must be passed
    /// back with the same job on the next call; `Ok(None)` means the path and
    /// its label are complete.
    pub fn render_step(
        &mut self,
        surface: &mut dyn Surface,
        job: &RenderJob<'_>,
        continuation: Option<Continuation>,
    ) -> Result<Option<Continuation>, RenderError> {
        let (width, height) = surface.size();
        if width == 0 || height == 0 {
            return Err(RenderError::SurfaceUnavailable { width, height });
        }
        let rate = job.source.sampling_rate();
        if !rate.is_finite() || rate <= 0.0 {
            return Err(RenderError::InvalidSamplingRate(rate));
        }

        let strategy = select_strategy(job);
        if let Some(found) = continuation.as_ref().map(Continuation::strategy) {
            if found != strategy {
                return Err(RenderError::ContinuationMismatch {
                    expected: strategy,
                    found,
                });
            }
        }
        if continuation.is_none() {
            debug!(
                ?strategy,
                samples = job.source.len(),
                width,
                height,
                "starting waveform path"
            );
        }

        let label_anchor = continuation.as_ref().and_then(Continuation::label_anchor);
        let mut cx = StepContext::new(
            surface,
            job,
            &self.config,
            &mut self.rng,
            &self.clock,
            label_anchor,
        );

        let next = match strategy {
            Strategy::Sparse => {
                sparse::render(&mut cx);
                None
            }
            Strategy::Average => {
                average::render(&mut cx, continuation.and_then(Continuation::into_columns))
                    .map(Continuation::Columns)
            }
            Strategy::MinMax => {
                minmax::render(&mut cx, continuation.and_then(Continuation::into_columns))
                    .map(Continuation::Columns)
            }
            Strategy::Gradual => {
                gradual::render(&mut cx, continuation.and_then(Continuation::into_gradual))
                    .map(Continuation::Gradual)
            }
            Strategy::Logarithmic => logarithmic::render(
                &mut cx,
                continuation.and_then(Continuation::into_logarithmic),
            )
            .map(Continuation::Logarithmic),
        };

        match next {
            Some(mut next) => {
                next.set_label_anchor(cx.label_anchor);
                Ok(Some(next))
            }
            None => {
                if let (Some(text), Some(anchor)) = (job.label, cx.label_anchor) {
                    label::draw(cx.surface, text, anchor, job.color, &self.config);
                }
                debug!(?strategy, "waveform path complete");
                Ok(None)
            }
        }
    }
}

thread_local! {
    static DEFAULT_RENDERER: RefCell<PathRenderer> = RefCell::new(PathRenderer::new());
}

/// Run one slice of `job` with the thread's default renderer.
///
/// See [`PathRenderer::render_step`].
pub fn render_waveform_path(
    surface: &mut dyn Surface,
    job: &RenderJob<'_>,
    continuation: Option<Continuation>,
) -> Result<Option<Continuation>, RenderError> {
    DEFAULT_RENDERER.with_borrow_mut(|renderer| renderer.render_step(surface, job, continuation))
}

/// State shared by the strategies during one render call.
pub(super) struct StepContext<'a> {
    pub(super) surface: &'a mut dyn Surface,
    pub(super) source: &'a dyn SampleSource,
    pub(super) mapping: SampleMapping<'a>,
    pub(super) config: &'a RendererConfig,
    pub(super) color: Color,
    rng: &'a mut dyn OffsetRng,
    clock: &'a dyn Clock,
    pub(super) width: f64,
    pub(super) height: f64,
    /// Pixel of the first visible X value.
    pub(super) x_from_px: f64,
    /// Pixel of the last visible X value.
    pub(super) x_to_px: f64,
    pub(super) label_anchor: Option<ScreenPoint>,
}

impl<'a> StepContext<'a> {
    fn new(
        surface: &'a mut dyn Surface,
        job: &RenderJob<'a>,
        config: &'a RendererConfig,
        rng: &'a mut dyn OffsetRng,
        clock: &'a dyn Clock,
        label_anchor: Option<ScreenPoint>,
    ) -> Self {
        let (width, height) = surface.size();
        let height = f64::from(height);
        let x = job.x_axis;
        Self {
            surface,
            source: job.source,
            mapping: SampleMapping::new(job.x_axis, job.y_axis, job.source, height),
            config,
            color: job.color,
            rng,
            clock,
            width: f64::from(width),
            height,
            x_from_px: x.value_to_px(x.from_value()),
            x_to_px: x.value_to_px(x.to_value()),
            label_anchor,
        }
    }

    pub(super) fn rng(&mut self) -> &mut dyn OffsetRng {
        &mut *self.rng
    }

    /// Clear the whole surface.
    pub(super) fn clear(&mut self) {
        let rect = ScreenRect::from_origin_size(0.0, 0.0, self.width as f32, self.height as f32);
        self.surface.clear_rect(rect);
    }

    /// Move the label anchor to `point` if it lies right of the current one.
    pub(super) fn track_label(&mut self, point: ScreenPoint) {
        match self.label_anchor {
            Some(anchor) if point.x <= anchor.x => {}
            _ => self.label_anchor = Some(point),
        }
    }

    /// Visit the visible pixel columns in shuffled order until done or out
    /// of time.
    ///
    /// `visit` receives the left edge of each column. At least one column is
    /// visited per call, so every call makes progress.
    pub(super) fn walk_columns(
        &mut self,
        strategy: Strategy,
        state: Option<ColumnContinuation>,
        mut visit: impl FnMut(&mut Self, f64),
    ) -> Option<ColumnContinuation> {
        let x_from = self.x_from_px.round();
        let (offsets, mut offset) = match state {
            Some(state) => (state.offsets, state.offset),
            None => {
                self.clear();
                let columns = self.x_to_px.round() - x_from;
                let columns = if columns > 0.0 { columns as usize } else { 0 };
                let offsets: Arc<[usize]> = random_offsets(columns, self.rng()).into();
                (offsets, 0)
            }
        };

        let start = self.clock.now_ms();
        let mut visited = 0usize;
        while offset < offsets.len() {
            if visited > 0 && self.clock.now_ms() - start > self.config.frame_budget_ms {
                trace!(?strategy, offset, columns = offsets.len(), "frame budget spent");
                return Some(ColumnContinuation {
                    strategy,
                    offsets,
                    offset,
                    label_anchor: self.label_anchor,
                });
            }
            visit(self, x_from + offsets[offset] as f64);
            offset += 1;
            visited += 1;
        }
        None
    }
}
