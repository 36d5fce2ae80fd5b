use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use gpui::prelude::*;
use gpui::{
    MouseButton, MouseDownEvent, MouseMoveEvent, MouseUpEvent, Pixels, Point, ScrollWheelEvent,
    Window, canvas, div, px,
};
use tracing::warn;

use crate::axis::AxisController;
use crate::config::RendererConfig;
use crate::datasource::SampleBuffer;
use crate::geom::{ScreenPoint, ScreenRect};
use crate::interaction::{pan_axis, zoom_axis, zoom_factor_from_scroll};
use crate::job::{RenderAlgorithm, RenderJob};
use crate::render::{Color, RenderList};
use crate::scheduler::RenderDriver;
use crate::transform::AxisTransform;
use crate::view::Range;

use super::paint::{paint_commands, to_hsla};
use super::text::GpuiTextMeasurer;

struct WaveformState {
    x_axis: AxisController,
    y_axis: AxisController,
    driver: RenderDriver,
    surface: Option<RenderList<GpuiTextMeasurer>>,
    color: Color,
    background: Color,
    label: Option<String>,
    algorithm: RenderAlgorithm,
    /// Keep the X axis fitted to the whole buffer until the user pans or zooms.
    follow: bool,
    /// Canvas bounds in window coordinates.
    bounds: Option<ScreenRect>,
    drag_last_x: Option<f32>,
}

/// A GPUI view that renders a live [`SampleBuffer`] as a waveform.
///
/// Rendering runs incrementally: each frame resumes the previous slice and
/// requests another animation frame until the path is complete. Scrolling
/// zooms the time axis around the cursor, dragging pans it, and a double
/// click fits the whole buffer again.
#[derive(Clone)]
pub struct WaveformView {
    samples: Arc<RwLock<SampleBuffer>>,
    state: Arc<Mutex<WaveformState>>,
}

impl WaveformView {
    /// Create a view for `samples` with a fixed value range.
    pub fn new(samples: SampleBuffer, value_range: Range) -> Self {
        let time = Range::new(0.0, samples.duration().max(f64::MIN_POSITIVE));
        Self {
            samples: Arc::new(RwLock::new(samples)),
            state: Arc::new(Mutex::new(WaveformState {
                x_axis: AxisController::linear(time, 1.0),
                y_axis: AxisController::linear(value_range, 1.0),
                driver: RenderDriver::new(),
                surface: None,
                color: Color::from_rgb8(0x1f, 0x77, 0xb4),
                background: Color::WHITE,
                label: None,
                algorithm: RenderAlgorithm::default(),
                follow: true,
                bounds: None,
                drag_last_x: None,
            })),
        }
    }

    /// Set the waveform color.
    pub fn with_color(self, color: Color) -> Self {
        lock(&self.state).color = color;
        self
    }

    /// Set the background color.
    pub fn with_background(self, color: Color) -> Self {
        lock(&self.state).background = color;
        self
    }

    /// Set the label drawn next to the rightmost point.
    pub fn with_label(self, label: impl Into<String>) -> Self {
        lock(&self.state).label = Some(label.into());
        self
    }

    /// Set the aggregation hint for dense views.
    pub fn with_algorithm(self, algorithm: RenderAlgorithm) -> Self {
        lock(&self.state).algorithm = algorithm;
        self
    }

    /// Replace the renderer configuration.
    pub fn with_config(self, config: RendererConfig) -> Self {
        {
            let mut state = lock(&self.state);
            state.driver.renderer_mut().set_config(config);
            state.driver.invalidate();
        }
        self
    }

    /// Get a handle for appending samples.
    ///
    /// This is useful for streaming updates from async tasks.
    pub fn samples_handle(&self) -> WaveformHandle {
        WaveformHandle {
            samples: Arc::clone(&self.samples),
        }
    }

    fn on_mouse_down(&mut self, ev: &MouseDownEvent, cx: &mut Context<Self>) {
        let pos = screen_point(ev.position);
        let mut state = lock(&self.state);
        if !state.bounds.is_some_and(|bounds| contains(bounds, pos)) {
            return;
        }
        if ev.click_count >= 2 {
            state.follow = true;
            state.drag_last_x = None;
        } else {
            state.drag_last_x = Some(pos.x);
        }
        cx.notify();
    }

    fn on_mouse_move(&mut self, ev: &MouseMoveEvent, cx: &mut Context<Self>) {
        let pos = screen_point(ev.position);
        let mut state = lock(&self.state);
        let Some(last) = state.drag_last_x else {
            return;
        };
        let delta = pos.x - last;
        if delta == 0.0 {
            return;
        }
        state.follow = false;
        pan_axis(&mut state.x_axis, delta);
        state.drag_last_x = Some(pos.x);
        cx.notify();
    }

    fn on_mouse_up(&mut self, _ev: &MouseUpEvent, cx: &mut Context<Self>) {
        lock(&self.state).drag_last_x = None;
        cx.notify();
    }

    fn on_scroll(&mut self, ev: &ScrollWheelEvent, _window: &Window, cx: &mut Context<Self>) {
        let pos = screen_point(ev.position);
        let mut state = lock(&self.state);
        let Some(bounds) = state.bounds.filter(|bounds| contains(*bounds, pos)) else {
            return;
        };
        let delta = ev.delta.pixel_delta(px(16.0));
        let delta_y = f32::from(delta.y);
        if delta_y.abs() < 0.01 {
            return;
        }
        state.follow = false;
        zoom_axis(
            &mut state.x_axis,
            pos.x - bounds.min.x,
            zoom_factor_from_scroll(delta_y),
        );
        cx.notify();
    }
}

impl Render for WaveformView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let samples = Arc::clone(&self.samples);
        let state = Arc::clone(&self.state);
        let paint_state = Arc::clone(&self.state);
        let background = lock(&self.state).background;

        div()
            .size_full()
            .bg(to_hsla(background))
            .child(
                canvas(
                    move |bounds, window, _| {
                        let samples = samples.read().unwrap_or_else(PoisonError::into_inner);
                        let mut state = lock(&state);
                        render_frame(&samples, &mut state, bounds, window);
                    },
                    move |bounds, (), window, cx| {
                        let state = lock(&paint_state);
                        if let Some(surface) = state.surface.as_ref() {
                            paint_commands(surface.commands(), bounds.origin, window, cx);
                        }
                    },
                )
                .size_full(),
            )
            .on_mouse_down(
                MouseButton::Left,
                cx.listener(|this, ev, _, cx| {
                    this.on_mouse_down(ev, cx);
                }),
            )
            .on_mouse_move(cx.listener(|this, ev, _, cx| {
                this.on_mouse_move(ev, cx);
            }))
            .on_mouse_up(
                MouseButton::Left,
                cx.listener(|this, ev, _, cx| {
                    this.on_mouse_up(ev, cx);
                }),
            )
            .on_scroll_wheel(cx.listener(|this, ev, window, cx| {
                this.on_scroll(ev, window, cx);
            }))
    }
}

/// Advance the in-flight render by one frame.
fn render_frame(
    samples: &SampleBuffer,
    state: &mut WaveformState,
    bounds: gpui::Bounds<Pixels>,
    window: &mut Window,
) {
    let origin = screen_point(bounds.origin);
    let width = f32::from(bounds.size.width).round().max(0.0);
    let height = f32::from(bounds.size.height).round().max(0.0);
    state.bounds = Some(ScreenRect::from_origin_size(origin.x, origin.y, width, height));

    if state.follow {
        let time = Range::new(0.0, samples.duration().max(f64::MIN_POSITIVE));
        state.x_axis.set_limits(time);
        state.x_axis.set_visible(time);
    }
    state.x_axis.set_distance_px(f64::from(width));
    state.y_axis.set_distance_px(f64::from(height));

    let size = (width as u32, height as u32);
    let measurer = GpuiTextMeasurer::new(window);
    let surface = state
        .surface
        .get_or_insert_with(|| RenderList::with_measurer(size.0, size.1, measurer.clone()));
    if surface.bounds().width() as u32 != size.0 || surface.bounds().height() as u32 != size.1 {
        surface.resize(size.0, size.1);
    }
    surface.set_measurer(measurer);

    let mut job = RenderJob::new(samples, &state.x_axis, &state.y_axis, state.color)
        .with_algorithm(state.algorithm);
    if let Some(label) = state.label.as_deref() {
        job = job.with_label(label);
    }
    match state.driver.frame(surface, &job) {
        Ok(status) if status.needs_frame() => window.request_animation_frame(),
        Ok(_) => {}
        Err(err) => {
            warn!(%err, x_from = job.x_axis.from_value(), "waveform frame failed");
        }
    }
}

/// A handle for appending to the [`SampleBuffer`] shown by a [`WaveformView`].
///
/// The handle clones cheaply and can be moved into async tasks.
#[derive(Clone)]
pub struct WaveformHandle {
    samples: Arc<RwLock<SampleBuffer>>,
}

impl WaveformHandle {
    /// Read the samples.
    ///
    /// The buffer is locked for the duration of the callback.
    pub fn read<R>(&self, f: impl FnOnce(&SampleBuffer) -> R) -> R {
        let samples = self.samples.read().unwrap_or_else(PoisonError::into_inner);
        f(&samples)
    }

    /// Mutate the samples.
    ///
    /// The buffer is locked for the duration of the callback.
    pub fn write<R>(&self, f: impl FnOnce(&mut SampleBuffer) -> R) -> R {
        let mut samples = self.samples.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut samples)
    }

    /// Append samples, returning how many were added.
    pub fn extend(&self, values: impl IntoIterator<Item = f64>) -> usize {
        self.write(|samples| samples.extend(values))
    }
}

fn lock(state: &Mutex<WaveformState>) -> MutexGuard<'_, WaveformState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

fn screen_point(point: Point<Pixels>) -> ScreenPoint {
    ScreenPoint::new(f32::from(point.x), f32::from(point.y))
}

fn contains(rect: ScreenRect, point: ScreenPoint) -> bool {
    point.x >= rect.min.x && point.x <= rect.max.x && point.y >= rect.min.y && point.y <= rect.max.y
}
