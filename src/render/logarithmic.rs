//! Polyline rendering for logarithmic time axes.
//!
//! Sample density varies wildly across a log axis, so instead of pixel
//! columns the strategy walks the sample window in fixed batches, merging
//! samples that land on the same pixel column. Points far from both
//! neighbours get a marker so isolated samples stay visible.

use tracing::trace;

use crate::geom::ScreenPoint;

use super::path::StepContext;
use super::{LineStyle, LogarithmicContinuation};

pub(super) fn render(
    cx: &mut StepContext<'_>,
    state: Option<LogarithmicContinuation>,
) -> Option<LogarithmicContinuation> {
    let mut state = match state {
        Some(mut state) => {
            state.b = state.b.min(cx.mapping.len());
            state
        }
        None => {
            cx.clear();
            start(cx)?
        }
    };

    let end = state.i.saturating_add(state.k).min(state.b);
    for index in state.i..end {
        let x = cx.mapping.index_to_px(index).round();
        let y = cx
            .mapping
            .value_to_canvas_y(cx.source.value(index))
            .round();
        if !x.is_finite() || !y.is_finite() {
            continue;
        }
        let point = ScreenPoint::new(x as f32, y as f32);
        match state.points.last_mut() {
            Some(last) if last.x == point.x => {
                if point.y < last.y {
                    last.y = point.y;
                }
            }
            _ => state.points.push(point),
        }
    }
    state.i = end;
    state.is_done = end == state.b;
    trace!(
        cursor = state.i,
        end = state.b,
        points = state.points.len(),
        "logarithmic batch consumed"
    );

    cx.clear();
    let style = LineStyle {
        color: cx.color,
        width: cx.config.logarithmic_line_width,
    };
    cx.surface.stroke_polyline(&state.points, style);

    let radius = cx.config.isolated_marker_radius;
    settle_markers(&mut state, 2.0 * radius);
    for &marker in &state.markers {
        cx.surface.fill_circle(state.points[marker], radius, cx.color);
    }
    // The last point may still merge with the next batch.
    if let Some(last) = state.points.len().checked_sub(1) {
        if is_isolated(&state.points, last, 2.0 * radius) {
            cx.surface.fill_circle(state.points[last], radius, cx.color);
        }
    }

    cx.label_anchor = state.points.last().copied();

    (!state.is_done).then_some(state)
}

fn start(cx: &StepContext<'_>) -> Option<LogarithmicContinuation> {
    let x = cx.mapping.x();
    let from_px = x.linear_value_to_px(x.from_value()).floor();
    let to_px = x.linear_value_to_px(x.to_value()).ceil();
    let a = cx.mapping.clamp_index(cx.mapping.px_to_index(from_px).floor() - 1.0) as usize;
    let b = cx.mapping.clamp_index(cx.mapping.px_to_index(to_px).ceil() + 1.0) as usize;
    if a >= b {
        return None;
    }
    Some(LogarithmicContinuation {
        i: a,
        b,
        k: cx.config.logarithmic_batch.max(1),
        points: Vec::new(),
        markers: Vec::new(),
        settled: 0,
        is_done: false,
        label_anchor: None,
    })
}

/// Record markers for every point whose neighbours can no longer change.
///
/// Only the last point can still move (its y merges with later samples) or
/// gain a right neighbour, so every earlier point is final.
fn settle_markers(state: &mut LogarithmicContinuation, spacing: f32) {
    let settled = state.points.len().saturating_sub(1);
    for index in state.settled..settled {
        if is_isolated(&state.points, index, spacing) {
            state.markers.push(index);
        }
    }
    state.settled = state.settled.max(settled);
}

fn is_isolated(points: &[ScreenPoint], index: usize, spacing: f32) -> bool {
    let point = points[index];
    let left = index == 0 || point.x - points[index - 1].x > spacing;
    let right = index + 1 == points.len() || points[index + 1].x - point.x > spacing;
    left && right
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::AxisController;
    use crate::config::RendererConfig;
    use crate::datasource::SampleBuffer;
    use crate::job::RenderJob;
    use crate::render::{
        Color, Continuation, DrawCommand, PathRenderer, RenderList, SteppingClock, Unshuffled,
    };
    use crate::view::Range;

    fn renderer(batch: usize) -> PathRenderer<Unshuffled, SteppingClock> {
        let config = RendererConfig {
            logarithmic_batch: batch,
            ..RendererConfig::default()
        };
        PathRenderer::with_parts(config, Unshuffled, SteppingClock::new(0.0))
    }

    fn run(batch: usize, source: &SampleBuffer, x: &AxisController) -> (RenderList, Vec<usize>) {
        let y = AxisController::linear(Range::new(-1.0, 1.0), 100.0);
        let job = RenderJob::new(source, x, &y, Color::BLACK);
        let mut surface = RenderList::new(300, 100);
        let mut renderer = renderer(batch);
        let mut cursors = Vec::new();
        let mut continuation = None;
        loop {
            continuation = renderer
                .render_step(&mut surface, &job, continuation)
                .expect("render");
            match &continuation {
                Some(Continuation::Logarithmic(log)) => cursors.push(log.cursor()),
                Some(other) => panic!("unexpected continuation {other:?}"),
                None => break,
            }
        }
        (surface, cursors)
    }

    fn sine(len: usize) -> SampleBuffer {
        SampleBuffer::from_values(1.0, (0..len).map(|i| (i as f64 * 0.05).sin()))
    }

    #[test_log::test]
    fn cursor_advances_strictly_in_batches() {
        let source = sine(1000);
        let x = AxisController::log10(Range::new(1.0, 1000.0), 300.0);
        let (_, cursors) = run(64, &source, &x);
        assert!(!cursors.is_empty());
        assert!(cursors.windows(2).all(|pair| pair[1] > pair[0]));
        assert!(cursors.windows(2).all(|pair| pair[1] - pair[0] == 64));
        // Window [0, 1000) takes ceil(1000 / 64) calls; the last completes.
        assert_eq!(cursors.len(), 1000_usize.div_ceil(64) - 1);
    }

    #[test]
    fn batching_does_not_change_the_image() {
        let source = sine(2000);
        let x = AxisController::log10(Range::new(1.0, 2000.0), 300.0);
        let (whole, _) = run(50_000, &source, &x);
        let (batched, cursors) = run(97, &source, &x);
        assert!(!cursors.is_empty());
        assert_eq!(whole.commands(), batched.commands());
    }

    #[test]
    fn points_share_no_pixel_column() {
        let source = sine(5000);
        let x = AxisController::log10(Range::new(1.0, 5000.0), 300.0);
        let (surface, _) = run(50_000, &source, &x);
        let points = surface
            .commands()
            .iter()
            .find_map(|command| match command {
                DrawCommand::Polyline { points, .. } => Some(points.clone()),
                _ => None,
            })
            .expect("polyline drawn");
        assert!(points.windows(2).all(|pair| pair[1].x > pair[0].x));
    }

    #[test]
    fn isolation_needs_room_on_both_sides() {
        let points = [
            ScreenPoint::new(0.0, 0.0),
            ScreenPoint::new(2.0, 0.0),
            ScreenPoint::new(10.0, 0.0),
            ScreenPoint::new(20.0, 0.0),
        ];
        assert!(!is_isolated(&points, 0, 3.0));
        assert!(!is_isolated(&points, 1, 3.0));
        assert!(is_isolated(&points, 2, 3.0));
        assert!(is_isolated(&points, 3, 3.0));
    }
}
