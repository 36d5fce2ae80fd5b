//! One marker per sample, for zoom levels where samples are pixels apart.

use crate::geom::ScreenPoint;

use super::LineStyle;
use super::path::StepContext;

/// Draw every visible sample and join neighbours. Always completes.
pub(super) fn render(cx: &mut StepContext<'_>) {
    cx.clear();

    let len = cx.mapping.len();
    if len == 0 {
        return;
    }
    let first = (cx.mapping.px_to_index(cx.x_from_px).floor() - 1.0).max(0.0);
    let last = (cx.mapping.px_to_index(cx.x_to_px).ceil() + 1.0).min((len - 1) as f64);
    if !(first <= last) {
        return;
    }

    let radius = (0.75 / cx.mapping.samples_per_px().sqrt())
        .max(f64::from(cx.config.sparse_min_radius))
        .min(f64::from(cx.config.sparse_max_radius)) as f32;
    let line = LineStyle {
        color: cx.color,
        width: cx.config.sparse_line_width,
    };

    let mut previous: Option<ScreenPoint> = None;
    for index in first as usize..=last as usize {
        let x = cx.mapping.index_to_px(index).round();
        let y = cx
            .mapping
            .value_to_canvas_y(cx.source.value(index))
            .round();
        if !x.is_finite() || !y.is_finite() {
            previous = None;
            continue;
        }
        let point = ScreenPoint::new(x as f32, y as f32);
        cx.surface.fill_circle(point, radius, cx.color);
        if let Some(previous) = previous {
            cx.surface.stroke_line(previous, point, line);
        }
        previous = Some(point);
        cx.track_label(point);
    }
}

#[cfg(test)]
mod tests {
    use crate::axis::AxisController;
    use crate::config::RendererConfig;
    use crate::datasource::SampleBuffer;
    use crate::geom::ScreenPoint;
    use crate::job::RenderJob;
    use crate::render::{
        Color, DrawCommand, PathRenderer, RenderList, SteppingClock, Unshuffled,
    };
    use crate::view::Range;

    fn count(surface: &RenderList) -> (usize, usize) {
        let circles = surface
            .commands()
            .iter()
            .filter(|command| matches!(command, DrawCommand::Circle { .. }))
            .count();
        let lines = surface
            .commands()
            .iter()
            .filter(|command| matches!(command, DrawCommand::Line { .. }))
            .count();
        (circles, lines)
    }

    #[test_log::test]
    fn ten_samples_draw_ten_markers_and_nine_lines() {
        let source = SampleBuffer::from_values(1.0, (0..10).map(f64::from));
        let x = AxisController::linear(Range::new(0.0, 10.0), 100.0);
        let y = AxisController::linear(Range::new(0.0, 10.0), 100.0);
        let job = RenderJob::new(&source, &x, &y, Color::BLACK).with_label("ramp");
        let mut surface = RenderList::new(100, 100);
        let mut renderer =
            PathRenderer::with_parts(RendererConfig::default(), Unshuffled, SteppingClock::new(0.0));

        let result = renderer.render_step(&mut surface, &job, None);
        assert_eq!(result, Ok(None));
        assert_eq!(count(&surface), (10, 9));

        let rightmost = surface
            .commands()
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Circle { center, .. } => Some(*center),
                _ => None,
            })
            .last();
        assert_eq!(rightmost, Some(ScreenPoint::new(90.0, 10.0)));
        assert!(
            surface
                .commands()
                .iter()
                .any(|command| matches!(command, DrawCommand::Text { text, .. } if text == "ramp"))
        );
    }

    #[test]
    fn marker_radius_is_clamped() {
        let source = SampleBuffer::from_values(1.0, [0.0, 1.0]);
        let x = AxisController::linear(Range::new(0.0, 2.0), 1000.0);
        let y = AxisController::linear(Range::new(0.0, 1.0), 100.0);
        let job = RenderJob::new(&source, &x, &y, Color::BLACK);
        let mut surface = RenderList::new(1000, 100);
        let mut renderer =
            PathRenderer::with_parts(RendererConfig::default(), Unshuffled, SteppingClock::new(0.0));
        renderer
            .render_step(&mut surface, &job, None)
            .expect("render");
        for command in surface.commands() {
            if let DrawCommand::Circle { radius, .. } = command {
                assert_eq!(*radius, 4.0);
            }
        }
    }

    #[test]
    fn non_finite_samples_break_the_line() {
        let source = SampleBuffer::from_values(1.0, [1.0, f64::NAN, 2.0, 3.0]);
        let x = AxisController::linear(Range::new(0.0, 4.0), 100.0);
        let y = AxisController::linear(Range::new(0.0, 4.0), 100.0);
        let job = RenderJob::new(&source, &x, &y, Color::BLACK);
        let mut surface = RenderList::new(100, 100);
        let mut renderer =
            PathRenderer::with_parts(RendererConfig::default(), Unshuffled, SteppingClock::new(0.0));
        renderer
            .render_step(&mut surface, &job, None)
            .expect("render");
        assert_eq!(count(&surface), (3, 1));
    }

    #[test]
    fn empty_source_only_clears() {
        let source = SampleBuffer::new(1.0);
        let x = AxisController::linear(Range::new(0.0, 10.0), 100.0);
        let y = AxisController::linear(Range::new(0.0, 10.0), 100.0);
        let job = RenderJob::new(&source, &x, &y, Color::BLACK);
        let mut surface = RenderList::new(100, 100);
        let mut renderer =
            PathRenderer::with_parts(RendererConfig::default(), Unshuffled, SteppingClock::new(0.0));
        assert_eq!(renderer.render_step(&mut surface, &job, None), Ok(None));
        assert_eq!(surface.commands(), &[DrawCommand::Clear(surface.bounds())]);
    }
}
