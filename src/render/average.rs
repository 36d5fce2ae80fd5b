//! Weighted average per pixel column.

use crate::geom::ScreenPoint;

use super::path::StepContext;
use super::{ColumnContinuation, Strategy};

pub(super) fn render(
    cx: &mut StepContext<'_>,
    state: Option<ColumnContinuation>,
) -> Option<ColumnContinuation> {
    cx.walk_columns(Strategy::Average, state, |cx, x| {
        let Some(value) = average_at(cx, x) else {
            return;
        };
        let y = cx.mapping.value_to_canvas_y(value);
        if !y.is_finite() {
            return;
        }
        let center = ScreenPoint::new(x as f32, y as f32);
        cx.surface.fill_circle(center, 1.0, cx.color);
        cx.track_label(center);
    })
}

/// Mean of the samples under `[x, x + 1)`, weighting the partially covered
/// boundary samples by their covered fraction.
fn average_at(cx: &StepContext<'_>, x: f64) -> Option<f64> {
    let start = cx.mapping.clamp_index(cx.mapping.px_to_index(x));
    let end = cx.mapping.clamp_index(cx.mapping.px_to_index(x + 1.0));
    if start >= end {
        return None;
    }

    let mut sum = 0.0;
    let mut weight = 0.0;

    let head = start.ceil();
    let head_weight = head - start;
    if head_weight > 0.0 {
        sum += cx.source.value(start.floor() as usize) * head_weight;
        weight += head_weight;
    }

    let tail = end.floor();
    let tail_weight = end - tail;
    if tail_weight > 0.0 {
        sum += cx.source.value(tail as usize) * tail_weight;
        weight += tail_weight;
    }

    for index in head as usize..tail as usize {
        sum += cx.source.value(index);
        weight += 1.0;
    }

    let mean = sum / weight;
    mean.is_finite().then_some(mean)
}
