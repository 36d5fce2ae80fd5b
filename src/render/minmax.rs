//! Min/max envelope per pixel column.

use crate::geom::ScreenPoint;

use super::path::StepContext;
use super::{ColumnContinuation, LineStyle, Strategy};

pub(super) fn render(
    cx: &mut StepContext<'_>,
    state: Option<ColumnContinuation>,
) -> Option<ColumnContinuation> {
    let style = LineStyle {
        color: cx.color,
        width: 1.0,
    };
    cx.walk_columns(Strategy::MinMax, state, |cx, left| {
        let x = left + 0.5;
        let Some((low, high)) = envelope_at(cx, x) else {
            return;
        };
        // Keep flat stretches visible.
        let high = if high - low < 1.0 { low + 1.0 } else { high };
        let bottom = cx.height - low;
        let top = cx.height - high;
        let start = ScreenPoint::new(x as f32, bottom as f32);
        let end = ScreenPoint::new(x as f32, top as f32);
        cx.surface.stroke_line(start, end, style);
        cx.track_label(ScreenPoint::new(x as f32, ((bottom + top) / 2.0) as f32));
    })
}

/// Pixel offsets of the smallest and largest sample under the column
/// centered at `x`.
fn envelope_at(cx: &StepContext<'_>, x: f64) -> Option<(f64, f64)> {
    let start = cx.mapping.clamp_index(cx.mapping.px_to_index(x).floor()) as usize;
    let end = cx.mapping.clamp_index(cx.mapping.px_to_index(x + 1.0).ceil()) as usize;
    if start >= end {
        return None;
    }

    let mut min = f64::MAX;
    let mut max = -f64::MAX;
    for index in start..end {
        let value = cx.source.value(index);
        if value < min {
            min = value;
        }
        if value > max {
            max = value;
        }
    }
    if min > max {
        return None;
    }
    Some((cx.mapping.value_to_px(min), cx.mapping.value_to_px(max)))
}
