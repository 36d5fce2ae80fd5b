//! Strided scatter that fades in over several passes.
//!
//! With `K` samples per pixel, each call draws every `K`-th sample starting at
//! one pass offset. Passes run in shuffled order at a constant alpha, so the
//! plot densifies evenly until all `K` passes are drawn.

use std::sync::Arc;

use tracing::trace;

use crate::geom::{ScreenPoint, ScreenRect};

use super::path::StepContext;
use super::{GradualContinuation, random_offsets};

pub(super) fn render(
    cx: &mut StepContext<'_>,
    state: Option<GradualContinuation>,
) -> Option<GradualContinuation> {
    let mut state = match state {
        // The source may have shrunk since the window was computed.
        Some(mut state) => {
            state.b = state.b.min(cx.mapping.len());
            state
        }
        None => {
            cx.clear();
            start(cx)?
        }
    };

    let color = cx.color.with_alpha(cx.config.gradual_alpha(state.k));
    let pass = state.offsets[state.offset];
    for index in (state.a + pass..state.b).step_by(state.k) {
        let x = cx.mapping.index_to_px(index).round();
        let y = cx.mapping.value_to_px(cx.source.value(index));
        if x >= 0.0 && x < cx.width && y >= 0.0 && y < cx.height {
            let y = cx.height - y;
            let dot = ScreenRect::from_origin_size(x as f32 - 1.0, y as f32 - 1.0, 2.0, 2.0);
            cx.surface.fill_rect(dot, color);
            cx.track_label(ScreenPoint::new(x as f32, y as f32));
        }
    }

    state.offset += 1;
    trace!(pass = state.offset, passes = state.k, "gradual pass drawn");
    (state.offset < state.k).then_some(state)
}

fn start(cx: &mut StepContext<'_>) -> Option<GradualContinuation> {
    let a = cx.mapping.clamp_index(cx.mapping.px_to_index(cx.x_from_px).round()) as usize;
    let b = cx.mapping.clamp_index(cx.mapping.px_to_index(cx.x_to_px).round()) as usize;
    if a >= b {
        return None;
    }
    let k = ((b - a) / cx.width as usize).max(1);
    let offsets: Arc<[usize]> = random_offsets(k, cx.rng()).into();
    Some(GradualContinuation {
        a,
        b,
        k,
        offsets,
        offset: 0,
        label_anchor: None,
    })
}
