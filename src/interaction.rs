//! Interaction helpers for panning and zooming axes.
//!
//! These helpers are used by render backends to implement consistent
//! interaction semantics across platforms. Pixel positions are offsets from
//! the start of the axis (left edge for X, bottom edge for Y).

use crate::axis::AxisController;

/// Pan an axis so the content follows a drag of `delta_px` pixels.
pub fn pan_axis(axis: &mut AxisController, delta_px: f32) {
    axis.pan_by_px(-f64::from(delta_px));
}

/// Zoom an axis around a pixel position. Factors below 1 zoom in.
pub fn zoom_axis(axis: &mut AxisController, center_px: f32, factor: f64) {
    axis.zoom_at_px(f64::from(center_px), factor);
}

/// Compute a zoom factor from a drag delta and axis length.
pub fn zoom_factor_from_drag(delta_px: f32, axis_px: f32) -> f64 {
    if axis_px <= 0.0 {
        return 1.0;
    }
    let normalized = f64::from(delta_px) / f64::from(axis_px);
    (1.0 - normalized).clamp(0.1, 10.0)
}

/// Compute a zoom factor from a scroll delta in pixels.
///
/// Positive deltas zoom out, negative deltas zoom in.
pub fn zoom_factor_from_scroll(delta_px: f32) -> f64 {
    (f64::from(delta_px) * 0.002).exp().clamp(0.1, 10.0)
}
