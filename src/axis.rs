//! Axis scaling and the default axis controller.

use crate::transform::AxisTransform;
use crate::view::Range;

const MIN_SPAN: f64 = 1e-12;

/// Axis scale type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AxisScale {
    /// Linear scaling.
    #[default]
    Linear,
    /// Base-10 logarithmic scaling.
    ///
    /// Values are mapped so that the axis limits stay fixed points:
    /// `log10(v) * max / log10(max)`, clamped into the limits. Limits that
    /// fail [`AxisScale::is_range_valid`] map linearly.
    Log10,
}

impl AxisScale {
    /// Map a data value into linear axis space.
    pub fn map_value(self, value: f64, limits: Range) -> f64 {
        match self {
            Self::Log10 if self.is_range_valid(limits) => {
                limits.clamp(value.log10() * limits.max / limits.max.log10())
            }
            _ => value,
        }
    }

    /// Invert a value from linear axis space back into data space.
    pub fn invert_value(self, value: f64, limits: Range) -> f64 {
        match self {
            Self::Log10 if self.is_range_valid(limits) => {
                limits.clamp(10_f64.powf(value * limits.max.log10() / limits.max))
            }
            _ => value,
        }
    }

    /// Check whether a data range is usable with this scale.
    pub fn is_range_valid(self, range: Range) -> bool {
        if !range.is_finite() {
            return false;
        }
        match self {
            Self::Linear => true,
            Self::Log10 => range.min >= 0.0 && range.max > 1.0,
        }
    }
}

/// Axis state driving the pixel mapping of one chart axis.
///
/// The controller keeps the full value limits, the visible window inside
/// them and the pixel distance the window is stretched across.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisController {
    scale: AxisScale,
    limits: Range,
    visible: Range,
    distance_px: f64,
}

impl AxisController {
    /// Create an axis showing its full limits across `distance_px` pixels.
    pub fn new(scale: AxisScale, limits: Range, distance_px: f64) -> Self {
        Self {
            scale,
            limits,
            visible: limits,
            distance_px,
        }
    }

    /// Create a linear axis.
    pub fn linear(limits: Range, distance_px: f64) -> Self {
        Self::new(AxisScale::Linear, limits, distance_px)
    }

    /// Create a logarithmic axis.
    ///
    /// The limits need `min >= 0` and `max > 1`; otherwise values map
    /// linearly.
    pub fn log10(limits: Range, distance_px: f64) -> Self {
        Self::new(AxisScale::Log10, limits, distance_px)
    }

    /// Set the visible window.
    pub fn with_visible(mut self, visible: Range) -> Self {
        self.visible = visible;
        self
    }

    /// Access the axis scale.
    pub fn axis_scale(&self) -> AxisScale {
        self.scale
    }

    /// Access the value limits.
    pub fn limits(&self) -> Range {
        self.limits
    }

    /// Access the visible window.
    pub fn visible(&self) -> Range {
        self.visible
    }

    /// Pixel distance covered by the visible window.
    pub fn distance_px(&self) -> f64 {
        self.distance_px
    }

    /// Replace the value limits, keeping the visible window inside them.
    pub fn set_limits(&mut self, limits: Range) {
        self.limits = limits;
        self.visible = self.visible.shifted_into(limits);
    }

    /// Replace the visible window.
    pub fn set_visible(&mut self, visible: Range) {
        self.visible = visible;
    }

    /// Update the pixel distance, e.g. after a resize.
    pub fn set_distance_px(&mut self, distance_px: f64) {
        self.distance_px = distance_px;
    }

    /// Map a pixel offset to a linear axis value.
    pub fn px_to_linear_value(&self, px: f64) -> f64 {
        self.visible.min + px / self.scale()
    }

    /// Pan the visible window by a pixel delta, staying inside the limits.
    pub fn pan_by_px(&mut self, delta_px: f64) {
        let distance = delta_px / self.scale();
        if !distance.is_finite() {
            return;
        }
        let next = Range::new(self.visible.min + distance, self.visible.max + distance);
        self.visible = next.shifted_into(self.limits);
    }

    /// Zoom around a pixel position. Factors below 1 zoom in.
    pub fn zoom_at_px(&mut self, center_px: f64, factor: f64) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        let center = self.px_to_linear_value(center_px);
        let next = Range::new(
            center + (self.visible.min - center) * factor,
            center + (self.visible.max - center) * factor,
        )
        .with_min_span(MIN_SPAN);
        if next.is_valid() {
            self.visible = next.shifted_into(self.limits);
        }
    }

    fn distance(&self) -> f64 {
        let distance = self.visible.span();
        if distance == 0.0 { 1.0 } else { distance }
    }
}

impl AxisTransform for AxisController {
    fn from_value(&self) -> f64 {
        self.visible.min
    }

    fn to_value(&self) -> f64 {
        self.visible.max
    }

    fn range(&self) -> f64 {
        self.limits.span()
    }

    fn scale(&self) -> f64 {
        self.distance_px / self.distance()
    }

    fn value_to_px(&self, value: f64) -> f64 {
        self.linear_value_to_px(self.scale.map_value(value, self.limits))
    }

    fn px_to_value(&self, px: f64) -> f64 {
        self.scale
            .invert_value(self.px_to_linear_value(px), self.limits)
    }

    fn linear_value_to_px(&self, value: f64) -> f64 {
        (value - self.visible.min) * self.scale()
    }

    fn is_logarithmic(&self) -> bool {
        self.scale == AxisScale::Log10
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_roundtrip() {
        let axis = AxisController::linear(Range::new(0.0, 10.0), 100.0);
        assert_eq!(axis.scale(), 10.0);
        assert_eq!(axis.value_to_px(2.5), 25.0);
        assert!((axis.px_to_value(axis.value_to_px(7.25)) - 7.25).abs() < 1e-9);
    }

    #[test]
    fn visible_window_offsets_pixels() {
        let axis = AxisController::linear(Range::new(0.0, 100.0), 200.0)
            .with_visible(Range::new(50.0, 60.0));
        assert_eq!(axis.value_to_px(50.0), 0.0);
        assert_eq!(axis.value_to_px(60.0), 200.0);
        assert_eq!(axis.range(), 100.0);
    }

    #[test]
    fn log_scale_keeps_limits_fixed() {
        let limits = Range::new(1.0, 1000.0);
        let scale = AxisScale::Log10;
        assert!((scale.map_value(1000.0, limits) - 1000.0).abs() < 1e-9);
        assert!((scale.map_value(10.0, limits) - 333.333_333).abs() < 1e-3);
        let mapped = scale.map_value(100.0, limits);
        assert!((scale.invert_value(mapped, limits) - 100.0).abs() < 1e-6);
    }

    #[test]
    fn log_scale_clamps_out_of_range() {
        let limits = Range::new(1.0, 1000.0);
        assert_eq!(AxisScale::Log10.map_value(0.0, limits), 1.0);
        assert_eq!(AxisScale::Log10.map_value(1e9, limits), 1000.0);
    }

    #[test]
    fn log_axis_uses_linear_pixels_for_linear_values() {
        let axis = AxisController::log10(Range::new(1.0, 1000.0), 300.0);
        assert!(axis.is_logarithmic());
        assert!((axis.linear_value_to_px(500.5) - 150.0).abs() < 1e-9);
        let px = axis.value_to_px(10.0);
        assert!((axis.px_to_value(px) - 10.0).abs() < 1e-6);
    }

    #[test]
    fn pan_stays_inside_limits() {
        let mut axis = AxisController::linear(Range::new(0.0, 100.0), 100.0)
            .with_visible(Range::new(10.0, 20.0));
        axis.pan_by_px(50.0);
        assert_eq!(axis.visible(), Range::new(15.0, 25.0));
        axis.pan_by_px(-10_000.0);
        assert_eq!(axis.visible(), Range::new(0.0, 10.0));
    }

    #[test]
    fn zoom_around_center_pixel() {
        let mut axis = AxisController::linear(Range::new(0.0, 100.0), 100.0);
        axis.zoom_at_px(50.0, 0.5);
        assert_eq!(axis.visible(), Range::new(25.0, 75.0));
        axis.zoom_at_px(0.0, 10.0);
        assert_eq!(axis.visible(), Range::new(0.0, 100.0));
    }

    #[test]
    fn log_range_validation() {
        assert!(AxisScale::Log10.is_range_valid(Range::new(0.0, 10.0)));
        assert!(!AxisScale::Log10.is_range_valid(Range::new(0.0, 1.0)));
        assert!(AxisScale::Linear.is_range_valid(Range::new(-1.0, 1.0)));
    }

    #[test]
    fn log_axis_with_unusable_limits_maps_linearly() {
        let limits = Range::new(0.0, 1.0);
        assert_eq!(AxisScale::Log10.map_value(0.25, limits), 0.25);
        assert_eq!(AxisScale::Log10.invert_value(0.75, limits), 0.75);

        let axis = AxisController::log10(limits, 300.0);
        assert!((axis.value_to_px(0.5) - 150.0).abs() < 1e-9);
        assert!((axis.px_to_value(60.0) - 0.2).abs() < 1e-9);
    }
}
