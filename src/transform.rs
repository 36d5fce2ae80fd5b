//! Coordinate transforms between model and canvas space.

use crate::datasource::SampleSource;

/// Mapping between axis values and pixel offsets along one axis.
///
/// Pixel offsets are measured from the start of the visible window: left for
/// the X axis and bottom for the Y axis.
pub trait AxisTransform {
    /// First visible value (in linear axis space).
    fn from_value(&self) -> f64;

    /// Last visible value (in linear axis space).
    fn to_value(&self) -> f64;

    /// Span of the full value limits.
    fn range(&self) -> f64;

    /// Pixels per linear axis unit.
    fn scale(&self) -> f64;

    /// Map a value into a pixel offset.
    fn value_to_px(&self, value: f64) -> f64;

    /// Map a pixel offset back into a value.
    fn px_to_value(&self, px: f64) -> f64;

    /// Map a linear axis value into a pixel offset, ignoring any log scale.
    fn linear_value_to_px(&self, value: f64) -> f64;

    /// Whether the axis uses a logarithmic scale.
    fn is_logarithmic(&self) -> bool {
        false
    }
}

/// Sample-index view of a job's axes for one canvas height.
pub(crate) struct SampleMapping<'a> {
    x: &'a dyn AxisTransform,
    y: &'a dyn AxisTransform,
    sampling_rate: f64,
    len: usize,
    height: f64,
}

impl<'a> SampleMapping<'a> {
    pub(crate) fn new(
        x: &'a dyn AxisTransform,
        y: &'a dyn AxisTransform,
        source: &dyn SampleSource,
        height: f64,
    ) -> Self {
        Self {
            x,
            y,
            sampling_rate: source.sampling_rate(),
            len: source.len(),
            height,
        }
    }

    /// X axis of the job.
    pub(crate) fn x(&self) -> &'a dyn AxisTransform {
        self.x
    }

    /// Number of samples visible to this mapping.
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Fractional sample index under a pixel column.
    pub(crate) fn px_to_index(&self, px: f64) -> f64 {
        self.x.px_to_value(px) * self.sampling_rate
    }

    /// Horizontal pixel of a sample.
    pub(crate) fn index_to_px(&self, index: usize) -> f64 {
        self.x.value_to_px(index as f64 / self.sampling_rate)
    }

    /// Number of samples covered by one pixel.
    pub(crate) fn samples_per_px(&self) -> f64 {
        self.px_to_index(1.0) - self.px_to_index(0.0)
    }

    /// Y pixel offset from the bottom of the canvas.
    pub(crate) fn value_to_px(&self, value: f64) -> f64 {
        self.y.value_to_px(value)
    }

    /// Canvas row of a value (rows grow downwards).
    pub(crate) fn value_to_canvas_y(&self, value: f64) -> f64 {
        self.height - self.y.value_to_px(value)
    }

    /// Clamp a fractional index into `[0, len]`.
    pub(crate) fn clamp_index(&self, index: f64) -> f64 {
        if index.is_nan() {
            return 0.0;
        }
        index.clamp(0.0, self.len as f64)
    }
}
