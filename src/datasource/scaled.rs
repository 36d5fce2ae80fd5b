//! Raw sample buffers with linear calibration.

use std::sync::Arc;

use crate::datasource::SampleSource;

/// Raw samples (for example ADC counts) converted through `raw * scale + offset`.
///
/// The raw buffer is shared, so cloning the source is cheap.
#[derive(Debug, Clone)]
pub struct ScaledSamples<T> {
    raw: Arc<[T]>,
    sampling_rate: f64,
    offset: f64,
    scale: f64,
}

impl<T> ScaledSamples<T>
where
    T: Copy + Into<f64>,
{
    /// Wrap a raw buffer with identity calibration.
    pub fn new(raw: impl Into<Arc<[T]>>, sampling_rate: f64) -> Self {
        Self {
            raw: raw.into(),
            sampling_rate,
            offset: 0.0,
            scale: 1.0,
        }
    }

    /// Set the calibration applied to every raw sample.
    pub fn with_calibration(mut self, offset: f64, scale: f64) -> Self {
        self.offset = offset;
        self.scale = scale;
        self
    }

    /// Calibration offset.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Calibration scale.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Access the raw samples.
    pub fn raw(&self) -> &[T] {
        &self.raw
    }
}

impl<T> SampleSource for ScaledSamples<T>
where
    T: Copy + Into<f64>,
{
    fn len(&self) -> usize {
        self.raw.len()
    }

    fn sampling_rate(&self) -> f64 {
        self.sampling_rate
    }

    fn value(&self, index: usize) -> f64 {
        self.raw[index].into() * self.scale + self.offset
    }
}
