//! Append-only in-memory sample storage.

use crate::datasource::SampleSource;
use crate::view::Range;

/// Append-only sample storage with incremental bounds and generation tracking.
#[derive(Debug, Clone)]
pub struct SampleBuffer {
    values: Vec<f64>,
    sampling_rate: f64,
    bounds: Option<Range>,
    generation: u64,
}

impl SampleBuffer {
    /// Create an empty buffer.
    pub fn new(sampling_rate: f64) -> Self {
        Self {
            values: Vec::new(),
            sampling_rate,
            bounds: None,
            generation: 0,
        }
    }

    /// Build a buffer from an iterator of values.
    pub fn from_values<I, T>(sampling_rate: f64, iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<f64>,
    {
        let mut buffer = Self::new(sampling_rate);
        buffer.extend(iter);
        buffer
    }

    /// Append a value, returning its index.
    pub fn push(&mut self, value: f64) -> usize {
        let index = self.values.len();
        self.extend([value]);
        index
    }

    /// Append multiple values, returning how many were added.
    pub fn extend<I, T>(&mut self, values: I) -> usize
    where
        I: IntoIterator<Item = T>,
        T: Into<f64>,
    {
        let values = values.into_iter();
        let (reserve, _) = values.size_hint();
        self.values.reserve(reserve);

        let start_len = self.values.len();
        for value in values {
            let value = value.into();
            self.values.push(value);
            self.update_bounds(value);
        }
        let added = self.values.len() - start_len;
        if added > 0 {
            self.generation = self.generation.wrapping_add(1);
        }
        added
    }

    /// Access all values as a slice.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Bounds of all finite values.
    pub fn bounds(&self) -> Option<Range> {
        self.bounds
    }

    /// Data generation (increments on append).
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Duration covered by the samples, in X axis units.
    pub fn duration(&self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        (self.values.len() - 1) as f64 / self.sampling_rate
    }

    fn update_bounds(&mut self, value: f64) {
        if !value.is_finite() {
            return;
        }
        match self.bounds.as_mut() {
            None => self.bounds = Some(Range::new(value, value)),
            Some(bounds) => bounds.expand_to_include(value),
        }
    }
}

impl SampleSource for SampleBuffer {
    fn len(&self) -> usize {
        self.values.len()
    }

    fn sampling_rate(&self) -> f64 {
        self.sampling_rate
    }

    fn value(&self, index: usize) -> f64 {
        self.values[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extend_appends_and_tracks_bounds() {
        let mut buffer = SampleBuffer::new(10.0);
        assert_eq!(buffer.extend([1.0, -2.0, 3.0]), 3);
        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer.bounds(), Some(Range::new(-2.0, 3.0)));
        assert_eq!(buffer.value(1), -2.0);
    }

    #[test]
    fn generation_changes_only_on_append() {
        let mut buffer = SampleBuffer::new(1.0);
        assert_eq!(buffer.generation(), 0);
        buffer.push(1.0);
        assert_eq!(buffer.generation(), 1);
        buffer.extend(std::iter::empty::<f64>());
        assert_eq!(buffer.generation(), 1);
    }

    #[test]
    fn non_finite_values_skip_bounds() {
        let buffer = SampleBuffer::from_values(1.0, [f64::NAN, 2.0, f64::INFINITY]);
        assert_eq!(buffer.bounds(), Some(Range::new(2.0, 2.0)));
        assert_eq!(buffer.len(), 3);
    }

    #[test]
    fn duration_uses_sampling_rate() {
        let buffer = SampleBuffer::from_values(4.0, [0.0; 9]);
        assert_eq!(buffer.duration(), 2.0);
        assert_eq!(SampleBuffer::new(4.0).duration(), 0.0);
    }
}
