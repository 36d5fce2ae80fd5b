//! Sample sources consumed by the path renderer.
//!
//! The renderer only needs random access to a sequence of samples taken at a
//! fixed rate. Sources may grow between render calls (live capture) but must
//! not shrink while a render job is in flight.

mod scaled;
mod store;

pub use scaled::ScaledSamples;
pub use store::SampleBuffer;

/// Random-access sequence of samples at a fixed sampling rate.
pub trait SampleSource {
    /// Number of samples available.
    fn len(&self) -> usize;

    /// Samples per X axis unit (usually per second).
    fn sampling_rate(&self) -> f64;

    /// Sample value at `index`.
    ///
    /// Callers guarantee `index < self.len()`.
    fn value(&self, index: usize) -> f64;

    /// Check if there are no samples.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<S: SampleSource + ?Sized> SampleSource for std::sync::Arc<S> {
    fn len(&self) -> usize {
        (**self).len()
    }

    fn sampling_rate(&self) -> f64 {
        (**self).sampling_rate()
    }

    fn value(&self, index: usize) -> f64 {
        (**self).value(index)
    }
}
