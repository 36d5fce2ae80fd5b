//! Strategy selection.

use crate::job::{RenderAlgorithm, RenderJob};

/// Rendering strategy chosen for a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// One marker per sample, joined by thin lines.
    Sparse,
    /// Vertical min/max segment per pixel column.
    MinMax,
    /// Weighted average dot per pixel column.
    Average,
    /// Strided scatter that fades in over several passes.
    Gradual,
    /// Deduplicated polyline for logarithmic time axes.
    Logarithmic,
}

/// Pick the strategy for a job. First match wins:
///
/// 1. logarithmic X axis
/// 2. fewer than one sample per pixel
/// 3. the min/max hint
/// 4. the average hint
/// 5. gradual scatter
pub fn select_strategy(job: &RenderJob<'_>) -> Strategy {
    if job.is_logarithmic() {
        return Strategy::Logarithmic;
    }
    let rate = job.source.sampling_rate();
    let samples_per_px = (job.x_axis.px_to_value(1.0) - job.x_axis.px_to_value(0.0)) * rate;
    if samples_per_px < 1.0 {
        return Strategy::Sparse;
    }
    match job.algorithm {
        RenderAlgorithm::MinMax => Strategy::MinMax,
        RenderAlgorithm::Average => Strategy::Average,
        RenderAlgorithm::Gradual => Strategy::Gradual,
    }
}
