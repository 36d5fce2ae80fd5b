//! Render job descriptors.

use std::fmt;
use std::str::FromStr;

use crate::datasource::SampleSource;
use crate::error::UnknownAlgorithm;
use crate::render::Color;
use crate::transform::AxisTransform;

/// Aggregation hint for dense waveforms.
///
/// The hint only applies when several samples share a pixel column on a
/// linear axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RenderAlgorithm {
    /// Vertical min/max envelope per pixel column.
    MinMax,
    /// Weighted average per pixel column.
    Average,
    /// Progressive scatter that fades in over several passes.
    #[default]
    Gradual,
}

impl FromStr for RenderAlgorithm {
    type Err = UnknownAlgorithm;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "minmax" => Ok(Self::MinMax),
            "avg" => Ok(Self::Average),
            "gradually" | "gradual" | "" => Ok(Self::Gradual),
            other => Err(UnknownAlgorithm(other.to_string())),
        }
    }
}

impl fmt::Display for RenderAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::MinMax => "minmax",
            Self::Average => "avg",
            Self::Gradual => "gradually",
        };
        f.write_str(name)
    }
}

/// Everything needed to render one waveform path.
///
/// A job is rebuilt for every top-level render request. Continuations returned
/// by the renderer must be resumed with a job built from the same inputs.
#[derive(Clone, Copy)]
pub struct RenderJob<'a> {
    /// Samples to draw.
    pub source: &'a dyn SampleSource,
    /// Time axis.
    pub x_axis: &'a dyn AxisTransform,
    /// Value axis.
    pub y_axis: &'a dyn AxisTransform,
    /// Stroke and fill color.
    pub color: Color,
    /// Optional text drawn next to the rightmost rendered point.
    pub label: Option<&'a str>,
    /// Aggregation hint.
    pub algorithm: RenderAlgorithm,
}

impl<'a> RenderJob<'a> {
    /// Create a job with the default algorithm and no label.
    pub fn new(
        source: &'a dyn SampleSource,
        x_axis: &'a dyn AxisTransform,
        y_axis: &'a dyn AxisTransform,
        color: Color,
    ) -> Self {
        Self {
            source,
            x_axis,
            y_axis,
            color,
            label: None,
            algorithm: RenderAlgorithm::default(),
        }
    }

    /// Set the label.
    pub fn with_label(mut self, label: &'a str) -> Self {
        self.label = Some(label);
        self
    }

    /// Set the aggregation hint.
    pub fn with_algorithm(mut self, algorithm: RenderAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Whether the X axis is logarithmic.
    pub fn is_logarithmic(&self) -> bool {
        self.x_axis.is_logarithmic()
    }
}

impl fmt::Debug for RenderJob<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderJob")
            .field("samples", &self.source.len())
            .field("sampling_rate", &self.source.sampling_rate())
            .field("x_from", &self.x_axis.from_value())
            .field("x_to", &self.x_axis.to_value())
            .field("color", &self.color)
            .field("label", &self.label)
            .field("algorithm", &self.algorithm)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_algorithm_names() {
        assert_eq!("minmax".parse(), Ok(RenderAlgorithm::MinMax));
        assert_eq!("avg".parse(), Ok(RenderAlgorithm::Average));
        assert_eq!("gradually".parse(), Ok(RenderAlgorithm::Gradual));
        assert_eq!("".parse(), Ok(RenderAlgorithm::Gradual));
        assert_eq!(
            "lttb".parse::<RenderAlgorithm>(),
            Err(UnknownAlgorithm("lttb".to_string()))
        );
    }

    #[test]
    fn display_matches_parse() {
        for algorithm in [
            RenderAlgorithm::MinMax,
            RenderAlgorithm::Average,
            RenderAlgorithm::Gradual,
        ] {
            assert_eq!(algorithm.to_string().parse(), Ok(algorithm));
        }
    }
}
