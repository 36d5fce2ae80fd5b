//! Error types.

use thiserror::Error;

use crate::render::Strategy;

/// Errors that abort a single render call.
///
/// Degenerate ranges and non-finite samples are not errors; they only skip
/// the affected column or point.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    /// The drawing surface has no drawable area.
    #[error("drawing surface unavailable ({width}x{height})")]
    SurfaceUnavailable {
        /// Surface width in pixels.
        width: u32,
        /// Surface height in pixels.
        height: u32,
    },
    /// The sample source reports an unusable sampling rate.
    #[error("invalid sampling rate {0}")]
    InvalidSamplingRate(f64),
    /// A continuation was resumed by a job that selects another strategy.
    #[error("continuation belongs to the {found:?} strategy, job selects {expected:?}")]
    ContinuationMismatch {
        /// Strategy selected for the job.
        expected: Strategy,
        /// Strategy that produced the continuation.
        found: Strategy,
    },
}

/// Errors produced when parsing a CSS color.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    /// Not a hex color, `rgb()`/`rgba()` or a known color keyword.
    #[error("unknown color `{0}`")]
    UnknownName(String),
    /// Malformed `rgb()`/`rgba()` arguments.
    #[error("color `{0}` has malformed rgb() arguments")]
    InvalidFunction(String),
    /// The number of hex digits is not 3, 4, 6 or 8.
    #[error("color `{0}` has an unsupported length")]
    InvalidLength(String),
    /// A character is not a hex digit.
    #[error("color `{0}` contains a non-hex digit")]
    InvalidDigit(String),
}

/// Unrecognized render algorithm name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown render algorithm `{0}`")]
pub struct UnknownAlgorithm(pub String);
