//! wavepath renders very large sample buffers as waveform paths without
//! blocking the UI thread.
//! Rendering is split into slices bounded by a frame budget; each slice
//! returns a continuation that the caller resumes on the next frame.

#![forbid(unsafe_code)]

pub mod axis;
pub mod config;
pub mod datasource;
pub mod error;
pub mod geom;
#[cfg(feature = "gpui")]
pub mod gpui_backend;
pub mod interaction;
pub mod job;
pub mod render;
pub mod scheduler;
pub mod transform;
pub mod view;

pub use axis::{AxisController, AxisScale};
pub use config::RendererConfig;
pub use datasource::{SampleBuffer, SampleSource, ScaledSamples};
pub use error::{ColorParseError, RenderError, UnknownAlgorithm};
pub use geom::{ScreenPoint, ScreenRect};
pub use job::{RenderAlgorithm, RenderJob};
pub use render::{
    Clock, Color, Continuation, DrawCommand, FixedAdvance, LineStyle, MonotonicClock, OffsetRng,
    PathRenderer, RenderList, Strategy, Surface, TextMeasurer, TextStyle, random_offsets,
    render_waveform_path, select_strategy,
};
pub use scheduler::{FrameStatus, RenderDriver};
pub use transform::AxisTransform;
pub use view::Range;
