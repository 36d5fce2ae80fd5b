//! GPUI integration for wavepath.
//!
//! This module provides a GPUI view that renders a live sample buffer
//! incrementally, one render slice per animation frame, and handles pan and
//! zoom of the time axis.

mod paint;
mod text;
mod view;

pub use view::{WaveformHandle, WaveformView};
