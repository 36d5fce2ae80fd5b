//! Tunable constants for the path renderer.

use serde::{Deserialize, Serialize};

/// Configuration for [`PathRenderer`](crate::render::PathRenderer).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// Wall-clock budget of one average/min-max slice, in milliseconds.
    pub frame_budget_ms: f64,
    /// Samples consumed per logarithmic slice.
    pub logarithmic_batch: usize,
    /// Base alpha of a gradual pass.
    pub gradual_min_alpha: f32,
    /// Alpha reached once every gradual pass is drawn.
    pub gradual_max_alpha: f32,
    /// Stroke width of the lines joining sparse samples.
    pub sparse_line_width: f32,
    /// Smallest sparse sample marker radius.
    pub sparse_min_radius: f32,
    /// Largest sparse sample marker radius.
    pub sparse_max_radius: f32,
    /// Stroke width of the logarithmic polyline.
    pub logarithmic_line_width: f32,
    /// Radius of the markers drawn at isolated logarithmic points.
    pub isolated_marker_radius: f32,
    /// Label font size in pixels.
    pub label_font_size: f32,
    /// Horizontal label padding in pixels.
    pub label_horizontal_padding: f32,
    /// Vertical label padding in pixels.
    pub label_vertical_padding: f32,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            frame_budget_ms: 1000.0 / 30.0,
            logarithmic_batch: 50_000,
            gradual_min_alpha: 0.4,
            gradual_max_alpha: 1.0,
            sparse_line_width: 0.4,
            sparse_min_radius: 1.0,
            sparse_max_radius: 4.0,
            logarithmic_line_width: 1.0,
            isolated_marker_radius: 1.5,
            label_font_size: 14.0,
            label_horizontal_padding: 4.0,
            label_vertical_padding: 4.0,
        }
    }
}

impl RendererConfig {
    /// Alpha applied to every gradual pass when `passes` passes are drawn.
    ///
    /// The alpha is the same for every pass.
    pub fn gradual_alpha(&self, passes: usize) -> f32 {
        let passes = passes.max(1) as f32;
        self.gradual_min_alpha + (self.gradual_max_alpha - self.gradual_min_alpha) / passes
    }
}
