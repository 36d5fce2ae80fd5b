use std::sync::Arc;

use gpui::{TextRun, Window, WindowTextSystem, font, px};

use crate::render::TextMeasurer;

/// Text measurer backed by the window's text system.
///
/// Holds its own handle to the text system so a [`RenderList`] can keep it
/// across frames.
///
/// [`RenderList`]: crate::render::RenderList
#[derive(Clone)]
pub(crate) struct GpuiTextMeasurer {
    text_system: Arc<WindowTextSystem>,
}

impl GpuiTextMeasurer {
    pub(crate) fn new(window: &Window) -> Self {
        Self {
            text_system: Arc::clone(window.text_system()),
        }
    }
}

impl TextMeasurer for GpuiTextMeasurer {
    fn measure(&self, text: &str, size: f32) -> (f32, f32) {
        if text.is_empty() {
            return (0.0, 0.0);
        }
        let run = TextRun {
            len: text.len(),
            font: font(".SystemUIFont"),
            color: gpui::black(),
            background_color: None,
            underline: None,
            strikethrough: None,
        };
        let shaped = self
            .text_system
            .shape_line(text.to_string().into(), px(size), &[run], None);
        let width = f32::from(shaped.width);
        let height = f32::from(shaped.ascent + shaped.descent);
        (width, height.max(size * 1.2))
    }
}
