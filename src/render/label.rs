//! Series label placed next to the rightmost rendered point.

use crate::config::RendererConfig;
use crate::geom::{ScreenPoint, ScreenRect};

use super::{Color, Surface, TextStyle};

/// Padded label box anchored above-left of `anchor` and kept inside the canvas.
///
/// The box is shifted by half a pixel so its edges land on pixel centers.
pub(super) fn label_box(
    anchor: ScreenPoint,
    text_width: f32,
    canvas: (f32, f32),
    config: &RendererConfig,
) -> ScreenRect {
    let width = text_width.ceil() + 2.0 * config.label_horizontal_padding;
    let height = config.label_font_size + 2.0 * config.label_vertical_padding;
    let (canvas_width, canvas_height) = canvas;

    let mut x = (anchor.x - width).round();
    if x < 0.0 {
        x = 0.0;
    } else if x + width > canvas_width {
        x = canvas_width - width;
    }
    let mut y = (anchor.y - height).round();
    if y < 0.0 {
        y = 0.0;
    } else if y + height > canvas_height {
        y = canvas_height - height;
    }

    ScreenRect::from_origin_size(x + 0.5, y + 0.5, width, height)
}

pub(super) fn draw(
    surface: &mut dyn Surface,
    text: &str,
    anchor: ScreenPoint,
    color: Color,
    config: &RendererConfig,
) {
    if text.is_empty() {
        return;
    }
    let (width, height) = surface.size();
    let text_width = surface.measure_text(text, config.label_font_size);
    let rect = label_box(anchor, text_width, (width as f32, height as f32), config);
    let origin = ScreenPoint::new(
        rect.min.x + config.label_horizontal_padding,
        rect.min.y + config.label_vertical_padding,
    );
    surface.fill_text(
        origin,
        text,
        TextStyle {
            color,
            size: config.label_font_size,
        },
    );
}
