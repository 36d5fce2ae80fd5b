//! Waveform path rendering.
//!
//! The renderer turns a sample source into drawing calls against an abstract
//! [`Surface`]. Dense waveforms are rendered incrementally: each call to
//! [`PathRenderer::render_step`] does a bounded slice of work and returns a
//! [`Continuation`] until the path is complete.
//!
//! [`RenderList`] is a recording surface; render backends (such as the GPUI
//! backend) replay its commands.

mod average;
mod clock;
mod continuation;
mod gradual;
mod label;
mod logarithmic;
mod minmax;
mod offsets;
mod path;
mod sparse;
mod strategy;

use std::str::FromStr;

pub use clock::{Clock, MonotonicClock, SteppingClock};
pub use continuation::{
    ColumnContinuation, Continuation, GradualContinuation, LogarithmicContinuation,
};
pub use offsets::{OffsetRng, Unshuffled, random_offsets};
pub use path::{PathRenderer, render_waveform_path};
pub use strategy::{Strategy, select_strategy};

use crate::error::ColorParseError;
use crate::geom::{ScreenPoint, ScreenRect};

/// RGBA color in linear space.
///
/// All components are expected to be in the 0.0..=1.0 range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel.
    pub a: f32,
}

impl Color {
    /// Create a new color.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    /// Opaque white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);

    /// Create an opaque color from 8-bit channels.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
            1.0,
        )
    }

    /// Return the same color with a different alpha.
    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    /// Parse a CSS color: `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`,
    /// `rgb(r, g, b)`, `rgba(r, g, b, a)` or a basic color keyword.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if let Some(digits) = trimmed.strip_prefix('#') {
            return parse_hex(value, digits);
        }
        let lower = trimmed.to_ascii_lowercase();
        if let Some(args) = lower
            .strip_prefix("rgba(")
            .or_else(|| lower.strip_prefix("rgb("))
        {
            return parse_rgb_function(value, args);
        }
        named_color(&lower).ok_or_else(|| ColorParseError::UnknownName(value.to_string()))
    }
}

fn parse_hex(value: &str, digits: &str) -> Result<Color, ColorParseError> {
    if !digits.bytes().all(|byte| byte.is_ascii_hexdigit()) {
        return Err(ColorParseError::InvalidDigit(value.to_string()));
    }
    let channel = |index: usize, width: usize| -> f32 {
        let raw = u8::from_str_radix(&digits[index * width..(index + 1) * width], 16)
            .unwrap_or_default();
        let raw = if width == 1 { raw * 17 } else { raw };
        f32::from(raw) / 255.0
    };
    match digits.len() {
        3 => Ok(Color::new(channel(0, 1), channel(1, 1), channel(2, 1), 1.0)),
        4 => Ok(Color::new(
            channel(0, 1),
            channel(1, 1),
            channel(2, 1),
            channel(3, 1),
        )),
        6 => Ok(Color::new(channel(0, 2), channel(1, 2), channel(2, 2), 1.0)),
        8 => Ok(Color::new(
            channel(0, 2),
            channel(1, 2),
            channel(2, 2),
            channel(3, 2),
        )),
        _ => Err(ColorParseError::InvalidLength(value.to_string())),
    }
}

/// Parse the argument list of `rgb(...)`/`rgba(...)`. Channels are `0..=255`
/// or percentages, alpha is `0..=1` or a percentage.
fn parse_rgb_function(value: &str, args: &str) -> Result<Color, ColorParseError> {
    let invalid = || ColorParseError::InvalidFunction(value.to_string());
    let args = args.strip_suffix(')').ok_or_else(invalid)?;
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    if parts.len() != 3 && parts.len() != 4 {
        return Err(invalid());
    }
    let number = |part: &str, full: f32| -> Result<f32, ColorParseError> {
        let parsed = match part.strip_suffix('%') {
            Some(percent) => percent.trim().parse::<f32>().map(|p| p / 100.0),
            None => part.parse::<f32>().map(|v| v / full),
        };
        match parsed {
            Ok(v) if v.is_finite() => Ok(v.clamp(0.0, 1.0)),
            _ => Err(invalid()),
        }
    };
    let alpha = match parts.get(3) {
        Some(&part) => number(part, 1.0)?,
        None => 1.0,
    };
    Ok(Color::new(
        number(parts[0], 255.0)?,
        number(parts[1], 255.0)?,
        number(parts[2], 255.0)?,
        alpha,
    ))
}

fn named_color(name: &str) -> Option<Color> {
    let color = match name {
        "transparent" => return Some(Color::new(0.0, 0.0, 0.0, 0.0)),
        "black" => Color::from_rgb8(0x00, 0x00, 0x00),
        "silver" => Color::from_rgb8(0xc0, 0xc0, 0xc0),
        "gray" | "grey" => Color::from_rgb8(0x80, 0x80, 0x80),
        "white" => Color::from_rgb8(0xff, 0xff, 0xff),
        "maroon" => Color::from_rgb8(0x80, 0x00, 0x00),
        "red" => Color::from_rgb8(0xff, 0x00, 0x00),
        "purple" => Color::from_rgb8(0x80, 0x00, 0x80),
        "fuchsia" | "magenta" => Color::from_rgb8(0xff, 0x00, 0xff),
        "green" => Color::from_rgb8(0x00, 0x80, 0x00),
        "lime" => Color::from_rgb8(0x00, 0xff, 0x00),
        "olive" => Color::from_rgb8(0x80, 0x80, 0x00),
        "yellow" => Color::from_rgb8(0xff, 0xff, 0x00),
        "navy" => Color::from_rgb8(0x00, 0x00, 0x80),
        "blue" => Color::from_rgb8(0x00, 0x00, 0xff),
        "teal" => Color::from_rgb8(0x00, 0x80, 0x80),
        "aqua" | "cyan" => Color::from_rgb8(0x00, 0xff, 0xff),
        "orange" => Color::from_rgb8(0xff, 0xa5, 0x00),
        _ => return None,
    };
    Some(color)
}

/// Line stroke styling.
///
/// The width is expressed in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    /// Stroke color.
    pub color: Color,
    /// Stroke width in pixels.
    pub width: f32,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: 1.0,
        }
    }
}

/// Text styling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Text color.
    pub color: Color,
    /// Font size in pixels.
    pub size: f32,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            size: 12.0,
        }
    }
}

/// Drawing sink used by the path renderer.
///
/// Coordinates are canvas pixels with the origin at the top-left corner.
/// Text is drawn with its top-left corner at the given origin.
pub trait Surface {
    /// Surface size in pixels as `(width, height)`.
    fn size(&self) -> (u32, u32);

    /// Clear a rectangle to transparent.
    fn clear_rect(&mut self, rect: ScreenRect);

    /// Fill a circle.
    fn fill_circle(&mut self, center: ScreenPoint, radius: f32, color: Color);

    /// Fill a rectangle.
    fn fill_rect(&mut self, rect: ScreenRect, color: Color);

    /// Stroke a single line segment.
    fn stroke_line(&mut self, start: ScreenPoint, end: ScreenPoint, style: LineStyle);

    /// Stroke a connected polyline.
    fn stroke_polyline(&mut self, points: &[ScreenPoint], style: LineStyle);

    /// Measure the advance width of a single-line text.
    fn measure_text(&self, text: &str, font_size: f32) -> f32;

    /// Draw text.
    fn fill_text(&mut self, origin: ScreenPoint, text: &str, style: TextStyle);
}

/// Text measurement provider.
pub trait TextMeasurer {
    /// Measure text dimensions in pixels as `(width, height)`.
    fn measure(&self, text: &str, size: f32) -> (f32, f32);
}

/// Measurer assuming a fixed advance per character.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedAdvance {
    /// Advance per character as a fraction of the font size.
    pub advance: f32,
}

impl Default for FixedAdvance {
    fn default() -> Self {
        Self { advance: 0.6 }
    }
}

impl TextMeasurer for FixedAdvance {
    fn measure(&self, text: &str, size: f32) -> (f32, f32) {
        let chars = text.chars().count() as f32;
        (chars * size * self.advance, size * 1.2)
    }
}

/// A single recorded drawing call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Clear a rectangle.
    Clear(ScreenRect),
    /// Fill a circle.
    Circle {
        /// Circle center.
        center: ScreenPoint,
        /// Circle radius.
        radius: f32,
        /// Fill color.
        color: Color,
    },
    /// Fill a rectangle.
    Rect {
        /// Rectangle bounds.
        rect: ScreenRect,
        /// Fill color.
        color: Color,
    },
    /// Stroke a line segment.
    Line {
        /// Segment start.
        start: ScreenPoint,
        /// Segment end.
        end: ScreenPoint,
        /// Stroke styling.
        style: LineStyle,
    },
    /// Stroke a polyline.
    Polyline {
        /// Polyline vertices.
        points: Vec<ScreenPoint>,
        /// Stroke styling.
        style: LineStyle,
    },
    /// Draw text.
    Text {
        /// Top-left corner of the text.
        position: ScreenPoint,
        /// Text content.
        text: String,
        /// Text styling.
        style: TextStyle,
    },
}

/// Recording surface.
///
/// Clearing the whole surface drops every earlier command, so the list only
/// holds what is currently visible.
#[derive(Debug, Clone)]
pub struct RenderList<M = FixedAdvance> {
    width: u32,
    height: u32,
    commands: Vec<DrawCommand>,
    measurer: M,
}

impl RenderList {
    /// Create an empty render list for a surface size.
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_measurer(width, height, FixedAdvance::default())
    }
}

impl<M: TextMeasurer> RenderList<M> {
    /// Create an empty render list with a custom text measurer.
    pub fn with_measurer(width: u32, height: u32, measurer: M) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
            measurer,
        }
    }

    /// Access all recorded commands.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Resize the surface, dropping its content.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.commands.clear();
    }

    /// Replace the text measurer.
    pub fn set_measurer(&mut self, measurer: M) {
        self.measurer = measurer;
    }

    /// Full surface rectangle.
    pub fn bounds(&self) -> ScreenRect {
        ScreenRect::from_origin_size(0.0, 0.0, self.width as f32, self.height as f32)
    }
}

impl<M: TextMeasurer> Surface for RenderList<M> {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear_rect(&mut self, rect: ScreenRect) {
        if rect.covers(&self.bounds()) {
            self.commands.clear();
        }
        self.commands.push(DrawCommand::Clear(rect));
    }

    fn fill_circle(&mut self, center: ScreenPoint, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn fill_rect(&mut self, rect: ScreenRect, color: Color) {
        self.commands.push(DrawCommand::Rect { rect, color });
    }

    fn stroke_line(&mut self, start: ScreenPoint, end: ScreenPoint, style: LineStyle) {
        self.commands.push(DrawCommand::Line { start, end, style });
    }

    fn stroke_polyline(&mut self, points: &[ScreenPoint], style: LineStyle) {
        if points.len() < 2 {
            return;
        }
        self.commands.push(DrawCommand::Polyline {
            points: points.to_vec(),
            style,
        });
    }

    fn measure_text(&self, text: &str, font_size: f32) -> f32 {
        self.measurer.measure(text, font_size).0
    }

    fn fill_text(&mut self, origin: ScreenPoint, text: &str, style: TextStyle) {
        if text.is_empty() {
            return;
        }
        self.commands.push(DrawCommand::Text {
            position: origin,
            text: text.to_string(),
            style,
        });
    }
}
