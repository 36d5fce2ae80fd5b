use gpui::{
    App, BorderStyle, Bounds, Corners, Edges, PathBuilder, Pixels, Point, TextRun, Window, font,
    point, px, quad,
};

use crate::geom::{ScreenPoint, ScreenRect};
use crate::render::{Color, DrawCommand, LineStyle, TextStyle};

/// Replay recorded commands with the canvas origin at `origin`.
pub(crate) fn paint_commands(
    commands: &[DrawCommand],
    origin: Point<Pixels>,
    window: &mut Window,
    cx: &mut App,
) {
    let offset = ScreenPoint::new(f32::from(origin.x), f32::from(origin.y));
    for command in commands {
        match command {
            // Full clears already dropped earlier commands from the list.
            DrawCommand::Clear(_) => {}
            DrawCommand::Circle {
                center,
                radius,
                color,
            } => paint_circle(window, shift(*center, offset), *radius, *color),
            DrawCommand::Rect { rect, color } => {
                let rect = ScreenRect::new(shift(rect.min, offset), shift(rect.max, offset));
                paint_rect(window, rect, *color);
            }
            DrawCommand::Line { start, end, style } => {
                paint_polyline(window, &[shift(*start, offset), shift(*end, offset)], *style);
            }
            DrawCommand::Polyline { points, style } => {
                let points: Vec<_> = points.iter().map(|pt| shift(*pt, offset)).collect();
                paint_polyline(window, &points, *style);
            }
            DrawCommand::Text {
                position,
                text,
                style,
            } => paint_text(window, cx, shift(*position, offset), text, style),
        }
    }
}

fn paint_polyline(window: &mut Window, points: &[ScreenPoint], style: LineStyle) {
    let Some((first, rest)) = points.split_first() else {
        return;
    };
    if rest.is_empty() {
        return;
    }
    let width = style.width.max(0.5);
    let mut builder = PathBuilder::stroke(px(width));
    builder.move_to(point(px(first.x), px(first.y)));
    for pt in rest {
        builder.line_to(point(px(pt.x), px(pt.y)));
    }
    if let Ok(path) = builder.build() {
        window.paint_path(path, to_rgba(style.color));
    }
}

fn paint_circle(window: &mut Window, center: ScreenPoint, radius: f32, color: Color) {
    let bounds = Bounds::from_corners(
        point(px(center.x - radius), px(center.y - radius)),
        point(px(center.x + radius), px(center.y + radius)),
    );
    window.paint_quad(quad(
        bounds,
        Corners::all(px(radius)),
        to_rgba(color),
        Edges::all(px(0.0)),
        to_rgba(color),
        BorderStyle::default(),
    ));
}

fn paint_rect(window: &mut Window, rect: ScreenRect, color: Color) {
    window.paint_quad(quad(
        to_bounds(rect),
        Corners::all(px(0.0)),
        to_rgba(color),
        Edges::all(px(0.0)),
        to_rgba(color),
        BorderStyle::default(),
    ));
}

fn paint_text(
    window: &mut Window,
    cx: &mut App,
    position: ScreenPoint,
    text: &str,
    style: &TextStyle,
) {
    if text.is_empty() {
        return;
    }
    let run = TextRun {
        len: text.len(),
        font: font(".SystemUIFont"),
        color: to_hsla(style.color),
        background_color: None,
        underline: None,
        strikethrough: None,
    };
    let shaped = window
        .text_system()
        .shape_line(text.to_string().into(), px(style.size), &[run], None);
    let line_height = shaped.ascent + shaped.descent;
    let origin = point(px(position.x), px(position.y));
    let _ = shaped.paint(origin, line_height, window, cx);
}

fn shift(point: ScreenPoint, offset: ScreenPoint) -> ScreenPoint {
    ScreenPoint::new(point.x + offset.x, point.y + offset.y)
}

fn to_rgba(color: Color) -> gpui::Rgba {
    gpui::Rgba {
        r: color.r,
        g: color.g,
        b: color.b,
        a: color.a,
    }
}

pub(crate) fn to_hsla(color: Color) -> gpui::Hsla {
    gpui::Hsla::from(to_rgba(color))
}

fn to_bounds(rect: ScreenRect) -> Bounds<Pixels> {
    Bounds::from_corners(
        point(px(rect.min.x), px(rect.min.y)),
        point(px(rect.max.x), px(rect.max.y)),
    )
}
