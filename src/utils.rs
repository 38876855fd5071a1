use iced::{Color, Point};
use nalgebra::Point2;

use crate::scene::{FillStyle, StrokeStyle};

pub fn to_canvas(point: &Point2<f32>) -> Point {
    Point::new(point.x, point.y)
}

/// Cursor position relative to the canvas origin.
pub fn from_canvas(cursor: Point, origin: Point) -> Point2<f32> {
    let point = cursor - origin;
    Point2::new(point.x, point.y)
}

pub fn stroke_color(style: StrokeStyle) -> Color {
    match style {
        StrokeStyle::Dark => Color::from_rgba(0.15, 0.15, 0.2, 1.0),
        StrokeStyle::Light => Color::from_rgba(0.55, 0.55, 0.6, 0.8),
        StrokeStyle::Highlighted => Color::from_rgba(0.8, 0.8, 0.2, 0.9),
    }
}

pub fn fill_color(style: FillStyle) -> Color {
    match style {
        FillStyle::Shadow => Color::from_rgba(0.3, 0.3, 0.35, 0.5),
        FillStyle::Background => Color::from_rgba(0.96, 0.95, 0.92, 1.0),
        FillStyle::ControlPoint => Color::from_rgba(0.8, 0.8, 0.8, 0.6),
        FillStyle::HighlightedControlPoint => Color::from_rgba(0.8, 0.8, 0.2, 0.8),
    }
}
