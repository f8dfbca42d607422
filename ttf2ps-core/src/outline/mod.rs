//! Glyph outline geometry
//!
//! Coordinates are integers throughout: design units while parsing and
//! 1/1000 em once scaled for PostScript. Curve control points are the only
//! values computed in floating point.

mod contour;
mod curve;

pub use contour::{emission_order, nearest_outer, signed_area, ContourKind};
pub use curve::{quadratic_run_to_cubics, CubicSegment, CurvePoint};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub(crate) fn distance_squared(self, other: Point) -> i64 {
        let dx = i64::from(self.x) - i64::from(other.x);
        let dy = i64::from(self.y) - i64::from(other.y);
        dx * dx + dy * dy
    }
}

/// An outline point and whether it lies on the curve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContourPoint {
    pub point: Point,
    pub on_curve: bool,
}

impl ContourPoint {
    pub const fn on(x: i32, y: i32) -> Self {
        Self {
            point: Point::new(x, y),
            on_curve: true,
        }
    }

    pub const fn off(x: i32, y: i32) -> Self {
        Self {
            point: Point::new(x, y),
            on_curve: false,
        }
    }
}
