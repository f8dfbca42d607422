use super::Point;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurvePoint {
    pub x: f64,
    pub y: f64,
}

impl CurvePoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<Point> for CurvePoint {
    fn from(point: Point) -> Self {
        Self::new(f64::from(point.x), f64::from(point.y))
    }
}

/// One cubic Bézier segment; the start point is the previous segment's end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicSegment {
    pub c1: CurvePoint,
    pub c2: CurvePoint,
    pub end: CurvePoint,
}

impl CubicSegment {
    /// Degree-elevate the quadratic `p0, q, p1`.
    pub fn from_quadratic(p0: CurvePoint, q: CurvePoint, p1: CurvePoint) -> Self {
        Self {
            c1: CurvePoint::new((2.0 * q.x + p0.x) / 3.0, (2.0 * q.y + p0.y) / 3.0),
            c2: CurvePoint::new((p1.x + 2.0 * q.x) / 3.0, (p1.y + 2.0 * q.y) / 3.0),
            end: p1,
        }
    }
}

fn midpoint(a: Point, b: Point) -> Point {
    Point::new((a.x + b.x) / 2, (a.y + b.y) / 2)
}

/// Convert a run of consecutive off-curve points into cubic segments.
///
/// Between two adjacent off-curve points the implied on-curve point is
/// their midpoint, rounded toward zero on the integer grid.
pub fn quadratic_run_to_cubics(start: Point, controls: &[Point], end: Point) -> Vec<CubicSegment> {
    let last = controls.len().saturating_sub(1);
    controls
        .iter()
        .enumerate()
        .map(|(i, &control)| {
            let p0 = if i == 0 {
                start
            } else {
                midpoint(controls[i - 1], control)
            };
            let p1 = if i == last {
                end
            } else {
                midpoint(control, controls[i + 1])
            };
            CubicSegment::from_quadratic(p0.into(), control.into(), p1.into())
        })
        .collect()
}
