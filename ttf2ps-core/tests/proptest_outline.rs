//! Property-based tests for outline geometry
//!
//! Checks the contour area used for winding classification and the
//! quadratic to cubic conversion used by Type 3 output.

use proptest::prelude::*;
use ttf2ps::outline::{
    emission_order, quadratic_run_to_cubics, signed_area, CubicSegment, CurvePoint, Point,
};

// Coordinates in the range glyphs actually use, in 1/1000 em
fn coordinate() -> impl Strategy<Value = i32> {
    prop_oneof![-2000..2000i32, Just(0), Just(1000), Just(-1000)]
}

prop_compose! {
    fn point_strategy()(x in coordinate(), y in coordinate()) -> Point {
        Point::new(x, y)
    }
}

fn polygon_strategy() -> impl Strategy<Value = Vec<Point>> {
    prop::collection::vec(point_strategy(), 3..40)
}

fn quadratic(p0: CurvePoint, q: CurvePoint, p1: CurvePoint, t: f64) -> (f64, f64) {
    let u = 1.0 - t;
    (
        u * u * p0.x + 2.0 * u * t * q.x + t * t * p1.x,
        u * u * p0.y + 2.0 * u * t * q.y + t * t * p1.y,
    )
}

fn cubic(p0: CurvePoint, segment: &CubicSegment, t: f64) -> (f64, f64) {
    let u = 1.0 - t;
    let (a, b, c, d) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
    (
        a * p0.x + b * segment.c1.x + c * segment.c2.x + d * segment.end.x,
        a * p0.y + b * segment.c1.y + c * segment.c2.y + d * segment.end.y,
    )
}

proptest! {
    #[test]
    fn test_area_invariant_under_rotation(points in polygon_strategy(), shift in 0usize..40) {
        let mut rotated = points.clone();
        rotated.rotate_left(shift % points.len());
        prop_assert_eq!(signed_area(&points), signed_area(&rotated));
    }

    #[test]
    fn test_area_negated_under_reversal(points in polygon_strategy()) {
        let mut reversed = points.clone();
        reversed.reverse();
        prop_assert_eq!(signed_area(&points), -signed_area(&reversed));
    }

    #[test]
    fn test_single_quadratic_is_degree_elevated(
        p0 in point_strategy(),
        q in point_strategy(),
        p1 in point_strategy()
    ) {
        let segments = quadratic_run_to_cubics(p0, &[q], p1);
        prop_assert_eq!(segments.len(), 1);

        let (p0, q, p1) = (CurvePoint::from(p0), CurvePoint::from(q), CurvePoint::from(p1));
        for step in 0..=8 {
            let t = f64::from(step) / 8.0;
            let (qx, qy) = quadratic(p0, q, p1, t);
            let (cx, cy) = cubic(p0, &segments[0], t);
            prop_assert!((qx - cx).abs() < 1e-6, "x differs at t={}: {} vs {}", t, qx, cx);
            prop_assert!((qy - cy).abs() < 1e-6, "y differs at t={}: {} vs {}", t, qy, cy);
        }
    }

    #[test]
    fn test_run_endpoints_preserved(
        start in point_strategy(),
        controls in prop::collection::vec(point_strategy(), 1..8),
        end in point_strategy()
    ) {
        let segments = quadratic_run_to_cubics(start, &controls, end);
        prop_assert_eq!(segments.len(), controls.len());

        let last = segments.last().unwrap();
        prop_assert_eq!(last.end, CurvePoint::from(end));

        // Each interior segment ends on the integer midpoint of two controls
        for (i, segment) in segments.iter().take(controls.len() - 1).enumerate() {
            let a = controls[i];
            let b = controls[i + 1];
            let mid = Point::new((a.x + b.x) / 2, (a.y + b.y) / 2);
            prop_assert_eq!(segment.end, CurvePoint::from(mid));
        }
    }

    #[test]
    fn test_emission_order_visits_each_contour_once(
        contours in prop::collection::vec(polygon_strategy(), 1..6)
    ) {
        let slices: Vec<&[Point]> = contours.iter().map(Vec::as_slice).collect();
        let order = emission_order(&slices);

        prop_assert_eq!(order.first().copied(), Some(0));
        let mut seen = order.clone();
        seen.sort_unstable();
        seen.dedup();
        prop_assert_eq!(seen.len(), order.len());
        prop_assert!(order.iter().all(|&i| i < contours.len()));
    }
}
