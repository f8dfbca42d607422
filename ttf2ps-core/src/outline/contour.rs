use tracing::warn;

use super::Point;

/// Orientation class of a contour from its signed area
///
/// TrueType draws filled regions clockwise, which the shoelace sum over
/// y-up coordinates reports as negative. Counter-clockwise contours are
/// holes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContourKind {
    Outer,
    Hole,
    Degenerate,
}

impl ContourKind {
    pub fn from_area(area: f64) -> Self {
        if area < 0.0 {
            ContourKind::Outer
        } else if area > 0.0 {
            ContourKind::Hole
        } else {
            ContourKind::Degenerate
        }
    }
}

fn cross(a: Point, b: Point) -> i64 {
    i64::from(a.x) * i64::from(b.y) - i64::from(a.y) * i64::from(b.x)
}

/// Twice the signed area of a closed polygon (shoelace sum).
pub fn signed_area(points: &[Point]) -> f64 {
    let Some((&last, _)) = points.split_last() else {
        return 0.0;
    };

    let sum = points
        .windows(2)
        .fold(cross(last, points[0]), |sum, pair| sum + cross(pair[0], pair[1]));
    sum as f64
}

/// Area of the triangle formed by `probe` and the two neighbours of the
/// point of `outer` nearest to it.
fn local_triangle_area(outer: &[Point], probe: Point) -> f64 {
    let n = outer.len();
    if n == 0 {
        return 0.0;
    }

    let mut nearest = 0;
    let mut best = outer[0].distance_squared(probe);
    for (i, point) in outer.iter().enumerate() {
        let distance = point.distance_squared(probe);
        if distance < best {
            best = distance;
            nearest = i;
        }
    }

    let prev = if nearest == 0 { outer[n - 1] } else { outer[nearest - 1] };
    let next = if nearest == n - 1 { outer[0] } else { outer[nearest + 1] };
    signed_area(&[probe, prev, next])
}

/// Pick the outer contour that most plausibly encloses `hole`.
///
/// Candidates are outer contours whose local triangle test against the
/// hole's first point is negative; the one closest to zero wins. This is a
/// proximity heuristic and can mispair holes in unusual glyphs.
pub fn nearest_outer(contours: &[&[Point]], areas: &[f64], hole: usize) -> Option<usize> {
    let probe = *contours.get(hole)?.first()?;

    let mut best: Option<(usize, f64)> = None;
    for (index, outer) in contours.iter().enumerate() {
        if ContourKind::from_area(areas[index]) != ContourKind::Outer {
            continue;
        }

        let area = local_triangle_area(outer, probe);
        if area < 0.0 && best.map_or(true, |(_, found)| area > found) {
            best = Some((index, area));
        }
    }

    best.map(|(index, _)| index)
}

/// Order in which contours are drawn.
///
/// Contour 0 comes first. After each contour, the next unvisited hole paired
/// with the current outer contour follows; when none is left the next
/// unvisited outer contour starts a new group. Degenerate contours other
/// than contour 0 are skipped.
pub fn emission_order(contours: &[&[Point]]) -> Vec<usize> {
    let count = contours.len();
    if count == 0 {
        return Vec::new();
    }

    let areas: Vec<f64> = contours.iter().map(|c| signed_area(c)).collect();
    let pairs: Vec<Option<usize>> = (0..count)
        .map(|index| match ContourKind::from_area(areas[index]) {
            ContourKind::Hole => Some(nearest_outer(contours, &areas, index).unwrap_or_else(|| {
                warn!(contour = index, "hole contour has no enclosing outer contour");
                0
            })),
            _ => None,
        })
        .collect();

    let mut visited = vec![false; count];
    visited[0] = true;

    let mut order = Vec::with_capacity(count);
    let mut outer = 0;
    let mut current = 0;
    loop {
        order.push(current);

        let next_hole = (0..count).find(|&j| pairs[j] == Some(outer) && !visited[j]);
        if let Some(hole) = next_hole {
            visited[hole] = true;
            current = hole;
            continue;
        }

        let next_outer = (0..count)
            .find(|&j| !visited[j] && ContourKind::from_area(areas[j]) == ContourKind::Outer);
        match next_outer {
            Some(index) => {
                visited[index] = true;
                outer = index;
                current = index;
            }
            None => break,
        }
    }

    order
}
