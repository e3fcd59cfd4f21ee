use imageproc::point::Point;
use std::f64::consts::FRAC_1_SQRT_2;

/// Rounds of "jump to the farthest point" used to pick the two split pivots
const PIVOT_ROUNDS: usize = 3;

fn distance(a: Point<i32>, b: Point<i32>) -> f64 {
    let dx = (b.x - a.x) as f64;
    let dy = (b.y - a.y) as f64;
    dx.hypot(dy)
}

/// Perpendicular distance from `p` to the line through `a` and `b`.
/// Degenerates to the distance from `a` when both ends coincide.
fn line_distance(p: Point<i32>, a: Point<i32>, b: Point<i32>) -> f64 {
    let dx = (b.x - a.x) as f64;
    let dy = (b.y - a.y) as f64;
    let len = dx.hypot(dy);
    if len == 0.0 {
        return distance(a, p);
    }
    (((p.x - a.x) as f64) * dy - ((p.y - a.y) as f64) * dx).abs() / len
}

/// Length of a polyline; `closed` adds the segment from the last point back to the first
pub fn arc_length(points: &[Point<i32>], closed: bool) -> f64 {
    let mut length: f64 = points.windows(2).map(|w| distance(w[0], w[1])).sum();
    if closed && points.len() > 1 {
        length += distance(points[points.len() - 1], points[0]);
    }
    length
}

fn farthest_from(points: &[Point<i32>], origin: usize) -> (usize, f64) {
    let mut best = (origin, 0.0);
    for (idx, point) in points.iter().enumerate() {
        let d = distance(points[origin], *point);
        if d > best.1 {
            best = (idx, d);
        }
    }
    best
}

/// Simplify a closed contour with Douglas-Peucker.
///
/// The ring is cut at two mutually distant pivots and each half is simplified
/// on its own, so the result does not depend on where the contour happens to
/// start. Vertices are returned in contour order without repeating the first
/// point at the end. A ring that fits within `tolerance` of a single point
/// collapses to that point.
pub fn approximate_closed_polygon(points: &[Point<i32>], tolerance: f64) -> Vec<Point<i32>> {
    let n = points.len();
    if n < 3 {
        return points.to_vec();
    }

    let mut start = 0;
    let (mut far, mut max_dist) = farthest_from(points, start);
    for _ in 1..PIVOT_ROUNDS {
        start = far;
        (far, max_dist) = farthest_from(points, start);
    }

    if max_dist <= tolerance {
        return vec![points[start]];
    }

    let mut vertices = Vec::new();
    // Slices are (from, to) index pairs walked forward around the ring
    let mut stack = vec![(far, start), (start, far)];

    while let Some((from, to)) = stack.pop() {
        let span = (to + n - from) % n;
        let mut split = None;
        let mut split_dist = 0.0;

        for offset in 1..span {
            let idx = (from + offset) % n;
            let d = line_distance(points[idx], points[from], points[to]);
            if d > split_dist {
                split = Some(idx);
                split_dist = d;
            }
        }

        match split {
            Some(idx) if split_dist > tolerance => {
                stack.push((idx, to));
                stack.push((from, idx));
            }
            _ => vertices.push(points[from]),
        }
    }

    remove_collinear(vertices, tolerance)
}

/// Drop vertices that sit between their neighbours and within a fraction of the tolerance
/// of the segment joining them.
fn remove_collinear(mut vertices: Vec<Point<i32>>, tolerance: f64) -> Vec<Point<i32>> {
    let limit = tolerance * FRAC_1_SQRT_2;
    let mut i = 0;

    while vertices.len() > 2 && i < vertices.len() {
        let n = vertices.len();
        let prev = vertices[(i + n - 1) % n];
        let cur = vertices[i];
        let next = vertices[(i + 1) % n];

        let forward = (cur.x - prev.x) as i64 * (next.x - cur.x) as i64
            + (cur.y - prev.y) as i64 * (next.y - cur.y) as i64;

        if forward >= 0 && line_distance(cur, prev, next) <= limit {
            vertices.remove(i);
        } else {
            i += 1;
        }
    }

    vertices
}
