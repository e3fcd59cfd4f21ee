//! Tests for perimeter measurement, polygon approximation and the vertex-count mapping.

use imageproc::point::Point;
use shapesense::detection::polygon::{approximate_closed_polygon, arc_length};
use shapesense::ShapeLabel;

/// Every integer point on the boundary of an axis-aligned square, clockwise from (x0, y0)
fn square_ring(x0: i32, y0: i32, side: i32) -> Vec<Point<i32>> {
    let mut points = Vec::new();
    for x in x0..x0 + side {
        points.push(Point::new(x, y0));
    }
    for y in y0..y0 + side {
        points.push(Point::new(x0 + side, y));
    }
    for x in (x0 + 1..=x0 + side).rev() {
        points.push(Point::new(x, y0 + side));
    }
    for y in (y0 + 1..=y0 + side).rev() {
        points.push(Point::new(x0, y));
    }
    points
}

#[test]
fn test_arc_length_open_and_closed() {
    let pts = [Point::new(0, 0), Point::new(3, 0), Point::new(3, 4)];
    assert_eq!(arc_length(&pts, false), 7.0);
    assert_eq!(arc_length(&pts, true), 12.0);
    assert_eq!(arc_length(&pts[..1], true), 0.0);
    assert_eq!(arc_length(&[], true), 0.0);
}

#[test]
fn test_square_ring_keeps_its_corners() {
    let ring = square_ring(10, 10, 100);
    let perimeter = arc_length(&ring, true);
    assert_eq!(perimeter, 400.0);

    let mut approx = approximate_closed_polygon(&ring, 0.03 * perimeter);
    approx.sort_by_key(|p| (p.x, p.y));
    assert_eq!(
        approx,
        vec![
            Point::new(10, 10),
            Point::new(10, 110),
            Point::new(110, 10),
            Point::new(110, 110),
        ]
    );
}

#[test]
fn test_result_is_independent_of_start_point() {
    let ring = square_ring(0, 0, 60);
    for shift in [0, 7, 31, 59, 120] {
        let mut rotated = ring.clone();
        rotated.rotate_left(shift);
        let approx = approximate_closed_polygon(&rotated, 0.03 * arc_length(&rotated, true));
        assert_eq!(approx.len(), 4, "start shifted by {}", shift);
    }
}

#[test]
fn test_tiny_rings_collapse() {
    assert_eq!(approximate_closed_polygon(&[Point::new(4, 4)], 0.0).len(), 1);

    let pair = [Point::new(0, 0), Point::new(1, 0)];
    assert_eq!(approximate_closed_polygon(&pair, 0.06).len(), 2);

    // Everything within tolerance of one point
    let blob = [Point::new(0, 0), Point::new(1, 0), Point::new(1, 1), Point::new(0, 1)];
    assert_eq!(approximate_closed_polygon(&blob, 5.0).len(), 1);
}

#[test]
fn test_vertex_count_partition() {
    let expected = |v: usize| match v {
        v if v < 3 => "unknown",
        3 => "triangle",
        4 => "rectangle",
        5 => "pentagon",
        6 => "hexagon",
        _ => "circle",
    };

    for v in 0..1000 {
        assert_eq!(ShapeLabel::from_vertex_count(v).as_str(), expected(v), "v = {}", v);
    }
    assert_eq!(ShapeLabel::from_vertex_count(usize::MAX), ShapeLabel::Circle);
}

#[test]
fn test_labels_serialize_to_wire_strings() -> anyhow::Result<()> {
    assert_eq!(serde_json::to_string(&ShapeLabel::NotFound)?, "\"shape not found\"");
    assert_eq!(serde_json::to_string(&ShapeLabel::Pentagon)?, "\"pentagon\"");
    assert_eq!(ShapeLabel::Hexagon.to_string(), "hexagon");
    Ok(())
}
