use crate::geometry::Point;

/// Even-odd point-in-polygon test.
///
/// Casts a horizontal ray towards +x and counts the edges it crosses. Only
/// edges with exactly one endpoint strictly below `point.y` count, so
/// horizontal edges never do. Points on an edge or vertex may land on either
/// side.
pub fn point_in_polygon(point: Point, vertices: &[Point]) -> bool {
    let n = vertices.len();
    let mut inside = false;
    let mut j = n.wrapping_sub(1);
    for i in 0..n {
        let (vi, vj) = (vertices[i], vertices[j]);
        if (vi.y > point.y) != (vj.y > point.y) {
            let intersect_x = (vj.x - vi.x) * (point.y - vi.y) / (vj.y - vi.y) + vi.x;
            if point.x < intersect_x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Squared euclidean distance between two points
pub fn distance_squared(a: Point, b: Point) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    dx * dx + dy * dy
}
