use crate::math::point_in_polygon;

/// A point in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

/// Light source, drawn as a filled disc
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub x: f64,
    pub y: f64,
    /// Display radius of the disc
    pub radius: f64,
}

impl Circle {
    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// A single ray of the fan cast from the light
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub x_start: f64,
    pub y_start: f64,
    /// Direction in radians
    pub angle: f64,
}

impl Ray {
    pub fn origin(&self) -> Point {
        Point::new(self.x_start, self.y_start)
    }

    /// Unit direction vector (cos, sin)
    pub fn direction(&self) -> (f64, f64) {
        let (sin, cos) = self.angle.sin_cos();
        (cos, sin)
    }
}

/// Closed vertex ring; the last vertex connects back to the first.
///
/// The ring is fixed once built. Winding direction does not matter and the
/// ring may self-intersect.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Point>,
}

impl Polygon {
    pub fn new(vertices: Vec<Point>) -> Self {
        Polygon { vertices }
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Edges as `(predecessor, vertex)` pairs, starting with the closing edge
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[(i + n - 1) % n], self.vertices[i]))
    }

    /// Even-odd membership of `point`
    pub fn contains(&self, point: Point) -> bool {
        point_in_polygon(point, &self.vertices)
    }

    /// The silhouette shown when no polygon file is given
    pub fn gallery() -> Self {
        const VERTICES: [(f64, f64); 24] = [
            (578.0, 316.0),
            (607.0, 419.0),
            (585.0, 427.0),
            (601.0, 454.0),
            (566.0, 452.0),
            (428.0, 366.0),
            (388.0, 470.0),
            (311.0, 490.0),
            (292.0, 292.0),
            (274.0, 387.0),
            (200.0, 453.0),
            (167.0, 397.0),
            (176.0, 384.0),
            (175.0, 275.0),
            (119.0, 259.0),
            (223.0, 256.0),
            (206.0, 189.0),
            (202.0, 53.0),
            (216.0, 49.0),
            (366.0, 381.0),
            (466.0, 132.0),
            (517.0, 120.0),
            (480.0, 187.0),
            (499.0, 198.0),
        ];
        Polygon::new(VERTICES.iter().map(|&(x, y)| Point::new(x, y)).collect())
    }
}
