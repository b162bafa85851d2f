use crate::geometry::{Circle, Point, Polygon};
use crate::math::distance_squared;

/// Opaque 32-bit colour token, `0xAARRGGBB` by convention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(pub u32);

impl Color {
    pub const BLACK: Color = Color(0x0000_0000);
    pub const WHITE: Color = Color(0xffff_ffff);
    pub const YELLOW: Color = Color(0xffff_ff00);

    /// Red, green and blue channels
    pub fn rgb8(self) -> (u8, u8, u8) {
        let [_, r, g, b] = self.0.to_be_bytes();
        (r, g, b)
    }
}

/// Pixel sink the rasterizer draws into.
///
/// Coordinates outside the surface must be ignored.
pub trait Surface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn set_pixel(&mut self, x: i64, y: i64, color: Color);

    fn fill_rect(&mut self, x: i64, y: i64, w: u32, h: u32, color: Color) {
        for py in y..y + h as i64 {
            for px in x..x + w as i64 {
                self.set_pixel(px, py, color);
            }
        }
    }

    fn clear(&mut self, color: Color) {
        self.fill_rect(0, 0, self.width(), self.height(), color);
    }
}

/// In-memory surface, row-major
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        FrameBuffer {
            width,
            height,
            pixels: vec![Color::BLACK; width as usize * height as usize],
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x < self.width && y < self.height {
            Some(self.pixels[y as usize * self.width as usize + x as usize])
        } else {
            None
        }
    }

    /// One row of pixels
    pub fn row(&self, y: u32) -> &[Color] {
        let start = y as usize * self.width as usize;
        &self.pixels[start..start + self.width as usize]
    }

    fn offset(&self, x: i64, y: i64) -> Option<usize> {
        if x >= 0 && x < self.width as i64 && y >= 0 && y < self.height as i64 {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }
}

impl Surface for FrameBuffer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn set_pixel(&mut self, x: i64, y: i64, color: Color) {
        if let Some(offset) = self.offset(x, y) {
            self.pixels[offset] = color;
        }
    }

    fn clear(&mut self, color: Color) {
        self.pixels.fill(color);
    }
}

fn plot(surface: &mut impl Surface, x: f64, y: f64, color: Color) {
    surface.set_pixel(x.floor() as i64, y.floor() as i64, color);
}

/// First unit-spaced sample from `start` that is not below `low`
fn skip_to(start: f64, low: f64) -> f64 {
    if start < low {
        start + (low - start).floor()
    } else {
        start
    }
}

/// Fills every sample of the circle's bounding box strictly inside its radius.
///
/// Samples are only visited where they can land on the surface.
pub fn fill_circle(surface: &mut impl Surface, circle: &Circle, color: Color) {
    let radius_squared = circle.radius * circle.radius;
    let center = circle.center();
    let x_end = (circle.x + circle.radius).min(surface.width() as f64);
    let y_end = (circle.y + circle.radius).min(surface.height() as f64);

    let mut x = skip_to(circle.x - circle.radius, -1.0);
    while x <= x_end {
        let mut y = skip_to(circle.y - circle.radius, -1.0);
        while y <= y_end {
            if distance_squared(Point::new(x, y), center) < radius_squared {
                plot(surface, x, y, color);
            }
            y += 1.0;
        }
        x += 1.0;
    }
}

/// Draws a line between two points by equal-step interpolation.
///
/// The step count is the larger axis delta, so steep and shallow lines are
/// both gap free. Both endpoints are plotted.
pub fn draw_line(surface: &mut impl Surface, from: Point, to: Point, color: Color) {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let steps = dx.abs().max(dy.abs());
    if steps == 0.0 {
        plot(surface, from.x, from.y, color);
        return;
    }

    let x_inc = dx / steps;
    let y_inc = dy / steps;
    let (mut x, mut y) = (from.x, from.y);
    let mut j = 0.0;
    while j <= steps {
        plot(surface, x, y, color);
        x += x_inc;
        y += y_inc;
        j += 1.0;
    }
}

/// Outlines the polygon, closing edge included
pub fn fill_polygon(surface: &mut impl Surface, polygon: &Polygon, color: Color) {
    for (from, to) in polygon.edges() {
        draw_line(surface, from, to, color);
    }
}

/// Draws each traced sample as a `thickness`-sided square
pub fn fill_ray_segments(
    surface: &mut impl Surface,
    points: &[Point],
    color: Color,
    thickness: u32,
) {
    for point in points {
        surface.fill_rect(
            point.x.floor() as i64,
            point.y.floor() as i64,
            thickness,
            thickness,
            color,
        );
    }
}
