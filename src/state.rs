use tracing::debug;

use crate::config::Config;
use crate::geometry::{Circle, Point, Polygon, Ray};
use crate::graphics::{fill_circle, fill_polygon, fill_ray_segments, Color, Surface};
use crate::tracer::{generate_rays, VisibilityTracer};

/// Per-frame drawing summary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Ray samples drawn this frame
    pub visible_points: usize,
}

/// Scene state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Obstacle, fixed for the whole run
    polygon: Polygon,
    /// Light source, moved by dragging
    light: Circle,
    /// Where the light starts and returns to on reset
    light_start: Point,
    /// Fan cast from the current light position
    rays: Vec<Ray>,
    ray_count: usize,
    thickness: u32,
    tracer: VisibilityTracer,
}

impl AppState {
    pub fn new(config: &Config, polygon: Polygon) -> Self {
        let light = config.light();
        AppState {
            polygon,
            light,
            light_start: config.light_start(),
            rays: generate_rays(light.center(), config.rays),
            ray_count: config.rays,
            thickness: config.thickness,
            tracer: VisibilityTracer::new(config.bounds(), config.step),
        }
    }

    pub fn polygon(&self) -> &Polygon {
        &self.polygon
    }

    pub fn light(&self) -> &Circle {
        &self.light
    }

    pub fn rays(&self) -> &[Ray] {
        &self.rays
    }

    /// Moves the light and recasts its rays; returns false if it was already there
    pub fn move_light(&mut self, x: f64, y: f64) -> bool {
        if self.light.x == x && self.light.y == y {
            return false;
        }
        self.light.x = x;
        self.light.y = y;
        self.rays = generate_rays(self.light.center(), self.ray_count);
        debug!(x, y, "Light moved");
        true
    }

    pub fn reset_light(&mut self) -> bool {
        self.move_light(self.light_start.x, self.light_start.y)
    }

    /// Visible samples for every ray of the current fan
    pub fn visible_points(&self) -> Vec<Vec<Point>> {
        self.tracer.trace_all(&self.rays, &self.polygon)
    }

    /// Redraws the whole frame: obstacle outline, ray samples, then the light
    pub fn render(&self, surface: &mut impl Surface) -> FrameStats {
        surface.clear(Color::BLACK);
        fill_polygon(surface, &self.polygon, Color::WHITE);

        let mut stats = FrameStats::default();
        for points in self.visible_points() {
            fill_ray_segments(surface, &points, Color::YELLOW, self.thickness);
            stats.visible_points += points.len();
        }

        fill_circle(surface, &self.light, Color::YELLOW);
        stats
    }
}
