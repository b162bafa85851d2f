//! Ray fan generation and per-ray visibility marching.

use std::f64::consts::PI;

use crate::geometry::{Point, Polygon, Ray};

/// Smallest usable step; the step cap treats finer steps as this one
pub const MIN_STEP: f64 = 1e-3;

/// Casts `count` rays from `center` at angles `2π·i/count`
pub fn generate_rays(center: Point, count: usize) -> Vec<Ray> {
    (0..count)
        .map(|i| Ray {
            x_start: center.x,
            y_start: center.y,
            angle: (i as f64 / count as f64) * 2.0 * PI,
        })
        .collect()
}

/// Screen rectangle `(0,0)-(width,height)`, both edges inclusive
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenBounds {
    pub width: f64,
    pub height: f64,
}

impl ScreenBounds {
    pub fn new(width: f64, height: f64) -> Self {
        ScreenBounds { width, height }
    }

    /// NaN coordinates count as outside
    pub fn contains(&self, point: Point) -> bool {
        (0.0..=self.width).contains(&point.x) && (0.0..=self.height).contains(&point.y)
    }
}

/// Why a trace ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The sample left the screen
    ScreenEdge,
    /// The ray went from outside the polygon to inside it
    Occluded,
    /// The march used up the longest on-screen path without leaving the screen
    StepLimit,
}

/// Result of marching a single ray
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    /// Samples to draw, in marching order
    pub points: Vec<Point>,
    /// Number of advances, including the one that ended the trace
    pub steps: usize,
    pub stop: StopReason,
}

/// Marches rays outward in fixed steps and collects the samples to draw.
///
/// A sample is emitted only while it lies inside the polygon. Marching stops
/// at the screen edge, or at the first step that moves from outside the
/// polygon to inside it; that sample is not emitted. Leaving the polygon never
/// stops the march.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityTracer {
    bounds: ScreenBounds,
    step: f64,
}

impl VisibilityTracer {
    pub fn new(bounds: ScreenBounds, step: f64) -> Self {
        VisibilityTracer { bounds, step }
    }

    pub fn bounds(&self) -> ScreenBounds {
        self.bounds
    }

    /// Advances after which a ray has crossed the whole screen diagonal
    pub fn max_steps(&self) -> usize {
        let diagonal = self.bounds.width.hypot(self.bounds.height);
        (diagonal / self.step.max(MIN_STEP)).ceil() as usize + 1
    }

    pub fn trace(&self, ray: &Ray, polygon: &Polygon) -> Trace {
        let (dx, dy) = ray.direction();
        let (step_x, step_y) = (self.step * dx, self.step * dy);

        let mut sample = ray.origin();
        let mut was_inside = polygon.contains(sample);
        let mut points = Vec::new();
        let mut steps = 0;
        let max_steps = self.max_steps();

        loop {
            if steps == max_steps {
                return Trace {
                    points,
                    steps,
                    stop: StopReason::StepLimit,
                };
            }
            sample.x += step_x;
            sample.y += step_y;
            steps += 1;

            if !self.bounds.contains(sample) {
                return Trace {
                    points,
                    steps,
                    stop: StopReason::ScreenEdge,
                };
            }

            let now_inside = polygon.contains(sample);
            if !was_inside && now_inside {
                return Trace {
                    points,
                    steps,
                    stop: StopReason::Occluded,
                };
            }
            if now_inside {
                points.push(sample);
            }
            was_inside = now_inside;
        }
    }

    /// Visible samples of every ray, in ray order
    pub fn trace_all(&self, rays: &[Ray], polygon: &Polygon) -> Vec<Vec<Point>> {
        rays.iter()
            .map(|ray| self.trace(ray, polygon).points)
            .collect()
    }
}
