//! Integration tests against the built-in gallery silhouette.

use std::f64::consts::PI;

use museum_guards::config::Config;
use museum_guards::geometry::{Point, Polygon, Ray};
use museum_guards::graphics::{Color, FrameBuffer};
use museum_guards::state::AppState;
use museum_guards::tracer::{generate_rays, ScreenBounds, StopReason, VisibilityTracer};

fn tracer() -> VisibilityTracer {
    VisibilityTracer::new(ScreenBounds::new(900.0, 600.0), 1.0)
}

#[test]
fn test_default_light_starts_outside() {
    let gallery = Polygon::gallery();
    assert!(!gallery.contains(Point::new(200.0, 200.0)));
}

#[test]
fn test_rightward_ray_from_default_light_draws_nothing() {
    let gallery = Polygon::gallery();
    let ray = Ray {
        x_start: 200.0,
        y_start: 200.0,
        angle: 0.0,
    };
    let trace = tracer().trace(&ray, &gallery);
    assert!(trace.points.is_empty(), "ray emitted {} points", trace.points.len());
    assert_eq!(trace.stop, StopReason::Occluded);
}

#[test]
fn test_whole_fan_from_outside_draws_nothing() {
    let gallery = Polygon::gallery();
    let rays = generate_rays(Point::new(200.0, 200.0), 120);
    let tracer = tracer();
    for ray in &rays {
        let trace = tracer.trace(ray, &gallery);
        assert!(trace.points.is_empty(), "ray at {} emitted points", ray.angle);
    }
}

#[test]
fn test_light_inside_gallery_wall_draws_until_reentry() {
    let gallery = Polygon::gallery();
    let origin = Point::new(190.0, 300.0);
    assert!(gallery.contains(origin));

    let ray = Ray {
        x_start: origin.x,
        y_start: origin.y,
        angle: 0.0,
    };
    let trace = tracer().trace(&ray, &gallery);
    assert_eq!(trace.points.len(), 100);
    assert!(trace.points.iter().all(|&p| gallery.contains(p)));
    assert_eq!(trace.stop, StopReason::Occluded);
    assert_eq!(trace.steps, 103);
}

#[test]
fn test_offscreen_ray_stops_at_screen_edge() {
    let gallery = Polygon::gallery();
    // straight up from above the silhouette
    let ray = Ray {
        x_start: 700.0,
        y_start: 30.0,
        angle: 1.5 * PI,
    };
    let trace = tracer().trace(&ray, &gallery);
    assert!(trace.points.is_empty());
    assert_eq!(trace.stop, StopReason::ScreenEdge);
    assert!(trace.steps <= 900);
}

#[test]
fn test_rendering_is_deterministic() {
    let config = Config {
        light_x: 190.0,
        light_y: 300.0,
        ..Config::default()
    };
    let state = AppState::new(&config, Polygon::gallery());

    let mut first = FrameBuffer::new(config.width, config.height);
    let mut second = FrameBuffer::new(config.width, config.height);
    let stats = state.render(&mut first);
    assert_eq!(state.render(&mut second), stats);
    assert!(stats.visible_points > 0);

    for y in 0..config.height {
        assert_eq!(first.row(y), second.row(y), "row {y} differs");
    }
    assert_eq!(first.pixel(250, 300), Some(Color::YELLOW));
}
