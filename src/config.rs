use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::error::{Error, Result};
use crate::geometry::{Circle, Point};
use crate::tracer::{ScreenBounds, MIN_STEP};

/// Largest accepted surface width or height
pub const MAX_SURFACE_SIDE: u32 = 16_384;

/// Largest accepted ray count
pub const MAX_RAYS: usize = 65_536;

/// A light source dragged around a gallery, with an obstacle blocking its rays
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(version, about)]
pub struct Config {
    /// Width of the drawing surface in pixels
    #[arg(long, default_value_t = 900)]
    pub width: u32,

    /// Height of the drawing surface in pixels
    #[arg(long, default_value_t = 600)]
    pub height: u32,

    /// Number of rays cast from the light
    #[arg(long, default_value_t = 120)]
    pub rays: usize,

    /// Side length of each drawn ray sample
    #[arg(long, default_value_t = 2)]
    pub thickness: u32,

    /// Distance between ray samples
    #[arg(long, default_value_t = 1.0)]
    pub step: f64,

    /// Radius of the light disc
    #[arg(long, default_value_t = 10.0)]
    pub radius: f64,

    /// Initial light x coordinate
    #[arg(long, default_value_t = 200.0)]
    pub light_x: f64,

    /// Initial light y coordinate
    #[arg(long, default_value_t = 200.0)]
    pub light_y: f64,

    /// Delay between frames in milliseconds
    #[arg(long, default_value_t = 5)]
    pub delay_ms: u64,

    /// Obstacle outline, one `x y` vertex per line (built-in silhouette if omitted)
    #[arg(long)]
    pub polygon: Option<PathBuf>,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            width: 900,
            height: 600,
            rays: 120,
            thickness: 2,
            step: 1.0,
            radius: 10.0,
            light_x: 200.0,
            light_y: 200.0,
            delay_ms: 5,
            polygon: None,
            log_file: None,
        }
    }
}

impl Config {
    /// Rejects values the renderer cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::Config(format!(
                "surface size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if self.width > MAX_SURFACE_SIDE || self.height > MAX_SURFACE_SIDE {
            return Err(Error::Config(format!(
                "surface sides must be at most {MAX_SURFACE_SIDE}, got {}x{}",
                self.width, self.height
            )));
        }
        let longest_side = self.width.max(self.height);
        if !(1..=MAX_RAYS).contains(&self.rays) {
            return Err(Error::Config(format!(
                "ray count must be between 1 and {MAX_RAYS}, got {}",
                self.rays
            )));
        }
        if !(1..=longest_side).contains(&self.thickness) {
            return Err(Error::Config(format!(
                "ray thickness must be between 1 and {longest_side}, got {}",
                self.thickness
            )));
        }
        if !(self.step.is_finite() && self.step >= MIN_STEP) {
            return Err(Error::Config(format!(
                "step must be a number of at least {MIN_STEP}, got {}",
                self.step
            )));
        }
        if !(self.radius.is_finite() && (0.0..=longest_side as f64).contains(&self.radius)) {
            return Err(Error::Config(format!(
                "radius must be between 0 and {longest_side}, got {}",
                self.radius
            )));
        }
        if !(self.light_x.is_finite() && self.light_y.is_finite()) {
            return Err(Error::Config("light position must be finite".into()));
        }
        Ok(())
    }

    pub fn bounds(&self) -> ScreenBounds {
        ScreenBounds::new(self.width as f64, self.height as f64)
    }

    pub fn light_start(&self) -> Point {
        Point::new(self.light_x, self.light_y)
    }

    pub fn light(&self) -> Circle {
        Circle {
            x: self.light_x,
            y: self.light_y,
            radius: self.radius,
        }
    }

    pub fn frame_delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}
