//! A light source dragged around a gallery, casting a fan of rays that a
//! single static obstacle silhouette blocks.
//!
//! The core is [`tracer::VisibilityTracer`], which marches each ray of the fan
//! and decides which samples get drawn, using the even-odd membership test in
//! [`math::point_in_polygon`]. [`graphics`] rasterizes into any [`graphics::Surface`]
//! and [`widget`] drives it all from a terminal.

pub mod config;
pub mod error;
pub mod geometry;
pub mod graphics;
pub mod logging;
pub mod math;
pub mod polygon_file;
pub mod state;
pub mod tracer;
pub mod widget;

pub use error::{Error, Result};
