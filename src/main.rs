use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use museum_guards::config::Config;
use museum_guards::geometry::Polygon;
use museum_guards::logging::init_logging;
use museum_guards::polygon_file::load_polygon;
use museum_guards::widget;

/// Main function
fn main() -> Result<()> {
    let config = Config::parse();
    init_logging(config.log_file.as_deref()).context("Failed to initialize logging")?;
    config.validate().context("Invalid configuration")?;

    let polygon = match &config.polygon {
        Some(path) => load_polygon(path)
            .with_context(|| format!("Failed to load polygon from {}", path.display()))?,
        None => Polygon::gallery(),
    };
    info!(vertices = polygon.len(), rays = config.rays, "Scene ready");

    widget::run(&config, polygon).context("Terminal session failed")?;
    Ok(())
}
