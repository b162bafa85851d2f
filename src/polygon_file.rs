//! Reading obstacle outlines from plain-text vertex lists.
//!
//! One vertex per line, written `x y` or `x,y`. Blank lines and anything after
//! a `#` are ignored.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{Error, Result};
use crate::geometry::{Point, Polygon};

pub fn load_polygon(path: &Path) -> Result<Polygon> {
    let text = fs::read_to_string(path)?;
    let polygon = parse_polygon(&text)?;
    info!(path = %path.display(), vertices = polygon.len(), "Loaded polygon");
    Ok(polygon)
}

pub fn parse_polygon(text: &str) -> Result<Polygon> {
    let mut vertices = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        vertices.push(parse_vertex(line).map_err(|reason| Error::Polygon {
            line: index + 1,
            reason,
        })?);
    }

    if vertices.len() < 3 {
        return Err(Error::TooFewVertices(vertices.len()));
    }
    Ok(Polygon::new(vertices))
}

fn parse_vertex(line: &str) -> std::result::Result<Point, String> {
    let fields: Vec<&str> = line
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|f| !f.is_empty())
        .collect();
    let [x, y] = fields.as_slice() else {
        return Err(format!("expected 2 coordinates, found {}", fields.len()));
    };

    let coordinate = |field: &str| -> std::result::Result<f64, String> {
        match field.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            Ok(_) => Err(format!("coordinate `{field}` is not finite")),
            Err(_) => Err(format!("`{field}` is not a number")),
        }
    };
    Ok(Point::new(coordinate(*x)?, coordinate(*y)?))
}
