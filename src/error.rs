//! Error types for loading and configuration.

use thiserror::Error;

/// Main error type for everything outside the ray-marching core.
#[derive(Error, Debug)]
pub enum Error {
    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed line in a polygon file
    #[error("Polygon error on line {line}: {reason}")]
    Polygon { line: usize, reason: String },

    /// Polygon with too few vertices to enclose anything
    #[error("Polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),
}

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
