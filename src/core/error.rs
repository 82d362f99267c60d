//! Configuration errors
//!
//! The only failures that escape the engines. Everything that can go wrong
//! while ticking (degenerate viewports, NaN positions, empty pools) is
//! corrected in place instead.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("spawn interval must be a positive number of milliseconds, got {0}")]
    InvalidSpawnInterval(f64),

    #[error("cull margin must be finite and non-negative, got {0}")]
    InvalidMargin(f32),

    #[error("scroll speed must be finite and positive, got {0}")]
    InvalidScrollSpeed(f32),

    #[error("chart lines need at least one segment")]
    ZeroSegments,

    #[error("max_vertices {max} cannot hold a full line of {required} vertices")]
    VertexBudget { max: usize, required: usize },

    #[error("column width must be finite and positive, got {0}")]
    InvalidColumnWidth(f32),

    #[error("{name} must be a probability in [0, 1], got {value}")]
    InvalidChance { name: &'static str, value: f32 },

    #[error("{name} range [{lo}, {hi}] is out of bounds")]
    InvalidRange { name: &'static str, lo: f32, hi: f32 },

    #[error("{0} palette is empty")]
    EmptyPalette(&'static str),

    #[error("{0} glyph set is empty")]
    EmptyGlyphs(&'static str),

    #[error("scene cycle has no scenes")]
    EmptyCycle,

    #[error("scene {index} has invalid duration {duration_ms} ms")]
    InvalidSceneDuration { index: usize, duration_ms: f64 },

    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
