// error.rs - Error types
//
// Nothing here is fatal to the frame loop. The simulation maps field errors
// to graceful fallbacks; only configuration errors reach the caller.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    #[error("invalid grid dimensions {cols}x{rows}: both must be at least 1")]
    InvalidDimension { cols: usize, rows: usize },

    #[error("cell ({col}, {row}) is outside the {cols}x{rows} grid")]
    OutOfBounds {
        col: usize,
        row: usize,
        cols: usize,
        rows: usize,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cell_size must be at least 1 (got {0})")]
    CellSize(u32),

    #[error("damping must lie strictly between 0 and 1 (got {0})")]
    Damping(f32),

    #[error("stimulus_radius must lie in 1..=1024 (got {0})")]
    StimulusRadius(u32),

    #[error("{name} must be finite (got {value})")]
    NonFinite { name: &'static str, value: f32 },

    #[error("{name} must not be negative (got {value})")]
    Negative { name: &'static str, value: f32 },

    #[error("{name} must lie in [0, 1] (got {value})")]
    Alpha { name: &'static str, value: f32 },

    #[error("draw_radius must be positive (got {0})")]
    DrawRadius(f32),

    #[error("invalid click_ring: {0}")]
    ClickRing(String),

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
}
