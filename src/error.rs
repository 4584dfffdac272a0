use thiserror::Error;

use crate::boundary::Position;

/// Rejected simulation parameters.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("population size must be at least 1")]
    EmptyPopulation,

    #[error("population size {value} is outside the supported range {min}..={max}")]
    PopulationOutOfRange { value: usize, min: usize, max: usize },

    #[error("at least one walker is required")]
    NoWalkers,

    #[error("{walkers} walkers do not fit on a {grid_size}x{grid_size} grid")]
    TooManyWalkers { walkers: usize, grid_size: usize },

    #[error("mirror boundaries need a grid of at least 3x3, got {grid_size}x{grid_size}")]
    MirrorGridTooSmall { grid_size: usize },

    #[error("position ({}, {}) is outside a {grid_size}x{grid_size} grid", .position.row, .position.col)]
    PositionOutOfRange { position: Position, grid_size: usize },

    #[error("iteration count must be at least 1")]
    NoIterations,

    #[error("speed {0} must be between 0.0 and 1.0")]
    SpeedOutOfRange(f32),

    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors raised while driving a [`WalkerField`](crate::WalkerField).
#[derive(Debug, Error)]
pub enum FieldError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("expected one direction per walker ({expected}), got {actual}")]
    DirectionCountMismatch { expected: usize, actual: usize },
}

pub type FieldResult<T> = Result<T, FieldError>;
