//! Error types for the grid engine

use thiserror::Error;

pub type Result<T> = std::result::Result<T, LifeError>;

#[derive(Error, Debug)]
pub enum LifeError {
    #[error("Invalid grid dimensions {columns}x{rows}: both must be positive")]
    InvalidDimension { columns: usize, rows: usize },

    #[error("Coordinate ({column}, {row}) is outside the {columns}x{rows} grid")]
    UnknownCoordinate {
        column: usize,
        row: usize,
        columns: usize,
        rows: usize,
    },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for LifeError {
    fn from(err: serde_json::Error) -> Self {
        LifeError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for LifeError {
    fn from(err: serde_yaml::Error) -> Self {
        LifeError::Serialization(err.to_string())
    }
}
