// src/error.rs

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// A manufacturer id outside the closed catalog.
    #[error("unknown manufacturer id {0}")]
    UnknownManufacturer(u32),

    #[error("no calendar date can be formed for year {0}")]
    InvalidYear(i32),

    #[error("invalid simulation config: {0}")]
    InvalidConfig(String),

    #[error("csv export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
