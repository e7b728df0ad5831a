// src/error.rs
use thiserror::Error;

/// Errors raised by the metrics library
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Mask shape ({}x{}) does not match raster shape ({}x{})", .mask.0, .mask.1, .raster.0, .raster.1)]
    ShapeMismatch {
        raster: (usize, usize),
        mask: (usize, usize),
    },

    #[error("GDAL error: {0}")]
    Gdal(#[from] gdal::errors::GdalError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, Error>;
