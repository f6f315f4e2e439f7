//! Error types for morphrecon

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for morphrecon operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Index out of bounds: ({row}, {col}) in image of size ({rows}, {cols})")]
    IndexOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Image size mismatch: expected ({er}, {ec}), got ({ar}, {ac})")]
    DimensionMismatch { er: usize, ec: usize, ar: usize, ac: usize },

    #[error("Invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("Precondition violated at ({row}, {col}): {reason}")]
    PreconditionViolation {
        row: usize,
        col: usize,
        reason: String,
    },

    #[error("Did not converge within {budget} propagation steps")]
    NotConverged { budget: usize },

    #[error("{0}")]
    Other(String),
}

/// Result type alias for morphrecon operations
pub type Result<T> = std::result::Result<T, Error>;
