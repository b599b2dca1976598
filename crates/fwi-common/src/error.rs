//! Error types for the fwi-map crates.

use thiserror::Error;

/// Result type alias using FwiError.
pub type FwiResult<T> = Result<T, FwiError>;

/// Primary error type for dataset access and rendering.
///
/// Only two failures are ever surfaced to the dashboard shell: a variable
/// name the dataset does not carry, and a time index outside the field's
/// time dimension. Lookup-table misses (display names, colormaps, units)
/// are handled by silent fallback instead of an error variant.
#[derive(Debug, Error)]
pub enum FwiError {
    #[error("variable not found in dataset: {0}")]
    VariableNotFound(String),

    #[error("time index {index} is out of range (field has {len} time steps)")]
    TimeIndexOutOfRange { index: usize, len: usize },

    #[error("invalid grid: {0}")]
    InvalidGrid(String),

    #[error("invalid style configuration: {0}")]
    InvalidStyle(String),

    #[error("PNG encoding failed: {0}")]
    PngEncode(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
